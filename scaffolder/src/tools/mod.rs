//! The tool catalogue
//!
//! Every tool is a pure function from its arguments to a block of
//! instructional text.

mod api_controller;
mod app;
mod fix_app;
mod html_controller;
mod model;
mod service;

use crate::arguments::ToolArguments;
use crate::error::InputError;
use crate::template::TemplateVars;
use echo_scaffolder_protocol::Tool;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldTool {
    App,
    Model,
    Service,
    ApiController,
    HtmlController,
    FixApp,
}

const APP_NAME_DESCRIPTION: &str =
    "The name of the application. This is used to output an example of correct import paths.";

impl ScaffoldTool {
    /// All tools in the order `tools/list` reports them
    pub const ALL: [ScaffoldTool; 6] = [
        ScaffoldTool::App,
        ScaffoldTool::Model,
        ScaffoldTool::Service,
        ScaffoldTool::ApiController,
        ScaffoldTool::HtmlController,
        ScaffoldTool::FixApp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::App => "app-scaffold",
            Self::Model => "model-scaffold",
            Self::Service => "service-scaffold",
            Self::ApiController => "api-controller-scaffold",
            Self::HtmlController => "html-controller-scaffold",
            Self::FixApp => "fix-app",
        }
    }

    /// Resolve a tool by its name or one of its older names
    pub fn from_name(name: &str) -> Option<Self> {
        let tool = match name {
            "app-scaffold" | "produce_app_boilerplate" | "create_app" => Self::App,
            "model-scaffold" | "produce_model_boilerplate" | "create_model" => Self::Model,
            "service-scaffold" | "produce_service_boilerplate" | "create_service" => Self::Service,
            "api-controller-scaffold"
            | "produce_api_controller_boilerplate"
            | "create_model_controller" => Self::ApiController,
            "html-controller-scaffold" | "produce_html_controller_boilerplate" => {
                Self::HtmlController
            }
            "fix-app" | "fix_app" => Self::FixApp,
            _ => return None,
        };
        Some(tool)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::App => {
                "Instructs the LLM to output an example scaffold for a new Echo web application."
            }
            Self::Model => {
                "Instructs the LLM to output an example boilerplate for a new GORM-compatible model and its repository files."
            }
            Self::Service => {
                "Instructs the LLM to output an example boilerplate for a new service layer with DTOs for a given model."
            }
            Self::ApiController => {
                "Instructs the LLM to output an example boilerplate for a new API controller for a given model."
            }
            Self::HtmlController => {
                "Instructs the LLM to output an example boilerplate for a new HTML controller using templUI for a given model."
            }
            Self::FixApp => {
                "Provides pointers on common issues and how to address them in an Echo web application."
            }
        }
    }

    /// JSON Schema of the tool's arguments
    pub fn input_schema(self) -> Value {
        match self {
            Self::App => json!({
                "type": "object",
                "properties": {
                    "app_name": { "type": "string", "description": "The name of the application." }
                },
                "required": ["app_name"]
            }),
            Self::Model => json!({
                "type": "object",
                "properties": {
                    "app_name": { "type": "string", "description": APP_NAME_DESCRIPTION },
                    "model_name": {
                        "type": "string",
                        "description": "The name of the model (e.g., User, Product)."
                    },
                    "fields": {
                        "type": "string",
                        "description": "A JSON array of objects, where each object has 'name' (string) and 'type' (string) for the model fields."
                    }
                },
                "required": ["app_name", "model_name", "fields"]
            }),
            Self::Service | Self::ApiController | Self::HtmlController => json!({
                "type": "object",
                "properties": {
                    "app_name": { "type": "string", "description": APP_NAME_DESCRIPTION },
                    "model_name": {
                        "type": "string",
                        "description": self.model_name_description()
                    }
                },
                "required": ["app_name", "model_name"]
            }),
            Self::FixApp => json!({
                "type": "object",
                "properties": {
                    "app_name": {
                        "type": "string",
                        "description": "The name of the application to fix."
                    },
                    "error_message": {
                        "type": "string",
                        "description": "The specific error message encountered."
                    }
                }
            }),
        }
    }

    fn model_name_description(self) -> &'static str {
        match self {
            Self::Service => {
                "The name of the model for which to output an example service (e.g., User, Product)."
            }
            Self::ApiController => {
                "The name of the model for which to output an example controller (e.g., User, Product)."
            }
            _ => {
                "The name of the model for which to output an example HTML controller (e.g., User, Product)."
            }
        }
    }

    pub fn definition(self) -> Tool {
        Tool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    pub fn run(self, args: &ToolArguments) -> Result<String, InputError> {
        match self {
            Self::App => app::run(args),
            Self::Model => model::run(args),
            Self::Service => service::run(args),
            Self::ApiController => api_controller::run(args),
            Self::HtmlController => html_controller::run(args),
            Self::FixApp => Ok(fix_app::run(args)),
        }
    }
}

/// Definitions of every tool, for `tools/list`
pub fn catalogue() -> Vec<Tool> {
    ScaffoldTool::ALL.iter().map(|tool| tool.definition()).collect()
}

/// `app_name` and `model_name`, checked in that order
fn model_vars(args: &ToolArguments) -> Result<TemplateVars, InputError> {
    let app_name = args.optional_str("app_name");
    if app_name.is_empty() {
        return Err(InputError::AppNameRequired);
    }
    let model_name = args.require_str("model_name")?;

    Ok(TemplateVars::for_model(app_name, model_name))
}

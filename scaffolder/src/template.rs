//! Placeholder substitution for the bundled scaffold templates
//!
//! Templates use `{{app_name}}`, `{{model_title}}`, `{{model_lower}}` and
//! `{{model_struct}}`. Any other `{{...}}` sequence (templ code blocks such as
//! `{{ handle := templ.NewOnceHandle() }}`) is copied through untouched.

use crate::naming::{lower_case, title_case};

pub const APP: &str = include_str!("../templates/app.md");
pub const MODEL: &str = include_str!("../templates/model.md");
pub const SERVICE: &str = include_str!("../templates/service.md");
pub const API_CONTROLLER: &str = include_str!("../templates/api_controller.md");
pub const HTML_CONTROLLER: &str = include_str!("../templates/html_controller.md");

/// Names of the placeholders [`render`] understands
pub const PLACEHOLDERS: [&str; 4] = ["app_name", "model_title", "model_lower", "model_struct"];

/// Substitution values for one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    pub app_name: String,
    pub model_title: String,
    pub model_lower: String,
    pub model_struct: String,
}

impl TemplateVars {
    pub fn for_app(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            ..Self::default()
        }
    }

    /// Derives the title-cased and lower-cased forms of `model_name`
    pub fn for_model(app_name: &str, model_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            model_title: title_case(model_name),
            model_lower: lower_case(model_name),
            model_struct: String::new(),
        }
    }

    pub fn with_model_struct(mut self, model_struct: String) -> Self {
        self.model_struct = model_struct;
        self
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "app_name" => Some(&self.app_name),
            "model_title" => Some(&self.model_title),
            "model_lower" => Some(&self.model_lower),
            "model_struct" => Some(&self.model_struct),
            _ => None,
        }
    }
}

/// Render `template` in a single left-to-right pass
///
/// Substituted values are never scanned again, so a model name containing
/// `{{app_name}}` comes out literally.
pub fn render(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let value = after_open
            .find("}}")
            .and_then(|end| vars.lookup(&after_open[..end]).map(|value| (end, value)));

        match value {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

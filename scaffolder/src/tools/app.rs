//! `app-scaffold`: project layout and a starter `main.go`

use crate::arguments::ToolArguments;
use crate::error::InputError;
use crate::template::{self, TemplateVars};

pub(super) fn run(args: &ToolArguments) -> Result<String, InputError> {
    let app_name = args.require_str("app_name")?;
    Ok(template::render(template::APP, &TemplateVars::for_app(app_name)))
}

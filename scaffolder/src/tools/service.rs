//! `service-scaffold`: service layer and DTOs

use super::model_vars;
use crate::arguments::ToolArguments;
use crate::error::InputError;
use crate::template;

pub(super) fn run(args: &ToolArguments) -> Result<String, InputError> {
    Ok(template::render(template::SERVICE, &model_vars(args)?))
}

//! `api-controller-scaffold`: JSON CRUD handlers

use super::model_vars;
use crate::arguments::ToolArguments;
use crate::error::InputError;
use crate::template;

pub(super) fn run(args: &ToolArguments) -> Result<String, InputError> {
    Ok(template::render(template::API_CONTROLLER, &model_vars(args)?))
}

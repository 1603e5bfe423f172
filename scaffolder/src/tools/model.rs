//! `model-scaffold`: GORM model plus repository

use super::model_vars;
use crate::arguments::ToolArguments;
use crate::error::InputError;
use crate::fields::model_struct;
use crate::template;
use tracing::debug;

pub(super) fn run(args: &ToolArguments) -> Result<String, InputError> {
    let vars = model_vars(args)?;
    let fields = args.fields("fields")?;
    debug!(model = %vars.model_title, fields = fields.len(), "Rendering model");

    let declaration = model_struct(&vars.model_title, &fields);
    let vars = vars.with_model_struct(declaration);
    Ok(template::render(template::MODEL, &vars))
}

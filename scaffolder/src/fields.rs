//! Field descriptors and the GORM model declaration built from them

use crate::naming::title_case;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// One `{"name": ..., "type": ...}` entry of a model's field list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable_string")]
    pub field_type: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Both name and type are present
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty() && !self.field_type.is_empty()
    }

    /// Struct field line, e.g. ``\tTitle string `json:"title"` ``
    pub fn struct_line(&self) -> String {
        format!(
            "\t{} {} `json:\"{}\"`",
            title_case(&self.name),
            self.field_type,
            self.name
        )
    }
}

/// `null` decodes like an absent key
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a field list
///
/// A `null` list is empty and `null` entries are empty descriptors.
pub(crate) fn decode_list(value: serde_json::Value) -> serde_json::Result<Vec<FieldDescriptor>> {
    let entries: Option<Vec<Option<FieldDescriptor>>> = serde_json::from_value(value)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// One struct line per descriptor, in input order
pub fn struct_lines(fields: &[FieldDescriptor]) -> Vec<String> {
    fields
        .iter()
        .map(|field| {
            if !field.is_usable() {
                warn!(
                    name = %field.name,
                    field_type = %field.field_type,
                    "Field descriptor is missing its name or type"
                );
            }
            field.struct_line()
        })
        .collect()
}

/// Complete `models` package source for `model_name`
pub fn model_struct(model_name: &str, fields: &[FieldDescriptor]) -> String {
    format!(
        "package models\n\nimport \"gorm.io/gorm\"\n\ntype {} struct {{\n\tgorm.Model\n{}\n}}\n",
        title_case(model_name),
        struct_lines(fields).join("\n")
    )
}

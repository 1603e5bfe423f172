//! Typed access to the `arguments` object of a tool call

use crate::error::InputError;
use crate::fields::{FieldDescriptor, decode_list};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    /// Wrap raw arguments; anything other than an object counts as no arguments
    pub fn new(arguments: Option<Value>) -> Self {
        match arguments {
            Some(Value::Object(values)) => Self { values },
            _ => Self::default(),
        }
    }

    /// A required, non-empty string argument
    pub fn require_str(&self, name: &str) -> Result<&str, InputError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Err(InputError::missing(name)),
            Some(Value::String(s)) if s.is_empty() => Err(InputError::missing(name)),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(InputError::wrong_type(name)),
        }
    }

    /// A string argument, or `""` when absent or not a string
    pub fn optional_str(&self, name: &str) -> &str {
        self.values.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// A required field list, sent either as JSON text or as a JSON array
    pub fn fields(&self, name: &str) -> Result<Vec<FieldDescriptor>, InputError> {
        let value = match self.values.get(name) {
            None | Some(Value::Null) => return Err(InputError::missing(name)),
            Some(Value::String(s)) if s.is_empty() => return Err(InputError::missing(name)),
            Some(Value::String(s)) => {
                serde_json::from_str(s).map_err(|e| InputError::malformed(name, e.to_string()))?
            }
            Some(value @ Value::Array(_)) => value.clone(),
            Some(_) => {
                return Err(InputError::malformed(
                    name,
                    "expected a JSON array of {\"name\", \"type\"} objects",
                ));
            }
        };

        decode_list(value).map_err(|e| InputError::malformed(name, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn args(value: Value) -> ToolArguments {
        ToolArguments::new(Some(value))
    }

    #[test]
    fn test_require_str() {
        let args = args(json!({"model_name": "User", "empty": "", "count": 3, "none": null}));

        assert_eq!(args.require_str("model_name"), Ok("User"));
        assert_eq!(args.require_str("missing"), Err(InputError::missing("missing")));
        assert_eq!(args.require_str("empty"), Err(InputError::missing("empty")));
        assert_eq!(args.require_str("none"), Err(InputError::missing("none")));
        assert_eq!(args.require_str("count"), Err(InputError::wrong_type("count")));
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = args(json!({})).require_str("model_name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error getting 'model_name': required argument \"model_name\" not found"
        );
    }

    #[test]
    fn test_optional_str() {
        let args = args(json!({"app_name": "shop", "error_message": 42}));
        assert_eq!(args.optional_str("app_name"), "shop");
        assert_eq!(args.optional_str("error_message"), "");
        assert_eq!(args.optional_str("absent"), "");
    }

    #[test]
    fn test_non_object_arguments_are_empty() {
        let args = ToolArguments::new(Some(json!("app_name")));
        assert_eq!(args.optional_str("app_name"), "");
        assert_matches!(
            args.require_str("app_name"),
            Err(InputError::MissingParameter { .. })
        );
        assert_eq!(ToolArguments::new(None).optional_str("x"), "");
    }

    #[test]
    fn test_fields_from_json_text() {
        let args = args(json!({
            "fields": "[{\"name\":\"title\",\"type\":\"string\"},{\"name\":\"views\",\"type\":\"int\"}]"
        }));

        let fields = args.fields("fields").expect("decodable");
        assert_eq!(
            fields,
            vec![
                FieldDescriptor::new("title", "string"),
                FieldDescriptor::new("views", "int"),
            ]
        );
    }

    #[test]
    fn test_fields_from_native_array() {
        let args = args(json!({"fields": [{"name": "title", "type": "string"}]}));
        assert_eq!(
            args.fields("fields"),
            Ok(vec![FieldDescriptor::new("title", "string")])
        );
    }

    #[test]
    fn test_fields_null_text_is_empty_list() {
        assert_eq!(args(json!({"fields": "null"})).fields("fields"), Ok(vec![]));
    }

    #[test]
    fn test_fields_errors() {
        assert_matches!(
            args(json!({})).fields("fields"),
            Err(InputError::MissingParameter { name }) if name == "fields"
        );
        assert_matches!(
            args(json!({"fields": "not json"})).fields("fields"),
            Err(InputError::MalformedInput { name, .. }) if name == "fields"
        );
        assert_matches!(
            args(json!({"fields": "{\"name\":\"title\"}"})).fields("fields"),
            Err(InputError::MalformedInput { .. })
        );
        assert_matches!(
            args(json!({"fields": 12})).fields("fields"),
            Err(InputError::MalformedInput { .. })
        );
    }

    #[test]
    fn test_malformed_message_prefix() {
        let err = args(json!({"fields": "not json"}))
            .fields("fields")
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid 'fields' JSON format: "));
    }
}

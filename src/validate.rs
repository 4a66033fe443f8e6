//! Structural re-validation of assembled tool declarations.
//!
//! Works on `serde_json::Value` so any candidate payload can be checked,
//! not just values this crate produced. Errors name the offending field
//! path (`tool[0].parameters.properties.config.items`).

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid field `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn prefixed(self, prefix: &str) -> Self {
        let Self::Invalid { field, reason } = self;
        Self::Invalid {
            field: format!("{prefix}.{field}"),
            reason,
        }
    }
}

/// Validates a `{"tool": [...]}` container and every declaration in it.
pub fn validate_container(value: &Value) -> Result<(), ValidationError> {
    let tool = value
        .get("tool")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::new("tool", "must be an array of tool declarations"))?;
    for (index, declaration) in tool.iter().enumerate() {
        validate_declaration(declaration).map_err(|e| e.prefixed(&format!("tool[{index}]")))?;
    }
    Ok(())
}

/// Validates one declaration: the `name`/`description`/`parameters`
/// contract, then a recursive walk of every schema node under
/// `parameters`.
pub fn validate_declaration(value: &Value) -> Result<(), ValidationError> {
    let declaration = value
        .as_object()
        .ok_or_else(|| ValidationError::new("declaration", "must be a JSON object"))?;

    match declaration.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => return Err(ValidationError::new("name", "must be a non-empty string")),
    }
    if declaration.get("description").and_then(Value::as_str).is_none() {
        return Err(ValidationError::new("description", "must be a string"));
    }

    let parameters_value = declaration
        .get("parameters")
        .ok_or_else(|| ValidationError::new("parameters", "must be a JSON object"))?;
    let parameters = parameters_value
        .as_object()
        .ok_or_else(|| ValidationError::new("parameters", "must be a JSON object"))?;
    if parameters.get("type").and_then(Value::as_str) != Some("object") {
        return Err(ValidationError::new(
            "parameters.type",
            "must be the string \"object\"",
        ));
    }
    if !parameters.get("properties").is_some_and(Value::is_object) {
        return Err(ValidationError::new(
            "parameters.properties",
            "must be a JSON object",
        ));
    }

    validate_schema(parameters_value, "parameters")
}

/// Recursive schema-node walk: arrays must carry an `items` object and
/// objects that declare fields must do so through a `properties` object
/// with a consistent `required` list.
fn validate_schema(value: &Value, path: &str) -> Result<(), ValidationError> {
    let node = value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "schema node must be a JSON object"))?;
    let type_name = node
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::new(path, "schema node must carry a string `type`"))?;

    match type_name {
        "array" => {
            let items = node.get("items").ok_or_else(|| {
                ValidationError::new(path, "array schema must carry an `items` schema")
            })?;
            validate_schema(items, &format!("{path}.items"))
        }
        "object" => {
            let Some(properties) = node.get("properties") else {
                if node.contains_key("required") {
                    return Err(ValidationError::new(
                        path,
                        "`required` is not allowed without `properties`",
                    ));
                }
                return Ok(());
            };
            let properties = properties.as_object().ok_or_else(|| {
                ValidationError::new(format!("{path}.properties"), "must be a JSON object")
            })?;
            for (name, field) in properties {
                validate_schema(field, &format!("{path}.properties.{name}"))?;
            }
            if let Some(required) = node.get("required") {
                let required = required.as_array().ok_or_else(|| {
                    ValidationError::new(format!("{path}.required"), "must be an array of strings")
                })?;
                for entry in required {
                    let name = entry.as_str().ok_or_else(|| {
                        ValidationError::new(
                            format!("{path}.required"),
                            "must be an array of strings",
                        )
                    })?;
                    if !properties.contains_key(name) {
                        return Err(ValidationError::new(
                            format!("{path}.required"),
                            format!("`{name}` is not a declared property"),
                        ));
                    }
                }
            }
            Ok(())
        }
        // Primitives and null carry no structural keys to check.
        _ => Ok(()),
    }
}

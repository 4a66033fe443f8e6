//! Assembly of a complete tool declaration from a docstring.
//!
//! [`compile`] is the crate's main entry point: it parses the docstring,
//! normalizes every argument's type, reconstructs nested object schemas
//! from bullet lists, and wraps the result in the container shape LLM
//! function-calling APIs consume.

use serde::Serialize;
use tracing::debug;

use crate::docstring;
use crate::nested::parse_object_properties;
use crate::schema::{SchemaKind, SchemaNode, insert_property, push_required};
use crate::typemap::{clean_type_string, map_type};

/// Boundary precondition failures. These are the only errors `compile`
/// can produce; everything past the boundary resolves via fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("docstring must be a non-empty string")]
    EmptyDocstring,

    #[error("function_name must be a non-empty string")]
    EmptyFunctionName,
}

/// One callable's declaration: name, summary, and a JSON-Schema-shaped
/// parameter object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: SchemaNode,
}

/// The wire container. Always holds exactly one declaration here; kept as
/// a sequence for compatibility with validators that take a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContainer {
    pub tool: Vec<ToolDeclaration>,
}

impl ToolContainer {
    pub fn single(declaration: ToolDeclaration) -> Self {
        Self {
            tool: vec![declaration],
        }
    }
}

/// Compiles a Google-style docstring into a tool declaration.
///
/// `parameters` is always an object node carrying `properties` and
/// `required`, both possibly empty, in argument declaration order. Fails
/// only on an empty or whitespace-only docstring or function name.
pub fn compile(docstring_text: &str, function_name: &str) -> Result<ToolContainer, SpecError> {
    if docstring_text.trim().is_empty() {
        return Err(SpecError::EmptyDocstring);
    }
    if function_name.trim().is_empty() {
        return Err(SpecError::EmptyFunctionName);
    }

    let parsed = docstring::parse(docstring_text);

    let mut properties: Vec<(String, SchemaNode)> = Vec::new();
    let mut required: Vec<String> = Vec::new();
    for arg in &parsed.arguments {
        let mut node = map_type(&clean_type_string(&arg.raw_type));
        if node.is_object() || node.is_array_of_objects() {
            let (main, nested) = parse_object_properties(&arg.description);
            if let Some((fields, field_required)) = nested {
                node.attach_properties(fields, field_required);
            }
            node.set_description(main.trim());
        } else {
            node.set_description(arg.description.as_str());
        }

        insert_property(&mut properties, &arg.name, node);
        if arg.required {
            push_required(&mut required, &arg.name);
        }
    }

    let parameters = SchemaNode {
        kind: SchemaKind::Object {
            properties: Some(properties),
            required,
        },
        description: None,
    };

    debug!(
        function = function_name,
        arguments = parsed.arguments.len(),
        "compiled tool declaration"
    );
    Ok(ToolContainer::single(ToolDeclaration {
        name: function_name.to_string(),
        description: parsed.summary,
        parameters,
    }))
}

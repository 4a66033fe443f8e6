use serde::ser::{Serialize, SerializeMap, Serializer};

/// The scalar JSON Schema types a parameter can normalize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
}

/// One JSON-Schema-shaped type descriptor.
///
/// `Object` distinguishes "no object schema" (`properties: None`, serialized
/// without `properties`/`required`) from "an empty object schema"
/// (`properties: Some(vec![])`, serialized as `"properties": {}` plus
/// `"required": []`). Arrays always carry their item schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Primitive(Primitive),
    Array(Box<SchemaNode>),
    Object {
        properties: Option<Vec<(String, SchemaNode)>>,
        required: Vec<String>,
    },
    Null,
}

/// A schema node plus its optional human-readable description.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

impl SchemaNode {
    pub fn string() -> Self {
        Self::primitive(Primitive::String)
    }

    pub fn integer() -> Self {
        Self::primitive(Primitive::Integer)
    }

    pub fn number() -> Self {
        Self::primitive(Primitive::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub fn null() -> Self {
        Self {
            kind: SchemaKind::Null,
            description: None,
        }
    }

    pub fn primitive(p: Primitive) -> Self {
        Self {
            kind: SchemaKind::Primitive(p),
            description: None,
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            kind: SchemaKind::Array(Box::new(items)),
            description: None,
        }
    }

    /// The "Any" fallback: an object with no declared shape.
    pub fn any_object() -> Self {
        Self {
            kind: SchemaKind::Object {
                properties: None,
                required: Vec::new(),
            },
            description: None,
        }
    }

    /// An object that is known to be a map but has no fields yet
    /// (`Dict[K, V]` annotations land here until the docstring bullets,
    /// if any, fill it in).
    pub fn empty_object() -> Self {
        Self {
            kind: SchemaKind::Object {
                properties: Some(Vec::new()),
                required: Vec::new(),
            },
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    /// Sets the description, treating an empty string as "no description".
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
    }

    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            SchemaKind::Primitive(p) => p.as_str(),
            SchemaKind::Array(_) => "array",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Null => "null",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object { .. })
    }

    pub fn is_array_of_objects(&self) -> bool {
        match &self.kind {
            SchemaKind::Array(items) => items.is_object(),
            _ => false,
        }
    }

    /// Attaches parsed fields to this node: directly for objects, onto the
    /// item schema for arrays of objects. No-op for anything else.
    pub fn attach_properties(
        &mut self,
        properties: Vec<(String, SchemaNode)>,
        required: Vec<String>,
    ) {
        match &mut self.kind {
            SchemaKind::Object {
                properties: props,
                required: req,
            } => {
                *props = Some(properties);
                *req = required;
            }
            SchemaKind::Array(items) if items.is_object() => {
                items.attach_properties(properties, required);
            }
            _ => {}
        }
    }
}

/// Inserts a named property, overwriting any earlier entry with the same
/// name while keeping its original position.
pub(crate) fn insert_property(
    properties: &mut Vec<(String, SchemaNode)>,
    name: &str,
    node: SchemaNode,
) {
    if let Some(slot) = properties.iter_mut().find(|(n, _)| n == name) {
        slot.1 = node;
    } else {
        properties.push((name.to_string(), node));
    }
}

/// Appends to a `required` list, skipping duplicates.
pub(crate) fn push_required(required: &mut Vec<String>, name: &str) {
    if !required.iter().any(|n| n == name) {
        required.push(name.to_string());
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Key order matters for downstream consumers: type, then description,
        // then the structural keys.
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        match &self.kind {
            SchemaKind::Array(items) => {
                map.serialize_entry("items", items.as_ref())?;
            }
            SchemaKind::Object {
                properties: Some(properties),
                required,
            } => {
                map.serialize_entry("properties", &PropertyMap(properties))?;
                map.serialize_entry("required", required)?;
            }
            _ => {}
        }
        map.end()
    }
}

struct PropertyMap<'a>(&'a [(String, SchemaNode)]);

impl Serialize for PropertyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_serializes_to_bare_type() {
        let value = serde_json::to_value(SchemaNode::string()).unwrap();
        assert_eq!(value, json!({"type": "string"}));
    }

    #[test]
    fn description_rides_along() {
        let node = SchemaNode::integer().with_description("a count");
        let value = serde_json::to_value(node).unwrap();
        assert_eq!(value, json!({"type": "integer", "description": "a count"}));
    }

    #[test]
    fn array_always_carries_items() {
        let node = SchemaNode::array(SchemaNode::any_object());
        let value = serde_json::to_value(node).unwrap();
        assert_eq!(value, json!({"type": "array", "items": {"type": "object"}}));
    }

    #[test]
    fn shapeless_object_omits_properties_and_required() {
        let value = serde_json::to_value(SchemaNode::any_object()).unwrap();
        assert_eq!(value, json!({"type": "object"}));
    }

    #[test]
    fn empty_object_keeps_both_keys() {
        let value = serde_json::to_value(SchemaNode::empty_object()).unwrap();
        assert_eq!(
            value,
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn attach_properties_reaches_array_items() {
        let mut node = SchemaNode::array(SchemaNode::any_object());
        node.attach_properties(
            vec![("id".to_string(), SchemaNode::string())],
            vec!["id".to_string()],
        );
        let value = serde_json::to_value(node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {"id": {"type": "string"}},
                    "required": ["id"]
                }
            })
        );
    }

    #[test]
    fn insert_property_overwrites_in_place() {
        let mut props = Vec::new();
        insert_property(&mut props, "a", SchemaNode::string());
        insert_property(&mut props, "b", SchemaNode::integer());
        insert_property(&mut props, "a", SchemaNode::boolean());
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].0, "a");
        assert_eq!(props[0].1, SchemaNode::boolean());
    }

    #[test]
    fn empty_description_is_dropped() {
        let node = SchemaNode::string().with_description("");
        assert_eq!(node.description, None);
    }
}

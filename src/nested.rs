//! Nested object schema reconstruction from indented bullet lists.
//!
//! Object-typed arguments often describe their fields inline:
//!
//! ```text
//! Connection settings.
//! - host (str): Server host.
//! - auth (dict): Credentials.
//!     - user (str): Account name.
//!     - token (str, optional): API token.
//! ```
//!
//! [`parse_object_properties`] turns such a block into a property list plus
//! a `required` list, recursing wherever an object-typed bullet has its own
//! indented bullets beneath it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::schema::{SchemaNode, insert_property, push_required};
use crate::typemap::{clean_type_string, is_optional_type_string, map_type};

/// `- name (type): description`, with the field name optionally quoted.
static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*-\s+['"`]?(\w[\w.]*)['"`]?\s*\(([^)]*)\)\s*:\s*(.*)$"#)
        .expect("bullet line pattern")
});

/// Field list plus the names that are required, in declaration order.
pub type ParsedProperties = (Vec<(String, SchemaNode)>, Vec<String>);

struct Line<'a> {
    indent: usize,
    content: &'a str,
    bullet: Option<Bullet<'a>>,
}

struct Bullet<'a> {
    name: &'a str,
    raw_type: &'a str,
    inline: &'a str,
}

/// Parses a description block into its leading prose and, when the block
/// contains field bullets, the reconstructed properties.
///
/// With zero bullets the description comes back unchanged and the
/// properties are `None`; callers then omit `properties`/`required`
/// entirely instead of emitting an empty object schema.
pub fn parse_object_properties(description: &str) -> (String, Option<ParsedProperties>) {
    let lines: Vec<Line> = description
        .lines()
        .map(|raw| Line {
            indent: raw.chars().take_while(|c| c.is_whitespace()).count(),
            content: raw.trim(),
            bullet: BULLET_LINE.captures(raw).map(|caps| Bullet {
                name: caps.get(1).map_or("", |m| m.as_str()),
                raw_type: caps.get(2).map_or("", |m| m.as_str()),
                inline: caps.get(3).map_or("", |m| m.as_str()),
            }),
        })
        .collect();

    if !lines.iter().any(|line| line.bullet.is_some()) {
        return (description.to_string(), None);
    }

    let (main, properties, required) = parse_block(&lines);
    (main, Some((properties, required)))
}

/// Recursive descent over a block known to contain at least one bullet.
///
/// A bullet owns every following line up to (excluding) the next non-empty
/// line at indentation less than or equal to its own; that range is its
/// child block. A line only belongs to a bullet indented strictly less
/// than itself, so prose that falls back to a shallower column folds into
/// the enclosing description rather than the deeper bullet.
fn parse_block(lines: &[Line]) -> (String, Vec<(String, SchemaNode)>, Vec<String>) {
    let first = lines
        .iter()
        .position(|line| line.bullet.is_some())
        .unwrap_or(lines.len());
    let mut main = fold_prose(&lines[..first]);

    let mut properties: Vec<(String, SchemaNode)> = Vec::new();
    let mut required: Vec<String> = Vec::new();

    let mut i = first;
    while i < lines.len() {
        let line = &lines[i];
        let Some(bullet) = line.bullet.as_ref() else {
            // Prose that closed some bullet's range belongs to this block.
            if !line.content.is_empty() {
                main = join_prose(&main, line.content);
            }
            i += 1;
            continue;
        };

        let mut end = i + 1;
        while end < lines.len() {
            let next = &lines[end];
            if !next.content.is_empty() && next.indent <= line.indent {
                break;
            }
            end += 1;
        }
        let child = &lines[i + 1..end];

        let mut node = map_type(&clean_type_string(bullet.raw_type));
        let child_has_bullets = child.iter().any(|l| l.bullet.is_some());
        let description;
        if (node.is_object() || node.is_array_of_objects()) && child_has_bullets {
            trace!(field = bullet.name, "descending into nested field block");
            let (child_main, child_props, child_required) = parse_block(child);
            node.attach_properties(child_props, child_required);
            description = join_prose(bullet.inline, &child_main);
        } else {
            description = join_prose(bullet.inline, &fold_prose(child));
        }
        node.set_description(description);

        insert_property(&mut properties, bullet.name, node);
        if !is_optional_type_string(bullet.raw_type) {
            push_required(&mut required, bullet.name);
        }

        i = end;
    }

    (main, properties, required)
}

/// Trimmed non-empty lines joined as running prose.
fn fold_prose(lines: &[Line]) -> String {
    let parts: Vec<&str> = lines
        .iter()
        .map(|line| line.content)
        .filter(|content| !content.is_empty())
        .collect();
    parts.join(" ")
}

fn join_prose(base: &str, extra: &str) -> String {
    let base = base.trim();
    let extra = extra.trim();
    match (base.is_empty(), extra.is_empty()) {
        (true, _) => extra.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {extra}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_object_json(description: &str) -> serde_json::Value {
        let (main, parsed) = parse_object_properties(description);
        let (properties, required) = parsed.expect("bullets expected");
        let mut node = SchemaNode::empty_object();
        node.attach_properties(properties, required);
        node.set_description(main);
        serde_json::to_value(node).unwrap()
    }

    #[test]
    fn zero_bullets_leaves_description_untouched() {
        let text = "Just prose.\nMore prose.";
        let (main, parsed) = parse_object_properties(text);
        assert_eq!(main, text);
        assert!(parsed.is_none());
    }

    #[test]
    fn flat_bullets_become_properties() {
        let value = as_object_json(
            "Connection settings.\n\
             - host (str): Server host.\n\
             - port (int, optional): Server port.",
        );
        assert_eq!(
            value,
            json!({
                "type": "object",
                "description": "Connection settings.",
                "properties": {
                    "host": {"type": "string", "description": "Server host."},
                    "port": {"type": "integer", "description": "Server port."}
                },
                "required": ["host"]
            })
        );
    }

    #[test]
    fn three_levels_of_nesting_reconstruct() {
        let value = as_object_json(
            "Service configuration.\n\
             - database (dict): Database settings.\n\
             \x20   - host (str): Database host.\n\
             \x20   - credentials (dict): Access credentials.\n\
             \x20       - username (str): Account name.\n\
             \x20       - password (str, optional): Account password.\n\
             - debug (bool, optional): Verbose mode.",
        );
        assert_eq!(
            value,
            json!({
                "type": "object",
                "description": "Service configuration.",
                "properties": {
                    "database": {
                        "type": "object",
                        "description": "Database settings.",
                        "properties": {
                            "host": {"type": "string", "description": "Database host."},
                            "credentials": {
                                "type": "object",
                                "description": "Access credentials.",
                                "properties": {
                                    "username": {"type": "string", "description": "Account name."},
                                    "password": {"type": "string", "description": "Account password."}
                                },
                                "required": ["username"]
                            }
                        },
                        "required": ["host", "credentials"]
                    },
                    "debug": {"type": "boolean", "description": "Verbose mode."}
                },
                "required": ["database"]
            })
        );
    }

    #[test]
    fn prose_between_bullets_folds_instead_of_becoming_fields() {
        let value = as_object_json(
            "Settings.\n\
             - host (str): Server host.\n\
             \x20   Use the fully qualified name.\n\
             - port (int): Server port.",
        );
        assert_eq!(
            value["properties"]["host"]["description"],
            json!("Server host. Use the fully qualified name.")
        );
        assert_eq!(value["properties"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn quoted_field_names_are_unquoted() {
        let value = as_object_json("Keys.\n- \"key1\" (str): First.\n- 'key2' (int): Second.");
        let properties = value["properties"].as_object().unwrap();
        assert!(properties.contains_key("key1"));
        assert!(properties.contains_key("key2"));
    }

    #[test]
    fn empty_type_defaults_to_shapeless_object() {
        let value = as_object_json("Stuff.\n- blob (): Anything at all.");
        assert_eq!(value["properties"]["blob"]["type"], json!("object"));
        assert_eq!(value["required"], json!(["blob"]));
    }

    #[test]
    fn bullets_under_a_primitive_fold_as_prose() {
        let value = as_object_json(
            "Settings.\n\
             - label (str): A label.\n\
             \x20   - not (str): a real field.",
        );
        let properties = value["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(
            value["properties"]["label"]["description"],
            json!("A label. - not (str): a real field.")
        );
    }

    #[test]
    fn shallower_prose_folds_into_the_enclosing_bullet() {
        let value = as_object_json(
            "Top prose.\n\
             - a (dict): A.\n\
             \x20   - b (str): B.\n\
             \x20 shallow prose",
        );
        assert_eq!(
            value["properties"]["a"]["description"],
            json!("A. shallow prose")
        );
        assert_eq!(
            value["properties"]["a"]["properties"]["b"]["description"],
            json!("B.")
        );
    }

    #[test]
    fn prose_at_bullet_level_belongs_to_the_block() {
        let (main, parsed) = parse_object_properties("Intro.\n- a (str): A.\ntrailing note");
        assert_eq!(main, "Intro. trailing note");
        let (properties, _) = parsed.unwrap();
        assert_eq!(properties[0].1.description.as_deref(), Some("A."));
    }

    #[test]
    fn duplicate_field_names_overwrite_in_place() {
        let value = as_object_json("X.\n- a (int): First.\n- b (str): Mid.\n- a (str): Second.");
        let properties = value["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(value["properties"]["a"]["type"], json!("string"));
    }

    #[test]
    fn array_of_objects_gets_items_properties() {
        let value = as_object_json(
            "Data.\n\
             - records (list): Row data.\n\
             \x20   - id (int): Row id.\n\
             \x20   - label (str, optional): Display label.",
        );
        assert_eq!(
            value["properties"]["records"],
            json!({
                "type": "array",
                "description": "Row data.",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "integer", "description": "Row id."},
                        "label": {"type": "string", "description": "Display label."}
                    },
                    "required": ["id"]
                }
            })
        );
    }
}

//! Type-string normalization: Python-style annotations from docstrings
//! (`str`, `List[int]`, `Union[str, None]`, `(dict, optional)`) to
//! [`SchemaNode`] descriptors.

use crate::schema::SchemaNode;

/// Whether a raw docstring type string marks the parameter as optional.
///
/// True iff the case-insensitive, trimmed form contains `"optional"`, so
/// both `"(str, optional)"` and a bare `"Optional[str]"` qualify. Empty and
/// whitespace-only input is never optional. Never fails.
pub fn is_optional_type_string(raw: &str) -> bool {
    raw.trim().to_ascii_lowercase().contains("optional")
}

/// Splits a comma-separated type list while respecting nested brackets and
/// parens, so `Union[List[int], str]` yields two members, not three.
/// Empty members (stray commas) are dropped.
pub(crate) fn split_commas(raw: &str) -> Vec<&str> {
    let mut members = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, ch) in raw.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                members.push(raw[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    members.push(raw[start..].trim());
    members.retain(|m| !m.is_empty());
    members
}

/// Reduces a raw docstring type string to the single token `map_type`
/// should see: strips one surrounding paren pair, drops `optional` and
/// `required` markers, and takes the first bracket-aware comma member.
/// `Optional[..]`/`Union[..]` pass through whole since `map_type` unwraps
/// them itself.
pub fn clean_type_string(raw: &str) -> String {
    let mut t = raw.trim();
    if t.starts_with('(') && t.ends_with(')') && t.len() >= 2 {
        t = t[1..t.len() - 1].trim();
    }
    let lower = t.to_ascii_lowercase();
    if lower.starts_with("optional[") || lower.starts_with("union[") {
        return t.to_string();
    }
    for member in split_commas(t) {
        let marker = member.to_ascii_lowercase();
        if marker == "optional" || marker == "required" {
            continue;
        }
        return member.to_string();
    }
    String::new()
}

/// Maps a (cleaned) type token to a schema node.
///
/// Unrecognized tokens, including custom class names, degrade to a
/// shapeless object rather than failing: the input is informal prose, and
/// a usable schema beats a rejected docstring. Multi-member unions collapse
/// to their first non-null member; this intentionally drops the other
/// branches instead of emitting `anyOf`.
pub fn map_type(raw: &str) -> SchemaNode {
    let t = raw.trim();
    if t.is_empty() {
        return SchemaNode::any_object();
    }

    // Forward references arrive quoted: 'MyClass', "List[str]".
    if t.len() >= 2 {
        let bytes = t.as_bytes();
        let (first, last) = (bytes[0], bytes[t.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return map_type(&t[1..t.len() - 1]);
        }
    }

    match t.to_ascii_lowercase().as_str() {
        "str" => return SchemaNode::string(),
        "int" => return SchemaNode::integer(),
        "float" | "number" => return SchemaNode::number(),
        "bool" => return SchemaNode::boolean(),
        "none" | "nonetype" => return SchemaNode::null(),
        "list" | "tuple" => return SchemaNode::array(SchemaNode::any_object()),
        "dict" | "any" => return SchemaNode::empty_object(),
        _ => {}
    }

    let lower = t.to_ascii_lowercase();

    if let Some(inner) = generic_inner(t, &lower, "optional[") {
        return match first_non_null(inner) {
            Some(member) => map_type(member),
            None => SchemaNode::null(),
        };
    }

    if let Some(inner) = generic_inner(t, &lower, "union[") {
        return match first_non_null(inner) {
            Some(member) => map_type(member),
            None => SchemaNode::null(),
        };
    }

    if let Some(inner) = generic_inner(t, &lower, "list[") {
        let items = if inner.is_empty() {
            SchemaNode::any_object()
        } else {
            map_type(inner)
        };
        return SchemaNode::array(items);
    }

    if let Some(inner) = generic_inner(t, &lower, "tuple[") {
        let items = match split_commas(inner).into_iter().find(|m| *m != "...") {
            Some(member) => map_type(member),
            None => SchemaNode::any_object(),
        };
        return SchemaNode::array(items);
    }

    if generic_inner(t, &lower, "dict[").is_some() {
        return SchemaNode::empty_object();
    }

    // Assume a custom class or an unhandled annotation.
    SchemaNode::any_object()
}

/// Extracts the `X` of `Prefix[X]` when `lower` starts with the
/// (lowercased) prefix and the token closes its bracket.
fn generic_inner<'a>(t: &'a str, lower: &str, prefix: &str) -> Option<&'a str> {
    if lower.starts_with(prefix) && t.ends_with(']') {
        Some(t[prefix.len()..t.len() - 1].trim())
    } else {
        None
    }
}

/// First union member that is not `None`/`NoneType`, if any.
fn first_non_null(inner: &str) -> Option<&str> {
    split_commas(inner).into_iter().find(|m| {
        let lower = m.to_ascii_lowercase();
        lower != "none" && lower != "nonetype"
    })
}

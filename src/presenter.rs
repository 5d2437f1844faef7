//! JSON shape model and pretty-printer.
//!
//! A documented JSON body is described as an ordered mapping from field name to
//! [`Shape`]. The presenter first normalizes the mapping (type names become
//! [`Shape::Type`], bracket-delimited text becomes [`Shape::Placeholder`]) and
//! then prints it in the two-space layout of a pretty-printed JSON document,
//! except that type names and placeholders are written unquoted:
//!
//! ```text
//! {
//!   "id": Integer,
//!   "name": String,
//!   "quotes": [{ Quote }]
//! }
//! ```
//!
//! The printer never reinterprets structure: the nesting of the input mapping
//! is reproduced as-is.

use crate::inflect::title_case;
use serde_json::Value;

/// The scalar type names the presenter recognises, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Integer,
    Decimal,
    Datetime,
    Text,
    Boolean,
}

impl JsonType {
    pub const ALL: [JsonType; 6] = [
        JsonType::String,
        JsonType::Integer,
        JsonType::Decimal,
        JsonType::Datetime,
        JsonType::Text,
        JsonType::Boolean,
    ];

    /// Parse a type name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Title-cased display name
    pub fn name(&self) -> &'static str {
        match self {
            JsonType::String => "String",
            JsonType::Integer => "Integer",
            JsonType::Decimal => "Decimal",
            JsonType::Datetime => "Datetime",
            JsonType::Text => "Text",
            JsonType::Boolean => "Boolean",
        }
    }
}

/// A field's documented shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// One of the supported scalar type names, printed unquoted
    Type(JsonType),
    /// Pre-rendered text carrying its own structure, printed verbatim
    Placeholder(String),
    /// Any other text, printed as a quoted JSON string
    Literal(String),
    /// Nested mapping
    Object(ShapeMap),
    /// Nested sequence
    Array(Vec<Shape>),
}

impl Shape {
    /// Classify free text: type names and bracket-delimited placeholders are
    /// recognised, anything else stays a literal.
    pub fn from_text(text: &str) -> Self {
        if let Some(json_type) = JsonType::parse(text) {
            Shape::Type(json_type)
        } else if is_bracketed(text) {
            Shape::Placeholder(text.trim().to_string())
        } else {
            Shape::Literal(text.to_string())
        }
    }

    /// Build a shape from a JSON value, classifying every string leaf.
    ///
    /// Numbers, booleans and nulls have no quoting problem and are kept as
    /// verbatim placeholders.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Shape::from_text(s),
            Value::Object(map) => Shape::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Shape::from_json(v)))
                    .collect(),
            ),
            Value::Array(items) => Shape::Array(items.iter().map(Shape::from_json).collect()),
            other => Shape::Placeholder(other.to_string()),
        }
    }

    /// Re-classify literal text, recursively. Already classified nodes are
    /// left alone, which makes normalization idempotent.
    pub fn normalized(&self) -> Shape {
        match self {
            Shape::Literal(text) => Shape::from_text(text),
            Shape::Object(map) => Shape::Object(map.normalized()),
            Shape::Array(items) => Shape::Array(items.iter().map(Shape::normalized).collect()),
            other => other.clone(),
        }
    }

    /// Short type label used in attribute lists
    pub fn label(&self) -> String {
        match self {
            Shape::Type(t) => t.name().to_string(),
            Shape::Placeholder(text) | Shape::Literal(text) => text.clone(),
            Shape::Object(_) => "object".to_string(),
            Shape::Array(_) => "array".to_string(),
        }
    }
}

/// Ordered mapping from field name to shape.
///
/// Insertion order is the documented order; re-inserting a key replaces the
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeMap {
    entries: Vec<(String, Shape)>,
}

impl ShapeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object; any other value yields an empty map
    pub fn from_json(value: &Value) -> Self {
        match Shape::from_json(value) {
            Shape::Object(map) => map,
            _ => ShapeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, shape: Shape) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = shape,
            None => self.entries.push((key, shape)),
        }
    }

    /// Convenience for `insert(key, Shape::from_text(text))`
    pub fn insert_text(&mut self, key: impl Into<String>, text: &str) {
        self.insert(key, Shape::from_text(text));
    }

    pub fn get(&self, key: &str) -> Option<&Shape> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn normalized(&self) -> ShapeMap {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.normalized()))
            .collect()
    }
}

impl FromIterator<(String, Shape)> for ShapeMap {
    fn from_iter<I: IntoIterator<Item = (String, Shape)>>(iter: I) -> Self {
        let mut map = ShapeMap::new();
        for (key, shape) in iter {
            map.insert(key, shape);
        }
        map
    }
}

/// Normalize and pretty-print a shape mapping.
pub fn present(map: &ShapeMap) -> String {
    let mut out = String::new();
    write_object(&mut out, &map.normalized(), 0);
    out
}

/// Title-cased rendering of a column or attribute type name.
///
/// Used for declared column types that fall outside [`JsonType`]
/// (`float`, `date`, ...), which are documented as literals.
pub fn type_label(declared: &str) -> Shape {
    match JsonType::parse(declared) {
        Some(t) => Shape::Type(t),
        None => Shape::Literal(title_case(declared)),
    }
}

fn is_bracketed(text: &str) -> bool {
    let text = text.trim();
    let opens = text.starts_with('[') || text.starts_with('{');
    let closes = text.ends_with(']') || text.ends_with('}');
    text.len() >= 2 && opens && closes
}

fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
    match shape {
        Shape::Type(t) => out.push_str(t.name()),
        Shape::Placeholder(text) => out.push_str(text),
        Shape::Literal(text) => out.push_str(&Value::String(text.clone()).to_string()),
        Shape::Object(map) => write_object(out, map, depth),
        Shape::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                indent(out, depth + 1);
                write_shape(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            indent(out, depth);
            out.push(']');
        }
    }
}

fn write_object(out: &mut String, map: &ShapeMap, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (i, (key, shape)) in map.entries.iter().enumerate() {
        indent(out, depth + 1);
        out.push_str(&Value::String(key.clone()).to_string());
        out.push_str(": ");
        write_shape(out, shape, depth + 1);
        if i + 1 < map.entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    indent(out, depth);
    out.push('}');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_type_names_are_unquoted_and_capitalized() {
        let mut map = ShapeMap::new();
        map.insert_text("age", "integer");
        map.insert_text("born_at", "DATETIME");

        let text = present(&map);
        assert_eq!(text, "{\n  \"age\": Integer,\n  \"born_at\": Datetime\n}");
    }

    #[test]
    fn test_literal_text_stays_quoted() {
        let mut map = ShapeMap::new();
        map.insert_text("price", "Float");
        map.insert_text("note", "say \"hi\"");

        let text = present(&map);
        assert!(text.contains("\"price\": \"Float\""));
        assert!(text.contains("\"note\": \"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_placeholders_are_unquoted() {
        let mut map = ShapeMap::new();
        map.insert_text("quotes", "[{ Quote }]");
        map.insert_text("work", "{ Work }");

        let text = present(&map);
        assert_eq!(text, "{\n  \"quotes\": [{ Quote }],\n  \"work\": { Work }\n}");
    }

    #[test]
    fn test_nesting_is_preserved() {
        let value = json!({
            "character": {
                "name": "string",
                "tags": [{ "label": "text" }],
                "empty": {}
            },
            "ids": []
        });
        let text = present(&ShapeMap::from_json(&value));
        let expected = "{\n  \"character\": {\n    \"name\": String,\n    \"tags\": [\n      {\n        \"label\": Text\n      }\n    ],\n    \"empty\": {}\n  },\n  \"ids\": []\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_map() {
        assert_eq!(present(&ShapeMap::new()), "{}");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let value = json!({
            "id": "INTEGER",
            "name": "string",
            "quotes": "[{ Quote }]",
            "kind": "unknown",
            "count": 3,
            "nested": { "flag": "boolean", "list": ["decimal", "x"] }
        });
        let map = ShapeMap::from_json(&value);
        let once = map.normalized();
        let twice = once.normalized();

        assert_eq!(once, twice);
        assert_eq!(present(&once), present(&map));
        assert_eq!(present(&twice), present(&once));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = ShapeMap::new();
        map.insert_text("a", "string");
        map.insert_text("b", "string");
        map.insert_text("a", "integer");

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Shape::Type(JsonType::Integer)));
    }

    #[test]
    fn test_type_label() {
        assert_eq!(type_label("integer"), Shape::Type(JsonType::Integer));
        assert_eq!(type_label("float"), Shape::Literal("Float".to_string()));
    }

    #[test]
    fn test_non_string_scalars_are_verbatim() {
        let map = ShapeMap::from_json(&json!({ "limit": 25, "active": true }));
        assert_eq!(present(&map), "{\n  \"limit\": 25,\n  \"active\": true\n}");
    }
}

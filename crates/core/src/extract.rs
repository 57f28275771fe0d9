//! Color extraction: flattens a style tree into an ordered list of
//! addressable color entries.
//!
//! A recursive walker visits object keys in document order and, for each
//! key, asks [`Strategy::select`] which shape it is looking at. Each
//! strategy is a small function from `(path, value)` to zero or more
//! entries; the walker itself knows nothing about shapes.

use crate::config::ExtractionRules;
use crate::document::ThemeFamily;
use crate::error::EditorError;
use crate::parsed::is_valid_hex;
use crate::path::ColorPath;
use serde::Serialize;
use serde_json::{Map, Value};

/// One color found in a style tree.
///
/// Paths are structural addresses, not stable ids: any edit that changes
/// the tree's shape invalidates entries extracted before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorEntry {
    pub path: ColorPath,
    pub display_key: String,
    /// The hex string as it appears in the document.
    pub value: String,
}

impl ColorEntry {
    fn new(path: ColorPath, value: &str) -> Self {
        Self {
            display_key: path.display_key(),
            path,
            value: value.to_owned(),
        }
    }

    /// The collision-free encoded form of [`ColorEntry::path`].
    pub fn path_key(&self) -> String {
        self.path.encode()
    }
}

/// How the value under one key is flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'r> {
    /// A string; emitted if it is a hex color.
    Scalar,
    /// A flat array of colors, emitted as `key[i]`.
    ColorArray,
    /// A map of named records, emitted as `key.name.field`.
    RecordMap(&'r [String]),
    /// An array of records, emitted as `key[i].field`.
    RecordArray(&'r [String]),
    /// A plain object, walked recursively.
    Nested,
    /// Anything else, including arrays with no rule.
    Ignore,
}

impl<'r> Strategy<'r> {
    /// Picks the strategy for `value` found under `key`.
    pub fn select(key: &str, value: &Value, rules: &'r ExtractionRules) -> Self {
        match value {
            Value::String(_) => Strategy::Scalar,
            Value::Array(_) if rules.is_color_array(key) => Strategy::ColorArray,
            Value::Array(_) => rules
                .record_array_fields(key)
                .map_or(Strategy::Ignore, Strategy::RecordArray),
            Value::Object(_) => rules
                .record_map_fields(key)
                .map_or(Strategy::Nested, Strategy::RecordMap),
            _ => Strategy::Ignore,
        }
    }
}

/// Extracts every color in a style tree, in document order.
///
/// Non-object roots yield no entries.
pub fn extract_colors(style: &Value, rules: &ExtractionRules) -> Vec<ColorEntry> {
    let mut out = Vec::new();
    if let Value::Object(map) = style {
        walk(&ColorPath::new(), map, rules, &mut out);
    }
    out
}

/// Extracts the colors of one theme in a family.
pub fn extract_theme_colors(
    doc: &ThemeFamily,
    theme_index: usize,
    rules: &ExtractionRules,
) -> Result<Vec<ColorEntry>, EditorError> {
    Ok(extract_colors(&doc.theme(theme_index)?.style, rules))
}

fn walk(
    base: &ColorPath,
    map: &Map<String, Value>,
    rules: &ExtractionRules,
    out: &mut Vec<ColorEntry>,
) {
    for (key, value) in map {
        let path = base.key(key);
        match Strategy::select(key, value, rules) {
            Strategy::Scalar => scalar(path, value, out),
            Strategy::ColorArray => color_array(&path, value, out),
            Strategy::RecordMap(fields) => record_map(&path, value, fields, out),
            Strategy::RecordArray(fields) => record_array(&path, value, fields, out),
            Strategy::Nested => {
                if let Value::Object(child) = value {
                    walk(&path, child, rules, out);
                }
            }
            Strategy::Ignore => {}
        }
    }
}

fn hex_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| is_valid_hex(s))
}

fn scalar(path: ColorPath, value: &Value, out: &mut Vec<ColorEntry>) {
    if let Some(hex) = hex_str(value) {
        out.push(ColorEntry::new(path, hex));
    }
}

fn color_array(path: &ColorPath, value: &Value, out: &mut Vec<ColorEntry>) {
    let Some(items) = value.as_array() else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        scalar(path.index(i), item, out);
    }
}

/// Emits the listed color fields of one record, in the record's own key order.
fn record_fields(path: &ColorPath, record: &Value, fields: &[String], out: &mut Vec<ColorEntry>) {
    let Some(record) = record.as_object() else {
        return;
    };
    for (field, value) in record {
        if fields.iter().any(|f| f == field) {
            scalar(path.key(field), value, out);
        }
    }
}

fn record_map(path: &ColorPath, value: &Value, fields: &[String], out: &mut Vec<ColorEntry>) {
    let Some(records) = value.as_object() else {
        return;
    };
    for (name, record) in records {
        record_fields(&path.key(name), record, fields, out);
    }
}

fn record_array(path: &ColorPath, value: &Value, fields: &[String], out: &mut Vec<ColorEntry>) {
    let Some(records) = value.as_array() else {
        return;
    };
    for (i, record) in records.iter().enumerate() {
        record_fields(&path.index(i), record, fields, out);
    }
}

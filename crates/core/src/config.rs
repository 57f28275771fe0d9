//! Extraction rules: which style keys hold color lists and color-bearing
//! records.
//!
//! Rules deserialize from JSON with every field optional; a missing field
//! keeps its default. The defaults describe the common editor theme schema
//! (`accents`, `syntax`, `players`).

use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-key shape hints for the color extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    /// Keys whose value is a flat array of colors.
    pub color_arrays: Vec<String>,
    /// Keys whose value maps record names to records; value is the list of
    /// color sub-fields inside each record.
    pub record_maps: BTreeMap<String, Vec<String>>,
    /// Keys whose value is an array of records; value is the list of color
    /// sub-fields inside each record.
    pub record_arrays: BTreeMap<String, Vec<String>>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            color_arrays: vec!["accents".to_owned()],
            record_maps: BTreeMap::from([(
                "syntax".to_owned(),
                vec!["color".to_owned(), "background_color".to_owned()],
            )]),
            record_arrays: BTreeMap::from([(
                "players".to_owned(),
                vec![
                    "cursor".to_owned(),
                    "background".to_owned(),
                    "selection".to_owned(),
                ],
            )]),
        }
    }
}

impl ExtractionRules {
    /// Reads rules from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, EditorError> {
        serde_json::from_str(text).map_err(|e| EditorError::InvalidDocument(e.to_string()))
    }

    pub fn is_color_array(&self, key: &str) -> bool {
        self.color_arrays.iter().any(|k| k == key)
    }

    pub fn record_map_fields(&self, key: &str) -> Option<&[String]> {
        self.record_maps.get(key).map(Vec::as_slice)
    }

    pub fn record_array_fields(&self, key: &str) -> Option<&[String]> {
        self.record_arrays.get(key).map(Vec::as_slice)
    }
}

//! The theme document: a family of named themes, each with a free-form
//! style tree.
//!
//! The outer shape is typed; the `style` tree is kept as a
//! `serde_json::Value` with insertion order preserved, because its key
//! order drives the order colors are listed in.

use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a theme is meant for light or dark surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

/// One theme variant within a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub appearance: Appearance,
    pub style: Value,
}

/// A theme family document: `{ name, author, themes: [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFamily {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    pub author: String,
    pub themes: Vec<Theme>,
}

impl ThemeFamily {
    /// Reads a document from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, EditorError> {
        serde_json::from_str(text).map_err(|e| EditorError::InvalidDocument(e.to_string()))
    }

    /// Writes the document as pretty-printed JSON, keys in document order.
    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        serde_json::to_string_pretty(self).map_err(|e| EditorError::InvalidDocument(e.to_string()))
    }

    /// Returns the theme at `index`.
    pub fn theme(&self, index: usize) -> Result<&Theme, EditorError> {
        self.themes
            .get(index)
            .ok_or(EditorError::ThemeIndexOutOfRange {
                index,
                len: self.themes.len(),
            })
    }

    pub(crate) fn theme_mut(&mut self, index: usize) -> Result<&mut Theme, EditorError> {
        let len = self.themes.len();
        self.themes
            .get_mut(index)
            .ok_or(EditorError::ThemeIndexOutOfRange { index, len })
    }
}

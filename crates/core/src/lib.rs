#![deny(unsafe_code)]
//! Core of the theme-lab editor.
//!
//! Provides the color model (`Color`, hex/RGB/HSL/OKLCH conversion with fixed
//! rounding), gamut test/clamp/map, `ParsedColor` bundles, color extraction
//! from theme style trees (`ColorEntry`, `ColorPath`), single-value document
//! edits, the `ChangeTracker` undo/redo engine, and `NumericField` stepping
//! rules for numeric inputs.

pub mod color;
pub mod config;
pub mod document;
pub mod edit;
pub mod error;
pub mod extract;
pub mod gamut;
pub mod history;
pub mod numeric;
pub mod parsed;
pub mod path;
pub mod precision;

pub use color::{parse, to_hex, to_hsl, to_oklch, to_rgb, Color, ColorSpace};
pub use config::ExtractionRules;
pub use document::{Appearance, Theme, ThemeFamily};
pub use edit::{try_update, update};
pub use error::EditorError;
pub use extract::{extract_colors, extract_theme_colors, ColorEntry};
pub use gamut::{clamp_to_gamut, gamut_map, is_in_gamut};
pub use history::{ChangeSnapshot, ChangeTracker, EditState};
pub use numeric::{Modifiers, NumericField, Quantity};
pub use parsed::{normalize_hex, parse_full, ParsedColor};
pub use path::{ColorPath, PathSegment};

//! Applying one color edit to a document.
//!
//! Edits are clone-on-write at whole-document granularity: the input
//! document is never touched and the returned document differs from it in
//! exactly one value. An address that no longer resolves leaves the
//! document unchanged; nothing is ever partially applied.

use crate::document::ThemeFamily;
use crate::error::EditorError;
use crate::parsed::normalize_hex;
use crate::path::{ColorPath, PathSegment};
use serde_json::Value;
use tracing::debug;

fn stale(path: &ColorPath) -> EditorError {
    EditorError::StalePath(path.encode())
}

fn step<'v>(node: &'v Value, segment: &PathSegment) -> Option<&'v Value> {
    match (segment, node) {
        (PathSegment::Key(k), Value::Object(map)) => map.get(k),
        (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
        _ => None,
    }
}

fn step_mut<'v>(node: &'v mut Value, segment: &PathSegment) -> Option<&'v mut Value> {
    match (segment, node) {
        (PathSegment::Key(k), Value::Object(map)) => map.get_mut(k),
        (PathSegment::Index(i), Value::Array(items)) => items.get_mut(*i),
        _ => None,
    }
}

/// Reads the value at `path` in theme `theme_index`.
pub fn get<'d>(doc: &'d ThemeFamily, theme_index: usize, path: &ColorPath) -> Option<&'d Value> {
    let mut node = &doc.themes.get(theme_index)?.style;
    for segment in path.segments() {
        node = step(node, segment)?;
    }
    Some(node)
}

/// Returns a copy of `doc` with the value at `path` set to the normalized
/// form of `new_hex`.
///
/// Intermediate segments must resolve. A final field segment is assigned
/// on its object (created if absent); a final index segment must name an
/// existing array element.
pub fn try_update(
    doc: &ThemeFamily,
    theme_index: usize,
    path: &ColorPath,
    new_hex: &str,
) -> Result<ThemeFamily, EditorError> {
    let hex = normalize_hex(new_hex)
        .ok_or_else(|| EditorError::InvalidColor(format!("{new_hex:?}")))?;
    let (last, parents) = path
        .segments()
        .split_last()
        .ok_or_else(|| EditorError::StalePath("empty path".to_owned()))?;

    let mut next = doc.clone();
    let mut node = &mut next.theme_mut(theme_index)?.style;
    for segment in parents {
        node = step_mut(node, segment).ok_or_else(|| stale(path))?;
    }

    match (last, node) {
        (PathSegment::Key(k), Value::Object(map)) => {
            map.insert(k.clone(), Value::String(hex));
        }
        (PathSegment::Index(i), Value::Array(items)) if *i < items.len() => {
            items[*i] = Value::String(hex);
        }
        _ => return Err(stale(path)),
    }
    Ok(next)
}

/// Like [`try_update`], but any failure returns `doc` unchanged.
///
/// Callers that hold entries from an older extraction must re-extract after
/// a structural change; a stale address is a silent no-op here.
pub fn update(doc: &ThemeFamily, theme_index: usize, path: &ColorPath, new_hex: &str) -> ThemeFamily {
    match try_update(doc, theme_index, path, new_hex) {
        Ok(next) => next,
        Err(e) => {
            debug!(error = %e, path = %path.encode(), theme_index, "color edit not applied");
            doc.clone()
        }
    }
}

//! Structural addresses of values inside a style tree.
//!
//! A [`ColorPath`] is an ordered list of [`PathSegment`]s. Field names and
//! array indices are different variants, so a field literally named `"0"`
//! never aliases index 0.
//!
//! Two string forms exist. [`ColorPath::display_key`] is the label shown to
//! people (`players[0].background`) and is ambiguous for keys that contain
//! dots. [`ColorPath::encode`] is the address form: segments joined by `/`,
//! indices written `[n]`, and `~`, `/`, `[` inside keys escaped as `~0`,
//! `~1`, `~2`. It round-trips through [`ColorPath::decode`] for any key.

use crate::error::EditorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One step of a path: an object field or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// An ordered list of segments from a style root to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColorPath(Vec<PathSegment>);

impl ColorPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with a field segment appended.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_owned()));
        Self(segments)
    }

    /// Returns a new path with an index segment appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Human-readable label: keys joined by `.`, indices as `[n]`.
    pub fn display_key(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            match segment {
                PathSegment::Key(k) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(k);
                }
                PathSegment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Collision-free address string.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(k) => escape_key(k),
                PathSegment::Index(i) => format!("[{i}]"),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Parses the form produced by [`ColorPath::encode`]. The empty string is
    /// the empty path.
    pub fn decode(encoded: &str) -> Result<Self, EditorError> {
        if encoded.is_empty() {
            return Ok(Self::new());
        }
        encoded
            .split('/')
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            '[' => out.push_str("~2"),
            other => out.push(other),
        }
    }
    out
}

fn decode_segment(part: &str) -> Result<PathSegment, EditorError> {
    if let Some(inner) = part.strip_prefix('[') {
        let digits = inner
            .strip_suffix(']')
            .ok_or_else(|| EditorError::InvalidPath(format!("unterminated index {part:?}")))?;
        return digits
            .parse::<usize>()
            .map(PathSegment::Index)
            .map_err(|_| EditorError::InvalidPath(format!("bad index {part:?}")));
    }

    let mut key = String::with_capacity(part.len());
    let mut chars = part.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            key.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => key.push('~'),
            Some('1') => key.push('/'),
            Some('2') => key.push('['),
            _ => {
                return Err(EditorError::InvalidPath(format!(
                    "bad escape in {part:?}"
                )))
            }
        }
    }
    Ok(PathSegment::Key(key))
}

impl fmt::Display for ColorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_key())
    }
}

impl Serialize for ColorPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for ColorPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ColorPath::decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players_cursor() -> ColorPath {
        ColorPath::new().key("players").index(0).key("cursor")
    }

    #[test]
    fn display_key_joins_keys_with_dots_and_brackets_indices() {
        assert_eq!(players_cursor().display_key(), "players[0].cursor");
        assert_eq!(
            ColorPath::new().key("syntax").key("keyword").key("color").display_key(),
            "syntax.keyword.color"
        );
        assert_eq!(ColorPath::new().key("accents").index(2).to_string(), "accents[2]");
    }

    #[test]
    fn encode_uses_slashes_and_bracketed_indices() {
        assert_eq!(players_cursor().encode(), "players/[0]/cursor");
    }

    #[test]
    fn numeric_key_does_not_alias_index() {
        let by_key = ColorPath::new().key("list").key("0");
        let by_index = ColorPath::new().key("list").index(0);
        assert_ne!(by_key.encode(), by_index.encode());
        assert_eq!(ColorPath::decode(&by_key.encode()).unwrap(), by_key);
        assert_eq!(ColorPath::decode(&by_index.encode()).unwrap(), by_index);
    }

    #[test]
    fn keys_with_dots_and_specials_round_trip() {
        let path = ColorPath::new()
            .key("editor.background")
            .key("a/b")
            .key("~tilde")
            .key("[0]");
        let encoded = path.encode();
        assert_eq!(encoded, "editor.background/a~1b/~0tilde/~20]");
        assert_eq!(ColorPath::decode(&encoded).unwrap(), path);
    }

    #[test]
    fn decode_empty_is_empty_path() {
        assert!(ColorPath::decode("").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_malformed_segments() {
        assert!(matches!(
            ColorPath::decode("players/[0"),
            Err(EditorError::InvalidPath(_))
        ));
        assert!(ColorPath::decode("players/[x]").is_err());
        assert!(ColorPath::decode("players/[-1]").is_err());
        assert!(ColorPath::decode("bad~9escape").is_err());
        assert!(ColorPath::decode("trailing~").is_err());
    }

    #[test]
    fn path_serializes_as_encoded_string() {
        let json = serde_json::to_string(&players_cursor()).unwrap();
        assert_eq!(json, "\"players/[0]/cursor\"");
        let back: ColorPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, players_cursor());
    }
}

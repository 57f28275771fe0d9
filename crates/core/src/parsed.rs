//! Fully materialized color bundles for display.
//!
//! A [`ParsedColor`] is built once per hex string and holds every
//! representation an editor panel shows side by side. It is recomputed, not
//! mutated, whenever the underlying hex changes.

use crate::color::{
    parse, to_hex, to_hsl, to_oklch, to_rgb, HslComponents, OklchComponents, RgbComponents,
};
use crate::gamut::is_in_gamut;
use serde::Serialize;

/// Every representation of one hex color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedColor {
    /// Normalized hex (`#RRGGBB` or `#RRGGBBAA`, uppercase).
    pub hex: String,
    pub rgb: RgbComponents,
    pub hsl: HslComponents,
    pub oklch: OklchComponents,
    /// Alpha rounded to two decimals.
    pub alpha: f64,
    pub is_in_gamut: bool,
}

/// Parses a hex string into a [`ParsedColor`], or `None` if it is not a color.
pub fn parse_full(hex: &str) -> Option<ParsedColor> {
    let color = parse(hex).ok()?;
    Some(ParsedColor {
        hex: to_hex(color, false),
        rgb: to_rgb(color),
        hsl: to_hsl(color),
        oklch: to_oklch(color),
        alpha: color.rounded_alpha(),
        is_in_gamut: is_in_gamut(color),
    })
}

/// True if `hex` parses as a 3, 4, 6 or 8 digit hex color.
pub fn is_valid_hex(hex: &str) -> bool {
    parse(hex).is_ok()
}

/// The canonical form of a hex color: uppercase, short forms expanded,
/// opaque alpha dropped.
pub fn normalize_hex(hex: &str) -> Option<String> {
    parse(hex).ok().map(|c| to_hex(c, false))
}

/// The alpha encoded in a hex color, rounded to two decimals. Colors without
/// an alpha digit report `1.0`.
pub fn extract_alpha_from_hex(hex: &str) -> Option<f64> {
    parse(hex).ok().map(|c| c.rounded_alpha())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_builds_every_representation() {
        let p = parse_full("#ff0000").unwrap();
        assert_eq!(p.hex, "#FF0000");
        assert_eq!(p.rgb, RgbComponents { r: 255, g: 0, b: 0 });
        assert_eq!(p.hsl, HslComponents { h: 0, s: 100, l: 50 });
        assert!((p.oklch.l - 0.628).abs() <= 0.001);
        assert_eq!(p.alpha, 1.0);
        assert!(p.is_in_gamut);
    }

    #[test]
    fn parse_full_rejects_invalid_input() {
        assert!(parse_full("red").is_none());
        assert!(parse_full("#12345").is_none());
        assert!(parse_full("").is_none());
    }

    #[test]
    fn parse_full_matches_helper_functions() {
        for hex in ["#abc", "#abcd", "#A1B2C3", "#a1b2c380", "#000000FF", "#fff0"] {
            let p = parse_full(hex).unwrap();
            assert_eq!(Some(p.hex.clone()), normalize_hex(hex), "{hex}");
            assert_eq!(Some(p.alpha), extract_alpha_from_hex(hex), "{hex}");
        }
    }

    #[test]
    fn half_alpha_parses_near_half() {
        let alpha = extract_alpha_from_hex("#11223380").unwrap();
        assert!((alpha - 0.5).abs() <= 0.01, "alpha: {alpha}");
    }

    #[test]
    fn normalize_hex_expands_and_uppercases() {
        assert_eq!(normalize_hex("#abc").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_hex("#000000ff").as_deref(), Some("#000000"));
        assert_eq!(normalize_hex("#fff0").as_deref(), Some("#FFFFFF00"));
        assert_eq!(normalize_hex("fff"), None);
    }

    #[test]
    fn opaque_alpha_never_appends_suffix() {
        assert_eq!(parse_full("#123456").unwrap().hex.len(), 7);
        assert_eq!(parse_full("#123456FF").unwrap().hex.len(), 7);
    }

    #[test]
    fn is_valid_hex_accepts_only_supported_lengths() {
        assert!(is_valid_hex("#fff"));
        assert!(is_valid_hex("#ffff"));
        assert!(is_valid_hex("#ffffff"));
        assert!(is_valid_hex("#ffffffff"));
        assert!(!is_valid_hex("#fffff"));
        assert!(!is_valid_hex("ffffff"));
    }

    #[test]
    fn parsed_color_serializes_to_json() {
        let json = serde_json::to_value(parse_full("#00FF00").unwrap()).unwrap();
        assert_eq!(json["hex"], "#00FF00");
        assert_eq!(json["rgb"]["g"], 255);
        assert_eq!(json["is_in_gamut"], true);
    }
}

//! Color types and conversion functions for the theme editor.
//!
//! Two layers live here. The low-level layer is a set of plain color types
//! (`Srgb`, `LinearRgb`, `OkLab`, `OkLch`, `Hsl`) with pure conversion
//! functions between them, using `f64` throughout. On top of it, [`Color`]
//! tags coordinates with the space the user expressed them in and carries
//! an alpha; the `to_*` functions produce rounded, user-facing component
//! records and [`to_hex`] produces the single canonical persisted form.
//!
//! Constructors never clamp. Clamping happens when a color is rounded for
//! output, so out-of-range intent survives intermediate construction.

use crate::error::EditorError;
use crate::gamut::gamut_map;
use crate::precision::{
    clamp_unit, round_alpha, round_clamped, round_hue, round_to, wrap_hue, HSL_DECIMALS,
    OKLCH_HUE_DECIMALS, OKLCH_LC_DECIMALS, RGB_DECIMALS,
};
use serde::{Deserialize, Serialize};

/// Chroma below which a color is treated as achromatic and given hue 0.
pub const ACHROMATIC_CHROMA: f64 = 1e-6;

/// sRGB color with components nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh (cylindrical form of OKLab). Hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

/// HSL with hue in degrees and unit saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Srgb {
    /// Returns the color with every channel clamped into [0, 1].
    pub fn clamped(self) -> Srgb {
        Srgb {
            r: clamp_unit(self.r),
            g: clamp_unit(self.g),
            b: clamp_unit(self.b),
        }
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
///
/// Odd-symmetric so that out-of-range negatives stay negative.
fn srgb_component_to_linear(c: f64) -> f64 {
    let a = c.abs();
    let lin = if a <= 0.04045 {
        a / 12.92
    } else {
        ((a + 0.055) / 1.055).powf(2.4)
    };
    lin.copysign(c)
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    let a = c.abs();
    let s = if a <= 0.0031308 {
        a * 12.92
    } else {
        1.055 * a.powf(1.0 / 2.4) - 0.055
    };
    s.copysign(c)
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse OKLab matrix transform.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

/// Converts OKLab to OKLCh (cylindrical form).
///
/// Below [`ACHROMATIC_CHROMA`] the hue is set to 0.0: grays carry matrix
/// noise in `a`/`b` that would otherwise produce an arbitrary hue.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let ch = (c.a * c.a + c.b * c.b).sqrt();
    let h = if ch < ACHROMATIC_CHROMA {
        0.0
    } else {
        wrap_hue(c.b.atan2(c.a).to_degrees())
    };
    OkLch { l: c.l, c: ch, h }
}

/// Converts OKLCh to OKLab.
pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let h_rad = c.h.to_radians();
    OkLab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

/// sRGB to OKLCh via sRGB -> linear -> OKLab -> OKLCh.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(linear_to_oklab(srgb_to_linear(c)))
}

/// OKLCh to sRGB via OKLCh -> OKLab -> linear -> sRGB.
///
/// The result is not clamped and may fall outside [0, 1] for colors the
/// sRGB gamut cannot represent.
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    linear_to_srgb(oklab_to_linear(oklch_to_oklab(c)))
}

/// Converts sRGB to HSL. Achromatic colors get hue 0 and saturation 0.
pub fn srgb_to_hsl(c: Srgb) -> Hsl {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d < 1e-12 {
        return Hsl { h: 0.0, s: 0.0, l };
    }
    let s = d / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == c.r {
        ((c.g - c.b) / d).rem_euclid(6.0)
    } else if max == c.g {
        (c.b - c.r) / d + 2.0
    } else {
        (c.r - c.g) / d + 4.0
    };
    Hsl { h: h * 60.0, s, l }
}

/// Converts HSL to sRGB.
pub fn hsl_to_srgb(c: Hsl) -> Srgb {
    let chroma = (1.0 - (2.0 * c.l - 1.0).abs()) * c.s;
    let hp = wrap_hue(c.h) / 60.0;
    let x = chroma * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = c.l - chroma / 2.0;
    Srgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

/// The space a [`Color`]'s coordinates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Rgb,
    Hsl,
    Oklch,
}

/// A color tagged with the space it was authored in, plus alpha.
///
/// Coordinates are stored as given: RGB as unit sRGB floats, HSL as
/// (degrees, unit, unit), OKLCH as (unit L, chroma, degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    space: ColorSpace,
    coords: [f64; 3],
    alpha: f64,
}

impl Color {
    /// RGB channels on the 0–255 scale. Values are not clamped.
    pub fn from_rgb(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            space: ColorSpace::Rgb,
            coords: [r / 255.0, g / 255.0, b / 255.0],
            alpha,
        }
    }

    /// Hue in degrees, saturation and lightness in percent. Values are not clamped.
    pub fn from_hsl(h: f64, s: f64, l: f64, alpha: f64) -> Self {
        Self {
            space: ColorSpace::Hsl,
            coords: [h, s / 100.0, l / 100.0],
            alpha,
        }
    }

    /// Unit lightness, chroma and hue in degrees. Values are not clamped;
    /// chroma in particular may exceed anything sRGB can show.
    pub fn from_oklch(l: f64, c: f64, h: f64, alpha: f64) -> Self {
        Self {
            space: ColorSpace::Oklch,
            coords: [l, c, h],
            alpha,
        }
    }

    /// Wraps an sRGB value as an RGB-space color.
    pub fn from_srgb(c: Srgb, alpha: f64) -> Self {
        Self {
            space: ColorSpace::Rgb,
            coords: [c.r, c.g, c.b],
            alpha,
        }
    }

    /// Wraps an OKLCh value as an OKLCH-space color.
    pub fn from_lch(c: OkLch, alpha: f64) -> Self {
        Self::from_oklch(c.l, c.c, c.h, alpha)
    }

    pub fn space(self) -> ColorSpace {
        self.space
    }

    /// The unrounded alpha as constructed.
    pub fn alpha(self) -> f64 {
        self.alpha
    }

    /// Alpha rounded to two decimals within [0, 1].
    pub fn rounded_alpha(self) -> f64 {
        round_alpha(self.alpha)
    }

    /// Returns a copy with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Unclamped sRGB coordinates.
    pub fn to_srgb(self) -> Srgb {
        let [a, b, c] = self.coords;
        match self.space {
            ColorSpace::Rgb => Srgb { r: a, g: b, b: c },
            ColorSpace::Hsl => hsl_to_srgb(Hsl { h: a, s: b, l: c }),
            ColorSpace::Oklch => oklch_to_srgb(OkLch { l: a, c: b, h: c }),
        }
    }

    /// Unclamped linear-light RGB coordinates.
    pub fn to_linear(self) -> LinearRgb {
        let [a, b, c] = self.coords;
        match self.space {
            ColorSpace::Oklch => oklab_to_linear(oklch_to_oklab(OkLch { l: a, c: b, h: c })),
            _ => srgb_to_linear(self.to_srgb()),
        }
    }

    /// Unrounded OKLCh coordinates. OKLCH-space colors return their own
    /// coordinates untouched.
    pub fn to_lch(self) -> OkLch {
        let [a, b, c] = self.coords;
        match self.space {
            ColorSpace::Oklch => OkLch { l: a, c: b, h: c },
            _ => srgb_to_oklch(self.to_srgb()),
        }
    }

    /// Unrounded HSL coordinates. Colors from other spaces are clamped to
    /// the sRGB cube first, since HSL has no meaning outside it.
    pub fn to_hsl_raw(self) -> Hsl {
        let [a, b, c] = self.coords;
        match self.space {
            ColorSpace::Hsl => Hsl { h: a, s: b, l: c },
            _ => srgb_to_hsl(self.to_srgb().clamped()),
        }
    }
}

/// Rounded RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbComponents {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Rounded HSL: hue in whole degrees, saturation and lightness in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HslComponents {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Rounded OKLCH: lightness and chroma to 3 decimals, hue to 1 decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OklchComponents {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

fn to_byte(unit: f64) -> u8 {
    round_clamped(unit * 255.0, RGB_DECIMALS, 0.0, 255.0) as u8
}

/// RGB channels rounded to the nearest integer and clamped to 0–255.
pub fn to_rgb(color: Color) -> RgbComponents {
    let c = color.to_srgb();
    RgbComponents {
        r: to_byte(c.r),
        g: to_byte(c.g),
        b: to_byte(c.b),
    }
}

/// HSL with hue wrapped into [0, 360) and saturation/lightness clamped to 0–100.
pub fn to_hsl(color: Color) -> HslComponents {
    let c = color.to_hsl_raw();
    HslComponents {
        h: round_hue(c.h, HSL_DECIMALS) as u16,
        s: round_clamped(c.s * 100.0, HSL_DECIMALS, 0.0, 100.0) as u8,
        l: round_clamped(c.l * 100.0, HSL_DECIMALS, 0.0, 100.0) as u8,
    }
}

/// OKLCH with lightness clamped to [0, 1], chroma clamped at 0 only, hue
/// wrapped into [0, 360).
pub fn to_oklch(color: Color) -> OklchComponents {
    let c = color.to_lch();
    OklchComponents {
        l: round_clamped(c.l, OKLCH_LC_DECIMALS, 0.0, 1.0),
        c: round_to(c.c, OKLCH_LC_DECIMALS).max(0.0),
        h: round_hue(c.h, OKLCH_HUE_DECIMALS),
    }
}

/// Encodes a color as an uppercase hex string.
///
/// Produces `#RRGGBB` when alpha rounds to 1 and `include_alpha_if_opaque`
/// is false, otherwise `#RRGGBBAA` with the alpha byte `round(alpha * 255)`.
/// OKLCH colors are gamut-mapped first, so the output is always valid sRGB.
pub fn to_hex(color: Color, include_alpha_if_opaque: bool) -> String {
    let color = match color.space() {
        ColorSpace::Oklch => gamut_map(color),
        _ => color,
    };
    let RgbComponents { r, g, b } = to_rgb(color);
    if color.rounded_alpha() >= 1.0 && !include_alpha_if_opaque {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        let a = to_byte(clamp_unit(color.alpha()));
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// Parses `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (case insensitive).
///
/// Short forms are expanded by doubling each digit. The leading `#` is
/// required.
pub fn parse(hex: &str) -> Result<Color, EditorError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| EditorError::InvalidColor(format!("{hex:?}: missing leading '#'")))?;
    let nibbles: Vec<u8> = digits
        .chars()
        .map(|ch| ch.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(|| EditorError::InvalidColor(format!("{hex:?}: non-hex character")))?;

    let bytes: Vec<u8> = match nibbles.len() {
        3 | 4 => nibbles.iter().map(|&n| (n << 4) | n).collect(),
        6 | 8 => nibbles.chunks(2).map(|p| (p[0] << 4) | p[1]).collect(),
        n => {
            return Err(EditorError::InvalidColor(format!(
                "{hex:?}: expected 3, 4, 6 or 8 hex digits, got {n}"
            )))
        }
    };

    let alpha = bytes.get(3).map_or(1.0, |&a| a as f64 / 255.0);
    Ok(Color::from_rgb(
        bytes[0] as f64,
        bytes[1] as f64,
        bytes[2] as f64,
        alpha,
    ))
}

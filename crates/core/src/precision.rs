//! Rounding and wrapping rules shared by the color model and numeric inputs.
//!
//! All rounding is half-away-from-zero at a fixed decimal count, computed by
//! scaling, rounding and dividing. A scaled value within a few ULPs of a
//! half is treated as exactly half, so binary representation error
//! (`1.005 * 100 = 100.49999999999999`) cannot push a value below the
//! boundary while `0.4999996` still rounds down.

/// Decimal places kept for RGB channels.
pub const RGB_DECIMALS: u32 = 0;
/// Decimal places kept for HSL hue, saturation and lightness.
pub const HSL_DECIMALS: u32 = 0;
/// Decimal places kept for OKLCH lightness (unit scale) and chroma.
pub const OKLCH_LC_DECIMALS: u32 = 3;
/// Decimal places kept for OKLCH hue.
pub const OKLCH_HUE_DECIMALS: u32 = 1;
/// Decimal places kept for alpha.
pub const ALPHA_DECIMALS: u32 = 2;

/// ULPs of the scaled value that still count as sitting on a half.
const HALF_ULPS: f64 = 4.0;

/// Rounds `value` to `decimals` places, half away from zero.
///
/// Non-finite input rounds to `0.0`; negative zero is normalized to `0.0`.
/// Input too large to scale is returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value + 0.0;
    }
    let magnitude = scaled.abs();
    let tolerance = f64::EPSILON * magnitude * HALF_ULPS;
    let rounded = if (magnitude.fract() - 0.5).abs() <= tolerance {
        magnitude.trunc() + 1.0
    } else {
        magnitude.round()
    };
    (rounded.copysign(scaled) / factor) + 0.0
}

/// Wraps a hue in degrees into `[0, 360)`. Negative input wraps upward,
/// so `-10` becomes `350` and `-370` becomes `350`.
pub fn wrap_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid of a tiny negative can land exactly on 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Rounds a hue to `decimals` places and wraps it into `[0, 360)`.
///
/// Periodic in 360: `round_hue(x, d) == round_hue(x + 360.0, d)`.
pub fn round_hue(hue: f64, decimals: u32) -> f64 {
    wrap_hue(round_to(wrap_hue(hue), decimals))
}

/// Rounds to `decimals` places, then clamps into `[min, max]`.
pub fn round_clamped(value: f64, decimals: u32, min: f64, max: f64) -> f64 {
    round_to(value, decimals).clamp(min, max)
}

/// Rounds an alpha value to two decimals within `[0, 1]`.
pub fn round_alpha(alpha: f64) -> f64 {
    round_clamped(alpha, ALPHA_DECIMALS, 0.0, 1.0)
}

/// Clamps into `[0, 1]`, mapping NaN to `0.0`.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

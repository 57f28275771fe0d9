//! sRGB gamut test, channel clamping, and perceptual gamut mapping.
//!
//! Out-of-gamut is a flagged condition rather than an error: callers ask
//! [`is_in_gamut`] and pick a policy. [`clamp_to_gamut`] is the fast one,
//! [`gamut_map`] the one that keeps hue and lightness.

use crate::color::{Color, OkLch};
use crate::precision::{clamp_unit, wrap_hue};
use tracing::debug;

/// Linear-light tolerance when testing gamut membership.
const GAMUT_EPSILON: f64 = 1e-7;

/// Chroma search stops once the bracket is narrower than this.
const CHROMA_TOLERANCE: f64 = 1e-6;

const MAX_ITERATIONS: usize = 48;

/// True iff the color is representable in sRGB without clipping.
pub fn is_in_gamut(color: Color) -> bool {
    let lin = color.to_linear();
    [lin.r, lin.g, lin.b]
        .iter()
        .all(|&v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v))
}

/// Clamps each sRGB channel into [0, 1]. Fast, but may visibly shift hue
/// and lightness. Returns an RGB-space color with the same alpha.
pub fn clamp_to_gamut(color: Color) -> Color {
    Color::from_srgb(color.to_srgb().clamped(), color.alpha())
}

/// Brings a color into sRGB by reducing OKLCH chroma at fixed hue.
///
/// In-gamut colors are returned unchanged. Otherwise lightness is clamped
/// into [0, 1] and the largest in-gamut chroma is found by bisection. The
/// result is an OKLCH-space color with the same alpha.
pub fn gamut_map(color: Color) -> Color {
    if is_in_gamut(color) {
        return color;
    }

    let lch = color.to_lch();
    let (c, h) = if lch.c < 0.0 {
        (-lch.c, wrap_hue(lch.h + 180.0))
    } else {
        (lch.c, lch.h)
    };
    let l = clamp_unit(lch.l);
    let alpha = color.alpha();
    let candidate = |c: f64| Color::from_lch(OkLch { l, c, h }, alpha);

    let mut lo = 0.0;
    let mut hi = c;
    let mut iterations = 0;
    while hi - lo > CHROMA_TOLERANCE && iterations < MAX_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if is_in_gamut(candidate(mid)) {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }

    debug!(
        l = lch.l,
        from_chroma = lch.c,
        to_chroma = lo,
        hue = h,
        iterations,
        "gamut mapped color by chroma reduction"
    );
    candidate(lo)
}

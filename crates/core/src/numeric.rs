//! Stepping, clamping and precision rules for numeric color fields.
//!
//! A [`NumericField`] pairs the last committed number with the raw text the
//! user is typing. The text may be unparsable for a while (`"-"`, `"."`,
//! empty) and is kept verbatim until the field is stepped, committed or
//! cancelled.
//! Every step and every commit normalizes through [`Quantity::normalize`],
//! so repeated stepping never accumulates floating-point remainder.

use crate::precision::{
    round_clamped, round_hue, round_to, ALPHA_DECIMALS, HSL_DECIMALS, OKLCH_HUE_DECIMALS,
    OKLCH_LC_DECIMALS, RGB_DECIMALS,
};
use serde::{Deserialize, Serialize};

/// What happens when a value leaves its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Clamp at both ends.
    Clamp,
    /// Clamp at the lower end only.
    ClampMin,
    /// Wrap around the range (hues).
    Wrap,
}

/// A numeric quantity an editor field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// OKLCH lightness expressed in percent.
    OklchLightness,
    OklchChroma,
    OklchHue,
    HslHue,
    HslSaturation,
    HslLightness,
    RgbChannel,
    Alpha,
}

impl Quantity {
    /// Inclusive lower and upper bound. Chroma has no upper bound.
    pub fn range(self) -> (f64, f64) {
        match self {
            Quantity::OklchLightness | Quantity::HslSaturation | Quantity::HslLightness => {
                (0.0, 100.0)
            }
            Quantity::OklchChroma => (0.0, f64::INFINITY),
            Quantity::OklchHue | Quantity::HslHue => (0.0, 360.0),
            Quantity::RgbChannel => (0.0, 255.0),
            Quantity::Alpha => (0.0, 1.0),
        }
    }

    pub fn edge(self) -> EdgePolicy {
        match self {
            Quantity::OklchHue | Quantity::HslHue => EdgePolicy::Wrap,
            Quantity::OklchChroma => EdgePolicy::ClampMin,
            _ => EdgePolicy::Clamp,
        }
    }

    /// Decimal places kept after each step.
    pub fn decimals(self) -> u32 {
        match self {
            // three decimals on the unit scale
            Quantity::OklchLightness => 1,
            Quantity::OklchChroma => OKLCH_LC_DECIMALS,
            Quantity::OklchHue => OKLCH_HUE_DECIMALS,
            Quantity::HslHue | Quantity::HslSaturation | Quantity::HslLightness => HSL_DECIMALS,
            Quantity::RgbChannel => RGB_DECIMALS,
            Quantity::Alpha => ALPHA_DECIMALS,
        }
    }

    /// Rounds to [`Quantity::decimals`] and applies the edge policy.
    pub fn normalize(self, value: f64) -> f64 {
        let (min, max) = self.range();
        match self.edge() {
            EdgePolicy::Wrap => round_hue(value, self.decimals()),
            EdgePolicy::ClampMin => round_to(value, self.decimals()).max(min),
            EdgePolicy::Clamp => round_clamped(value, self.decimals(), min, max),
        }
    }
}

/// Modifier keys held during an increment or decrement gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        shift: false,
    };
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        alt: false,
        shift: true,
    };

    /// Step magnitude: 1, 0.1 with alt, 10 with shift, and 1 with both.
    pub fn step_size(self) -> f64 {
        match (self.alt, self.shift) {
            (true, false) => 0.1,
            (false, true) => 10.0,
            _ => 1.0,
        }
    }
}

/// Editing state of one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    quantity: Quantity,
    value: f64,
    text: String,
}

impl NumericField {
    /// Creates a field showing `value` normalized for `quantity`.
    pub fn new(quantity: Quantity, value: f64) -> Self {
        let value = quantity.normalize(value);
        Self {
            quantity,
            value,
            text: format_value(value),
        }
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The last committed number, always normalized.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The raw text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text buffer verbatim. The committed value only moves on
    /// [`NumericField::commit`] or a step.
    pub fn set_text(&mut self, raw: impl Into<String>) {
        self.text = raw.into();
    }

    /// Sets the value from outside (e.g. another field changed the color).
    pub fn set_value(&mut self, value: f64) {
        self.value = self.quantity.normalize(value);
        self.text = format_value(self.value);
    }

    pub fn increment(&mut self, mods: Modifiers) -> f64 {
        self.step_by(mods.step_size())
    }

    pub fn decrement(&mut self, mods: Modifiers) -> f64 {
        self.step_by(-mods.step_size())
    }

    /// Blur: resolve the buffer to a normalized number. Unparsable text
    /// falls back to the last valid value.
    pub fn commit(&mut self) -> f64 {
        let base = self.parsed().unwrap_or(self.value);
        self.set_value(base);
        self.value
    }

    /// Abandons the in-progress text and shows the last valid value again.
    pub fn cancel(&mut self) {
        self.text = format_value(self.value);
    }

    fn step_by(&mut self, delta: f64) -> f64 {
        let base = self.parsed().unwrap_or(self.value);
        self.set_value(base + delta);
        self.value
    }

    fn parsed(&self) -> Option<f64> {
        self.text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// Shortest decimal form: `5`, `355.1`, `0.25`.
fn format_value(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_sizes_follow_modifiers() {
        assert_eq!(Modifiers::NONE.step_size(), 1.0);
        assert_eq!(Modifiers::ALT.step_size(), 0.1);
        assert_eq!(Modifiers::SHIFT.step_size(), 10.0);
        let both = Modifiers {
            alt: true,
            shift: true,
        };
        assert_eq!(both.step_size(), 1.0);
    }

    #[test]
    fn oklch_hue_stepping_wraps() {
        let mut f = NumericField::new(Quantity::OklchHue, 355.0);
        assert_eq!(f.increment(Modifiers::NONE), 356.0);

        let mut f = NumericField::new(Quantity::OklchHue, 355.0);
        assert_eq!(f.increment(Modifiers::SHIFT), 5.0);
        assert_eq!(f.text(), "5");

        let mut f = NumericField::new(Quantity::OklchHue, 355.0);
        assert_eq!(f.increment(Modifiers::ALT), 355.1);
        assert_eq!(f.text(), "355.1");
    }

    #[test]
    fn hue_decrement_below_zero_wraps() {
        let mut f = NumericField::new(Quantity::HslHue, 3.0);
        assert_eq!(f.decrement(Modifiers::SHIFT), 353.0);
    }

    #[test]
    fn repeated_fine_steps_do_not_drift() {
        let mut f = NumericField::new(Quantity::OklchHue, 0.0);
        for _ in 0..10 {
            f.increment(Modifiers::ALT);
        }
        assert_eq!(f.value(), 1.0);
        assert_eq!(f.text(), "1");

        let mut a = NumericField::new(Quantity::Alpha, 0.0);
        for _ in 0..3 {
            a.increment(Modifiers::ALT);
        }
        assert_eq!(a.text(), "0.3");
    }

    #[test]
    fn clamped_quantities_stop_at_bounds() {
        let mut l = NumericField::new(Quantity::OklchLightness, 95.0);
        assert_eq!(l.increment(Modifiers::SHIFT), 100.0);
        let mut s = NumericField::new(Quantity::HslSaturation, 4.0);
        assert_eq!(s.decrement(Modifiers::SHIFT), 0.0);
        let mut rgb = NumericField::new(Quantity::RgbChannel, 250.0);
        assert_eq!(rgb.increment(Modifiers::SHIFT), 255.0);
        let mut a = NumericField::new(Quantity::Alpha, 0.5);
        assert_eq!(a.increment(Modifiers::NONE), 1.0);
    }

    #[test]
    fn chroma_clamps_at_zero_only() {
        let mut c = NumericField::new(Quantity::OklchChroma, 0.05);
        assert_eq!(c.decrement(Modifiers::ALT), 0.0);
        c.set_value(0.4);
        assert_eq!(c.increment(Modifiers::SHIFT), 10.4);
    }

    #[test]
    fn rgb_channel_is_integer() {
        let f = NumericField::new(Quantity::RgbChannel, 127.6);
        assert_eq!(f.value(), 128.0);
        assert_eq!(f.text(), "128");
    }

    #[test]
    fn partial_text_is_kept_verbatim() {
        let mut f = NumericField::new(Quantity::HslLightness, 40.0);
        for partial in ["-", ".", "", "-."] {
            f.set_text(partial);
            assert_eq!(f.text(), partial);
            assert_eq!(f.value(), 40.0, "value changed on {partial:?}");
        }
    }

    #[test]
    fn commit_normalizes_parsed_text() {
        let mut f = NumericField::new(Quantity::OklchHue, 10.0);
        f.set_text("370.04");
        assert_eq!(f.commit(), 10.0);
        assert_eq!(f.text(), "10");

        let mut s = NumericField::new(Quantity::HslSaturation, 10.0);
        s.set_text("150");
        assert_eq!(s.commit(), 100.0);
    }

    #[test]
    fn commit_of_unparsable_text_reverts() {
        let mut f = NumericField::new(Quantity::Alpha, 0.25);
        f.set_text("-");
        assert_eq!(f.commit(), 0.25);
        assert_eq!(f.text(), "0.25");
    }

    #[test]
    fn stepping_uses_typed_value_when_it_parses() {
        let mut f = NumericField::new(Quantity::HslHue, 10.0);
        f.set_text("200");
        assert_eq!(f.increment(Modifiers::NONE), 201.0);
        f.set_text("-");
        assert_eq!(f.increment(Modifiers::NONE), 202.0);
    }

    #[test]
    fn cancel_restores_text_without_touching_value() {
        let mut f = NumericField::new(Quantity::OklchChroma, 0.12);
        f.set_text("-");
        f.cancel();
        assert_eq!(f.text(), "0.12");
        assert_eq!(f.value(), 0.12);
    }

    #[test]
    fn cancel_discards_parsable_text() {
        let mut s = NumericField::new(Quantity::HslSaturation, 40.0);
        s.set_text("150");
        assert_eq!(s.value(), 40.0);
        s.cancel();
        assert_eq!(s.value(), 40.0);
        assert_eq!(s.text(), "40");

        let mut h = NumericField::new(Quantity::OklchHue, 12.5);
        h.set_text("-725");
        assert_eq!(h.value(), 12.5);
        h.cancel();
        assert_eq!(h.text(), "12.5");
    }

    #[test]
    fn value_stays_in_domain_while_typing() {
        let mut h = NumericField::new(Quantity::OklchHue, 12.5);
        h.set_text("-725");
        assert_eq!(h.commit(), 355.0);
        assert_eq!(h.text(), "355");
    }

    #[test]
    fn huge_typed_chroma_stays_finite() {
        let mut c = NumericField::new(Quantity::OklchChroma, 0.1);
        c.set_text("1e308");
        let stepped = c.increment(Modifiers::NONE);
        assert!(stepped.is_finite());
        assert!(stepped >= 0.0);
    }

    #[test]
    fn normalize_table() {
        assert_eq!(Quantity::OklchLightness.normalize(50.04), 50.0);
        assert_eq!(Quantity::OklchChroma.normalize(0.12345), 0.123);
        assert_eq!(Quantity::OklchChroma.normalize(-1.0), 0.0);
        assert_eq!(Quantity::OklchHue.normalize(-10.0), 350.0);
        assert_eq!(Quantity::HslHue.normalize(360.0), 0.0);
        assert_eq!(Quantity::HslLightness.normalize(49.5), 50.0);
        assert_eq!(Quantity::RgbChannel.normalize(-3.0), 0.0);
        assert_eq!(Quantity::Alpha.normalize(0.555), 0.56);
        assert_eq!(Quantity::Alpha.normalize(1.01), 1.0);
    }

    #[test]
    fn edge_policies() {
        assert_eq!(Quantity::OklchHue.edge(), EdgePolicy::Wrap);
        assert_eq!(Quantity::HslHue.edge(), EdgePolicy::Wrap);
        assert_eq!(Quantity::OklchChroma.edge(), EdgePolicy::ClampMin);
        assert_eq!(Quantity::Alpha.edge(), EdgePolicy::Clamp);
        assert_eq!(Quantity::OklchChroma.range().1, f64::INFINITY);
    }
}

//! Numeric helpers used across the motion core.
//!
//! These utilities guard conversions between floating-point and integer
//! domains and provide the three-way sign the step-abort rule depends on.
//! They rely on debug assertions to flag unexpected overflows while keeping
//! the call-sites ergonomic.

/// Three-way sign of a float: `-1.0`, `0.0`, or `1.0`.
///
/// Unlike [`f32::signum`], which returns `1.0` for `+0.0` and `-1.0` for
/// `-0.0`, this treats zero as its own case. The step-abort check compares
/// signs across an integration step and must see an exact zero crossing.
#[must_use]
pub const fn sign3(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value.signum()
    }
}

/// Round a finite `f32` to the nearest grid index, asserting that it fits.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "The rounded value is clamped into the i32 domain before casting."
)]
#[must_use]
pub fn round_to_i32(value: f32) -> i32 {
    debug_assert!(value.is_finite(), "expected finite f32 for grid rounding");
    let rounded = value.round();
    let clamped = rounded.clamp(i32::MIN as f32, i32::MAX as f32);
    clamped as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign3_distinguishes_zero() {
        assert_eq!(sign3(3.5), 1.0);
        assert_eq!(sign3(-0.25), -1.0);
        assert_eq!(sign3(0.0), 0.0);
        assert_eq!(sign3(-0.0), 0.0);
    }

    #[test]
    fn rounding_lands_on_grid() {
        assert_eq!(round_to_i32(1.49), 1);
        assert_eq!(round_to_i32(-2.5), -3);
        assert_eq!(round_to_i32(0.0), 0);
    }
}

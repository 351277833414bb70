//! Interpolation in OKLCH
//!
//! Lightness, chroma and alpha blend linearly; hue blends along the shorter
//! arc of the hue circle.

use crate::color::{Color, ColorToken, Oklch};
use crate::error::Result;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    ///
    /// `t` is not clamped: overshooting curves extrapolate.
    fn lerp(&self, other: &Self, t: f64) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

// ============================================================================
// f64 Implementation
// ============================================================================

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Oklch Implementation
// ============================================================================

impl Interpolate for Oklch {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        // a grey takes the hue of the other end
        let (from_h, to_h) = match (self.is_hue_powerless(), other.is_hue_powerless()) {
            (true, false) => (other.h, other.h),
            (false, true) => (self.h, self.h),
            _ => (self.h, other.h),
        };
        let from_alpha = self.alpha.unwrap_or(1.0);
        let to_alpha = other.alpha.unwrap_or(1.0);

        Oklch {
            l: self.l.lerp(&other.l, t),
            c: self.c.lerp(&other.c, t),
            h: lerp_hue(from_h, to_h, t),
            alpha: Some(from_alpha.lerp(&to_alpha, t)),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let hue_delta = (self.h - other.h).abs();
        self.l.approx_eq(&other.l, epsilon)
            && self.c.approx_eq(&other.c, epsilon)
            && hue_delta.min(360.0 - hue_delta) < epsilon
            && self
                .alpha
                .unwrap_or(1.0)
                .approx_eq(&other.alpha.unwrap_or(1.0), epsilon)
    }
}

/// Interpolate hue angles (degrees) along the shorter arc
///
/// The result is normalized into `[0, 360)`.
pub fn lerp_hue(from: f64, to: f64, t: f64) -> f64 {
    let mut delta = to - from;
    if delta.abs() > 180.0 {
        delta -= 360.0 * delta.signum();
    }
    normalize_hue(from + delta * t)
}

fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Blend two host colors in OKLCH at eased progress `t`
///
/// Fails with `UnresolvableColor` if either token has no concrete color.
pub fn interpolate_color(from: &ColorToken, to: &ColorToken, t: f64) -> Result<Color> {
    let from = from.resolve()?.to_oklch();
    let to = to.resolve()?.to_oklch();
    Ok(from.lerp(&to, t).into_color())
}

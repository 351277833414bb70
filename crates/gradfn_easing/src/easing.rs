//! Named easing functions
//!
//! Closed-form curves mapping linear progress in `[0, 1]` to eased progress.
//! Every curve returns exactly `0.0` at `t = 0` and `1.0` at `t = 1` (up to
//! the rounding of the trigonometric functions).

use std::f64::consts::PI;
use std::fmt;

/// A pure mapping from normalized progress to eased progress
pub trait TimingFunction: Send + Sync {
    /// Evaluate the curve at `t` (normally in `0.0..=1.0`)
    fn apply(&self, t: f64) -> f64;
}

impl<F> TimingFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn apply(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Built-in easing curves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
}

impl Easing {
    /// All built-in curves, in registration order
    pub const ALL: [Easing; 23] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
    ];

    /// Kebab-case identifier, as used in utility class names
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::EaseInCubic => "ease-in-cubic",
            Easing::EaseOutCubic => "ease-out-cubic",
            Easing::EaseInOutCubic => "ease-in-out-cubic",
            Easing::EaseInQuart => "ease-in-quart",
            Easing::EaseOutQuart => "ease-out-quart",
            Easing::EaseInOutQuart => "ease-in-out-quart",
            Easing::EaseInQuint => "ease-in-quint",
            Easing::EaseOutQuint => "ease-out-quint",
            Easing::EaseInOutQuint => "ease-in-out-quint",
            Easing::EaseInSine => "ease-in-sine",
            Easing::EaseOutSine => "ease-out-sine",
            Easing::EaseInOutSine => "ease-in-out-sine",
            Easing::EaseInExpo => "ease-in-expo",
            Easing::EaseOutExpo => "ease-out-expo",
            Easing::EaseInOutExpo => "ease-in-out-expo",
            Easing::EaseInCirc => "ease-in-circ",
            Easing::EaseOutCirc => "ease-out-circ",
            Easing::EaseInOutCirc => "ease-in-out-circ",
        }
    }

    /// Look up a curve by its kebab-case identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Apply easing to a progress value
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,

            Easing::Ease => t * t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }

            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let t = t - 1.0;
                1.0 + t * t * t
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t = t - 1.0;
                    1.0 + 4.0 * t * t * t
                }
            }

            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (t - 1.0).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - 8.0 * (t - 1.0).powi(4)
                }
            }

            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 + (t - 1.0).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 + 16.0 * (t - 1.0).powi(5)
                }
            }

            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,

            // The general formulas leave ~1e-3 residue at the ends
            Easing::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Easing::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            Easing::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            Easing::EaseOutCirc => {
                let t = t - 1.0;
                (1.0 - t * t).sqrt()
            }
            Easing::EaseInOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - 4.0 * t * t).sqrt()) / 2.0
                } else {
                    let t = t - 1.0;
                    ((1.0 - 4.0 * t * t).sqrt() + 1.0) / 2.0
                }
            }
        }
    }
}

impl TimingFunction for Easing {
    fn apply(&self, t: f64) -> f64 {
        Easing::apply(self, t)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in Easing::ALL {
            assert!(
                easing.apply(0.0).abs() < EPSILON,
                "{} at 0 = {}",
                easing,
                easing.apply(0.0)
            );
            assert!(
                (easing.apply(1.0) - 1.0).abs() < EPSILON,
                "{} at 1 = {}",
                easing,
                easing.apply(1.0)
            );
        }
    }

    #[test]
    fn test_expo_boundaries_are_special_cased() {
        assert_eq!(Easing::EaseInExpo.apply(0.0), 0.0);
        assert_eq!(Easing::EaseOutExpo.apply(1.0), 1.0);
        assert_eq!(Easing::EaseInOutExpo.apply(0.0), 0.0);
        assert_eq!(Easing::EaseInOutExpo.apply(1.0), 1.0);
    }

    #[test]
    fn test_in_out_continuity_at_midpoint() {
        let in_out = [
            Easing::EaseInOut,
            Easing::EaseInOutCubic,
            Easing::EaseInOutQuart,
            Easing::EaseInOutQuint,
            Easing::EaseInOutSine,
            Easing::EaseInOutExpo,
            Easing::EaseInOutCirc,
        ];
        for easing in in_out {
            let below = easing.apply(0.5 - 1e-14);
            let above = easing.apply(0.5);
            assert!((below - above).abs() < 1e-6, "{} jumps at 0.5", easing);
            assert!((above - 0.5).abs() < 1e-9, "{} not symmetric", easing);
        }
    }

    #[test]
    fn test_in_and_out_bias() {
        assert!(Easing::EaseInCubic.apply(0.5) < 0.5);
        assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < Easing::Ease.apply(0.5));
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < EPSILON);
        assert!((Easing::EaseOutCirc.apply(0.5) - 0.75f64.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_named_curves_are_monotonic() {
        for easing in Easing::ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!(v >= prev - EPSILON, "{} decreases near {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_name_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()), Some(easing));
        }
        assert_eq!(Easing::from_name("bounce"), None);
    }

    #[test]
    fn test_closures_are_timing_functions() {
        let half = |t: f64| t / 2.0;
        let f: &dyn TimingFunction = &half;
        assert_eq!(f.apply(1.0), 0.5);
    }
}

//! CSS-style cubic bezier timing curves
//!
//! The curve runs from P0 = (0, 0) to P3 = (1, 1) with two free control
//! points. Progress `t` is read along the x axis: we solve `Bx(u) = t` for
//! the curve parameter `u`, then return `By(u)`.

use crate::easing::TimingFunction;

/// Newton iterations used to invert the x polynomial
const NEWTON_ITERATIONS: usize = 5;

/// Derivatives below this stop the iteration instead of dividing
const MIN_SLOPE: f64 = 1e-12;

/// A `cubic-bezier(x1, y1, x2, y2)` timing curve
///
/// `x1` and `x2` are expected in `[0, 1]` (the class-name grammar guarantees
/// it); `y1` and `y2` may overshoot.
///
/// The inversion runs a fixed number of Newton steps starting at `u = t`,
/// without a convergence check. Control points that flatten the x curve
/// (derivative near zero away from the ends) can leave a visible error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// CSS `ease`
    pub const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
    /// CSS `ease-in`
    pub const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    /// CSS `ease-out`
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    /// CSS `ease-in-out`
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

    /// Evaluate the eased value for progress `t`
    pub fn apply(&self, t: f64) -> f64 {
        let u = self.solve_x(t);
        eval_cubic(0.0, self.y1, self.y2, 1.0, u)
    }

    /// Find the curve parameter whose x coordinate is `x`
    fn solve_x(&self, x: f64) -> f64 {
        let mut u = x;
        for _ in 0..NEWTON_ITERATIONS {
            let estimate = eval_cubic(0.0, self.x1, self.x2, 1.0, u);
            let slope = eval_cubic_derivative(0.0, self.x1, self.x2, 1.0, u);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            u -= (estimate - x) / slope;
        }
        u
    }

    /// Whether both x control points lie in `[0, 1]`
    pub fn is_well_formed(&self) -> bool {
        (0.0..=1.0).contains(&self.x1) && (0.0..=1.0).contains(&self.x2)
    }
}

impl TimingFunction for CubicBezier {
    fn apply(&self, t: f64) -> f64 {
        CubicBezier::apply(self, t)
    }
}

/// B(u) = (1-u)^3*p0 + 3*(1-u)^2*u*p1 + 3*(1-u)*u^2*p2 + u^3*p3
fn eval_cubic(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let one_minus_u = 1.0 - u;
    let omu2 = one_minus_u * one_minus_u;
    let u2 = u * u;
    omu2 * one_minus_u * p0 + 3.0 * omu2 * u * p1 + 3.0 * one_minus_u * u2 * p2 + u2 * u * p3
}

/// B'(u) = 3*(1-u)^2*(p1-p0) + 6*(1-u)*u*(p2-p1) + 3*u^2*(p3-p2)
fn eval_cubic_derivative(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let one_minus_u = 1.0 - u;
    3.0 * one_minus_u * one_minus_u * (p1 - p0)
        + 6.0 * one_minus_u * u * (p2 - p1)
        + 3.0 * u * u * (p3 - p2)
}

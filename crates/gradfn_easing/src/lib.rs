//! Gradient-Fn Easing Library
//!
//! Timing functions used to distribute gradient color stops along a curve
//! instead of linearly.
//!
//! # Features
//!
//! - **Named Easings**: quadratic through quintic, sine, exponential and
//!   circular curves in in/out/in-out variants
//! - **Cubic Bezier**: CSS-style `cubic-bezier(x1, y1, x2, y2)` curves solved
//!   with a bounded Newton iteration
//! - **Registry**: kebab-case name lookup with user-supplied custom curves
//!
//! # Example
//!
//! ```rust
//! use gradfn_easing::{CubicBezier, Easing, TimingFunction};
//!
//! assert_eq!(Easing::Linear.apply(0.25), 0.25);
//!
//! let curve = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
//! assert!(curve.apply(0.5) > 0.49 && curve.apply(0.5) < 0.51);
//! ```

pub mod bezier;
pub mod easing;
pub mod registry;

pub use bezier::CubicBezier;
pub use easing::{Easing, TimingFunction};
pub use registry::{to_camel_case, to_kebab_case, EasingRegistry, SharedTimingFunction};

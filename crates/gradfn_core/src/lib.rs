//! Gradient-Fn Core
//!
//! Eased multi-stop gradients for a utility-class CSS host. Color stops are
//! spread along an easing curve instead of linearly, with colors blended in
//! OKLCH.
//!
//! # Features
//!
//! - **Stop generation**: concrete `oklch()` stops from two resolved colors
//! - **Color-mix stops**: stepped `color-mix()` stops when the endpoints are
//!   only known as CSS variables
//! - **Property handlers**: typed rule arguments in, CSS custom properties out
//! - **Configuration**: `gradfn.toml` with custom curves and palette colors
//!
//! # Example
//!
//! ```rust
//! use gradfn_core::{ColorToken, EasingSelection, GradientContext, GradientFn};
//!
//! let gradient = GradientFn::default();
//! let context = GradientContext::new(EasingSelection::Named("ease-in-out".into()))
//!     .with_from(ColorToken::parse("#ff0000").unwrap())
//!     .with_to(ColorToken::parse("#0000ff").unwrap());
//!
//! let properties = gradient.resolve(&context).unwrap();
//! assert!(properties.contains("--un-gradient-fn-stops"));
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod interpolate;
pub mod properties;
pub mod stops;

pub use color::{parse_color, Color, ColorSpace, ColorToken, Oklch, Palette};
pub use config::GradientFnConfig;
pub use error::{Endpoint, GradientError, Result};
pub use interpolate::{interpolate_color, lerp_hue, Interpolate};
pub use properties::{
    Direction, EasingSelection, GradientContext, GradientFn, GradientFunction, GradientKind,
    InterpolationSpace, PropertyMap, Shape,
};
pub use stops::{
    color_mix_stops, generate, generate_stops, GenerationRequest, GradientStop,
    GradientStopList, StopPosition, DEFAULT_VAR_PREFIX, MAX_STEPS,
};

// Re-export the timing function library
pub use gradfn_easing;

//! Error types for gradient generation

use std::fmt;

use thiserror::Error;

/// Which end of the gradient a color belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    From,
    To,
}

impl Endpoint {
    /// Keyword used in custom property and utility names
    pub fn keyword(&self) -> &'static str {
        match self {
            Endpoint::From => "from",
            Endpoint::To => "to",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Gradient generation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    /// A stop list was requested before both endpoint colors were set
    #[error(
        "missing `{endpoint}` color: set a `bg-gradient-fn-{endpoint}-<color>` utility before generating stops"
    )]
    MissingEndpointColor { endpoint: Endpoint },

    /// The color token has no concrete color behind it
    #[error("color `{0}` has no concrete color definition and cannot be converted to oklch")]
    UnresolvableColor(String),

    /// Step count must be at least 1
    #[error("invalid step count {0}: at least one step is required")]
    InvalidSteps(u32),

    /// No easing registered under this name
    #[error("unknown easing function `{0}`")]
    UnknownEasing(String),

    /// CSS color text could not be parsed
    #[error("invalid color `{input}`: {reason}")]
    ColorParse { input: String, reason: String },

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for gradient operations
pub type Result<T> = std::result::Result<T, GradientError>;

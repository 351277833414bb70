//! Gradient-fn configuration (`gradfn.toml`)
//!
//! ```toml
//! var_prefix = "--un-gradient-fn"
//! default_steps = 4
//! color_space = "oklch"
//!
//! [easings]
//! snappy = [0.2, 0.9, 0.1, 1.0]
//!
//! [colors]
//! brand = "#336699"
//! ```

use std::fs;
use std::path::Path;

use gradfn_easing::{CubicBezier, EasingRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Palette;
use crate::error::{GradientError, Result};
use crate::properties::InterpolationSpace;
use crate::stops::{DEFAULT_VAR_PREFIX, MAX_STEPS};

/// Plugin-instance configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GradientFnConfig {
    /// Prefix of every emitted custom property
    #[serde(default = "default_var_prefix")]
    pub var_prefix: String,
    /// Steps used when a utility gives none
    #[serde(default = "default_steps")]
    pub default_steps: u32,
    /// Fallback interpolation space of `color-mix()`
    #[serde(default)]
    pub color_space: InterpolationSpace,
    /// Custom bezier curves, `name = [x1, y1, x2, y2]`
    #[serde(default)]
    pub easings: IndexMap<String, [f64; 4]>,
    /// Named palette colors, `name = "<css color>"`
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

fn default_var_prefix() -> String {
    DEFAULT_VAR_PREFIX.to_string()
}

fn default_steps() -> u32 {
    4
}

impl Default for GradientFnConfig {
    fn default() -> Self {
        Self {
            var_prefix: default_var_prefix(),
            default_steps: default_steps(),
            color_space: InterpolationSpace::default(),
            easings: IndexMap::new(),
            colors: IndexMap::new(),
        }
    }
}

impl GradientFnConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| GradientError::Config(format!("invalid gradfn.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GradientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            "loaded {} ({} easings, {} colors)",
            path.display(),
            config.easings.len(),
            config.colors.len()
        );
        Ok(config)
    }

    /// Reject values no handler can work with
    pub fn validate(&self) -> Result<()> {
        if self.default_steps == 0 || self.default_steps > MAX_STEPS {
            return Err(GradientError::InvalidSteps(self.default_steps));
        }
        if !self.var_prefix.starts_with("--") || self.var_prefix.len() == 2 {
            return Err(GradientError::Config(format!(
                "var_prefix `{}` must be a custom property name starting with `--`",
                self.var_prefix
            )));
        }
        Ok(())
    }

    /// Built-in easings plus the configured curves
    pub fn build_registry(&self) -> EasingRegistry {
        let mut registry = EasingRegistry::with_defaults();
        for (name, [x1, y1, x2, y2]) in &self.easings {
            let curve = CubicBezier::new(*x1, *y1, *x2, *y2);
            if !curve.is_well_formed() {
                warn!(
                    "easing '{}': x control points should lie in [0, 1], got {} and {}",
                    name, x1, x2
                );
            }
            registry.register(name, curve);
        }
        registry
    }

    /// Parse the configured palette
    pub fn build_palette(&self) -> Result<Palette> {
        Palette::from_css(
            self.colors
                .iter()
                .map(|(name, css)| (name.as_str(), css.as_str())),
        )
    }
}

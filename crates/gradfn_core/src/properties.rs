//! CSS custom-property handlers
//!
//! Each handler takes already-parsed rule arguments and returns the CSS
//! declarations the host should emit for that utility. Handlers never touch
//! shared state: endpoint colors for concrete stops travel in an explicit
//! [`GradientContext`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use gradfn_easing::{CubicBezier, EasingRegistry, SharedTimingFunction, TimingFunction};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{ColorToken, Palette};
use crate::config::GradientFnConfig;
use crate::error::{Endpoint, GradientError, Result};
use crate::stops::{color_mix_stops, generate_stops, GenerationRequest, GradientStopList};

// ============================================================================
// Property map
// ============================================================================

/// Insertion-ordered CSS declarations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    properties: IndexMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another map; later values win
    pub fn extend(&mut self, other: PropertyMap) {
        self.properties.extend(other.properties);
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}: {};", name, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Rule arguments
// ============================================================================

/// Color space for the CSS-side `color-mix()` interpolation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationSpace {
    Srgb,
    SrgbLinear,
    DisplayP3,
    #[default]
    Oklch,
    A98Rgb,
    ProphotoRgb,
    Rec2020,
    Xyz,
}

impl InterpolationSpace {
    pub const ALL: [InterpolationSpace; 8] = [
        InterpolationSpace::Srgb,
        InterpolationSpace::SrgbLinear,
        InterpolationSpace::DisplayP3,
        InterpolationSpace::Oklch,
        InterpolationSpace::A98Rgb,
        InterpolationSpace::ProphotoRgb,
        InterpolationSpace::Rec2020,
        InterpolationSpace::Xyz,
    ];

    pub fn css_name(&self) -> &'static str {
        match self {
            InterpolationSpace::Srgb => "srgb",
            InterpolationSpace::SrgbLinear => "srgb-linear",
            InterpolationSpace::DisplayP3 => "display-p3",
            InterpolationSpace::Oklch => "oklch",
            InterpolationSpace::A98Rgb => "a98-rgb",
            InterpolationSpace::ProphotoRgb => "prophoto-rgb",
            InterpolationSpace::Rec2020 => "rec2020",
            InterpolationSpace::Xyz => "xyz",
        }
    }
}

impl fmt::Display for InterpolationSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for InterpolationSpace {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|space| space.css_name() == s)
            .ok_or_else(|| format!("unsupported color space `{}`", s))
    }
}

/// Gradient line direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// Look up a short (`tl`, `rb`) or long (`top-left`, `left-top`) keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let direction = match keyword {
            "t" | "top" => Direction::Top,
            "r" | "right" => Direction::Right,
            "b" | "bottom" => Direction::Bottom,
            "l" | "left" => Direction::Left,
            "tl" | "lt" | "top-left" | "left-top" => Direction::TopLeft,
            "tr" | "rt" | "top-right" | "right-top" => Direction::TopRight,
            "bl" | "lb" | "bottom-left" | "left-bottom" => Direction::BottomLeft,
            "br" | "rb" | "bottom-right" | "right-bottom" => Direction::BottomRight,
            _ => return None,
        };
        Some(direction)
    }

    /// CSS position words, e.g. `top left`
    pub fn css_position(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::TopLeft => "top left",
            Direction::TopRight => "top right",
            Direction::BottomLeft => "bottom left",
            Direction::BottomRight => "bottom right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "to {}", self.css_position())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| format!("unknown direction `{}`", s))
    }
}

/// Gradient shape prelude: a direction or arbitrary CSS
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Direction(Direction),
    Custom(String),
}

impl Shape {
    /// Parse a direction keyword or a bracketed value (`[circle_at_center]`)
    ///
    /// Underscores in bracketed values stand for spaces.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_keyword(value) {
            return Some(Shape::Direction(direction));
        }
        let inner = value.strip_prefix('[')?.strip_suffix(']')?;
        if inner.trim().is_empty() {
            return None;
        }
        Some(Shape::Custom(inner.replace('_', " ")))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Direction(direction) => write!(f, "{}", direction),
            Shape::Custom(css) => f.write_str(css),
        }
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid shape `{}`", s))
    }
}

/// CSS gradient function used for `background-image`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GradientKind {
    pub function: GradientFunction,
    pub repeating: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GradientFunction {
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    pub const LINEAR: GradientKind = GradientKind::new(GradientFunction::Linear);
    pub const RADIAL: GradientKind = GradientKind::new(GradientFunction::Radial);
    pub const CONIC: GradientKind = GradientKind::new(GradientFunction::Conic);

    pub const fn new(function: GradientFunction) -> Self {
        Self {
            function,
            repeating: false,
        }
    }

    pub const fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeating {
            f.write_str("repeating-")?;
        }
        let name = match self.function {
            GradientFunction::Linear => "linear",
            GradientFunction::Radial => "radial",
            GradientFunction::Conic => "conic",
        };
        write!(f, "{}-gradient", name)
    }
}

impl FromStr for GradientKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (repeating, rest) = match s.strip_prefix("repeating-") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let function = match rest.strip_suffix("-gradient").unwrap_or(rest) {
            "linear" => GradientFunction::Linear,
            "radial" => GradientFunction::Radial,
            "conic" => GradientFunction::Conic,
            _ => return Err(format!("unknown gradient kind `{}`", s)),
        };
        Ok(GradientKind {
            function,
            repeating,
        })
    }
}

/// Which timing function to sample
#[derive(Clone, Debug, PartialEq)]
pub enum EasingSelection {
    /// A registered easing name
    Named(String),
    Bezier(CubicBezier),
}

impl Default for EasingSelection {
    fn default() -> Self {
        EasingSelection::Named("linear".to_string())
    }
}

/// Everything needed to produce concrete stops for one element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradientContext {
    pub from: Option<ColorToken>,
    pub to: Option<ColorToken>,
    pub easing: EasingSelection,
    /// Falls back to the configured default
    pub steps: Option<u32>,
    /// Gradient length in pixels
    pub length: Option<f64>,
}

impl GradientContext {
    pub fn new(easing: EasingSelection) -> Self {
        Self {
            easing,
            ..Default::default()
        }
    }

    pub fn with_from(mut self, token: ColorToken) -> Self {
        self.from = Some(token);
        self
    }

    pub fn with_to(mut self, token: ColorToken) -> Self {
        self.to = Some(token);
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// A configured gradient-fn instance
///
/// Immutable after construction and safe to share between threads.
#[derive(Clone, Debug)]
pub struct GradientFn {
    config: GradientFnConfig,
    registry: EasingRegistry,
    palette: Palette,
}

impl GradientFn {
    /// Build an instance from configuration
    pub fn new(config: GradientFnConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.build_registry();
        let palette = config.build_palette()?;
        debug!(
            "gradient-fn ready: prefix {}, {} easings, {} palette colors",
            config.var_prefix,
            registry.len(),
            palette.len()
        );
        Ok(Self {
            config,
            registry,
            palette,
        })
    }

    /// Add a custom timing function under a camelCase or kebab-case name
    pub fn with_function<F>(mut self, name: &str, function: F) -> Self
    where
        F: TimingFunction + 'static,
    {
        self.registry.register(name, function);
        self
    }

    pub fn config(&self) -> &GradientFnConfig {
        &self.config
    }

    pub fn registry(&self) -> &EasingRegistry {
        &self.registry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Full custom property name for a suffix, e.g. `stops`
    pub fn var(&self, suffix: &str) -> String {
        format!("{}-{}", self.config.var_prefix, suffix)
    }

    fn var_ref(&self, suffix: &str) -> String {
        format!("var({})", self.var(suffix))
    }

    /// Interpolation space expression used inside `color-mix()` and shapes
    pub fn color_space_expr(&self) -> String {
        format!(
            "var({}, in {})",
            self.var("color-space"),
            self.config.color_space
        )
    }

    fn gradient_value(&self) -> String {
        format!("{}, {}", self.var_ref("shape"), self.var_ref("stops"))
    }

    /// `fn-from-<color>` / `fn-to-<color>`
    ///
    /// A missing token falls back to `black`.
    pub fn endpoint(&self, endpoint: Endpoint, token: Option<&ColorToken>) -> PropertyMap {
        let value = token
            .map(ColorToken::css_value)
            .unwrap_or_else(|| "black".to_string());
        let mut map = PropertyMap::new();
        map.insert(self.var(endpoint.keyword()), value);
        map
    }

    /// `fn-color-space-<space>`
    pub fn color_space(&self, space: InterpolationSpace) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(self.var("color-space"), format!("in {}", space));
        map
    }

    /// `fn-to-<direction>`: shape plus a linear background
    pub fn direction(&self, direction: Direction) -> PropertyMap {
        let mut map = self.shape(&Shape::Direction(direction));
        map.insert(
            "background-image",
            format!("linear-gradient({})", self.var_ref("gradient")),
        );
        map
    }

    /// `fn-shape-<shape>`
    pub fn shape(&self, shape: &Shape) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(
            self.var("shape"),
            format!("{} {}", shape, self.color_space_expr()),
        );
        map.insert(self.var("gradient"), self.gradient_value());
        map
    }

    /// `bg-gradient-fn-[repeating-]<linear|radial|conic>`
    pub fn kind(&self, kind: GradientKind) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(
            "background-image",
            format!(
                "{}(var({}, var({}, rgb(255 255 255 / 0))))",
                kind,
                self.var("gradient"),
                self.var("stops")
            ),
        );
        map
    }

    /// `fn-<easing>[/<steps>]`
    pub fn easing(&self, name: &str, steps: Option<u32>) -> Result<PropertyMap> {
        let timing = self.lookup(name)?;
        self.stepped(timing.as_ref(), steps)
    }

    /// `fn-bezier-[x1,y1,x2,y2][/<steps>]`
    pub fn bezier(&self, curve: CubicBezier, steps: Option<u32>) -> Result<PropertyMap> {
        self.stepped(&curve, steps)
    }

    fn stepped(&self, timing: &dyn TimingFunction, steps: Option<u32>) -> Result<PropertyMap> {
        let steps = steps.unwrap_or(self.config.default_steps);
        let stops = color_mix_stops(
            steps,
            timing,
            &self.color_space_expr(),
            &self.var_ref("from"),
            &self.var_ref("to"),
        )?;

        let mut map = PropertyMap::new();
        let gradient = format!("{}, {}", self.var_ref("shape"), stops);
        map.insert(self.var("stops"), stops);
        map.insert(self.var("gradient"), gradient);
        Ok(map)
    }

    /// `fn-length-<px>`
    pub fn length(&self, px: f64) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(
            self.var("length"),
            format!("{}px", crate::color::format_number(px)),
        );
        map
    }

    /// Resolve a palette name or CSS color text
    pub fn color(&self, value: &str) -> Result<ColorToken> {
        self.palette.token(value)
    }

    /// Concrete OKLCH stops for a context
    pub fn resolve_stops(&self, context: &GradientContext) -> Result<GradientStopList> {
        let from = context
            .from
            .as_ref()
            .ok_or(GradientError::MissingEndpointColor {
                endpoint: Endpoint::From,
            })?;
        let to = context
            .to
            .as_ref()
            .ok_or(GradientError::MissingEndpointColor {
                endpoint: Endpoint::To,
            })?;
        let timing = self.timing(&context.easing)?;
        let steps = context.steps.unwrap_or(self.config.default_steps);

        let request = GenerationRequest::new(steps, from, to, timing.as_ref())
            .with_length(context.length)
            .with_var_prefix(&self.config.var_prefix);
        generate_stops(&request)
    }

    /// Properties for a fully known gradient
    ///
    /// Emits the endpoint variables, concrete stops, the composed gradient
    /// and the length when one is set.
    pub fn resolve(&self, context: &GradientContext) -> Result<PropertyMap> {
        let stops = self.resolve_stops(context)?.to_string();

        let mut map = PropertyMap::new();
        map.extend(self.endpoint(Endpoint::From, context.from.as_ref()));
        map.extend(self.endpoint(Endpoint::To, context.to.as_ref()));
        if let Some(length) = context.length.filter(|l| *l > 0.0) {
            map.extend(self.length(length));
        }
        let gradient = format!("{}, {}", self.var_ref("shape"), stops);
        map.insert(self.var("stops"), stops);
        map.insert(self.var("gradient"), gradient);
        Ok(map)
    }

    fn lookup(&self, name: &str) -> Result<SharedTimingFunction> {
        self.registry
            .get(name)
            .ok_or_else(|| GradientError::UnknownEasing(name.to_string()))
    }

    fn timing(&self, selection: &EasingSelection) -> Result<SharedTimingFunction> {
        match selection {
            EasingSelection::Named(name) => self.lookup(name),
            EasingSelection::Bezier(curve) => Ok(Arc::new(*curve)),
        }
    }

    /// `@property` registrations so the endpoint colors can transition
    pub fn preflight_css(&self) -> String {
        [Endpoint::From, Endpoint::To]
            .iter()
            .map(|endpoint| {
                format!(
                    "@property {} {{\n  syntax: \"<color>\";\n  inherits: false;\n  initial-value: #000\n}}",
                    self.var(endpoint.keyword())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Extend a `transition-property` color list with the endpoint variables
    pub fn transition_colors(&self, base: &str) -> String {
        [base.to_string(), self.var("from"), self.var("to")].join(",")
    }
}

impl Default for GradientFn {
    fn default() -> Self {
        let config = GradientFnConfig::default();
        Self {
            registry: config.build_registry(),
            palette: Palette::new(),
            config,
        }
    }
}

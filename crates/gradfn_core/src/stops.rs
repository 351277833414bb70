//! Gradient stop generation
//!
//! Samples a timing function at `steps + 1` evenly spaced positions and
//! blends the two endpoint colors at each eased value. Positions come from
//! the linear sample index, so easing only moves *colors*, never positions.
//!
//! # Example
//!
//! ```rust
//! use gradfn_core::{generate, ColorToken, GenerationRequest};
//! use gradfn_core::gradfn_easing::Easing;
//!
//! let from = ColorToken::parse("#ff0000").unwrap();
//! let to = ColorToken::parse("#0000ff").unwrap();
//! let request = GenerationRequest::new(4, &from, &to, &Easing::EaseInOut);
//!
//! let stops = generate(&request).unwrap();
//! assert!(stops.ends_with("100.00%"));
//! ```

use std::fmt;

use gradfn_easing::TimingFunction;
use tracing::{debug, trace};

use crate::color::{Color, ColorToken};
use crate::error::{GradientError, Result};
use crate::interpolate::Interpolate;

/// Custom property prefix used when none is configured
pub const DEFAULT_VAR_PREFIX: &str = "--un-gradient-fn";

/// Largest accepted step count
pub const MAX_STEPS: u32 = 1024;

/// Inputs for one stop-list generation
///
/// Built fresh per evaluation and consumed once; both endpoint colors travel
/// with the request.
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub steps: u32,
    pub from: &'a ColorToken,
    pub to: &'a ColorToken,
    pub timing: &'a dyn TimingFunction,
    /// Explicit gradient length in pixels
    pub length: Option<f64>,
    /// Prefix of the length custom property
    pub var_prefix: &'a str,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(
        steps: u32,
        from: &'a ColorToken,
        to: &'a ColorToken,
        timing: &'a dyn TimingFunction,
    ) -> Self {
        Self {
            steps,
            from,
            to,
            timing,
            length: None,
            var_prefix: DEFAULT_VAR_PREFIX,
        }
    }

    pub fn with_length(mut self, length: Option<f64>) -> Self {
        self.length = length;
        self
    }

    pub fn with_var_prefix(mut self, prefix: &'a str) -> Self {
        self.var_prefix = prefix;
        self
    }
}

impl fmt::Debug for GenerationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("steps", &self.steps)
            .field("from", &self.from.name)
            .field("to", &self.to.name)
            .field("length", &self.length)
            .field("var_prefix", &self.var_prefix)
            .finish()
    }
}

/// Where a stop sits along the gradient line
#[derive(Clone, Debug, PartialEq)]
pub enum StopPosition {
    /// Percentage of the gradient box, `0..=100`
    Percent(f64),
    /// Fraction of an external length custom property
    Length { fraction: f64, var: String },
}

impl fmt::Display for StopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopPosition::Percent(p) => write!(f, "{}%", to_fixed(*p, 2)),
            StopPosition::Length { fraction, var } => {
                write!(f, "calc({} * var({}))", to_fixed(*fraction, 4), var)
            }
        }
    }
}

/// A color anchored at a position
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    pub position: StopPosition,
}

impl fmt::Display for GradientStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.position)
    }
}

/// Ordered stops, first = start of the gradient
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStopList {
    stops: Vec<GradientStop>,
}

impl GradientStopList {
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradientStop> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn first(&self) -> Option<&GradientStop> {
        self.stops.first()
    }

    pub fn last(&self) -> Option<&GradientStop> {
        self.stops.last()
    }
}

impl fmt::Display for GradientStopList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", stop)?;
        }
        Ok(())
    }
}

/// Generate the eased stop list for a request
pub fn generate_stops(request: &GenerationRequest<'_>) -> Result<GradientStopList> {
    let steps = request.steps;
    check_steps(steps)?;

    let from = request.from.resolve()?.to_oklch();
    let to = request.to.resolve()?.to_oklch();

    // a zero length cannot size anything
    let length_var = request
        .length
        .filter(|length| *length > 0.0)
        .map(|_| format!("{}-length", request.var_prefix));

    debug!(
        "generating {} steps from {} to {} ({})",
        steps,
        request.from.name,
        request.to.name,
        if length_var.is_some() { "length" } else { "percent" }
    );

    let mut stops = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let eased = request.timing.apply(t);
        let color = from.lerp(&to, eased).into_color();

        let position = match &length_var {
            Some(var) => StopPosition::Length {
                fraction: t,
                var: var.clone(),
            },
            None => StopPosition::Percent(t * 100.0),
        };

        trace!("stop {}: t={} eased={} color={}", i, t, eased, color);
        stops.push(GradientStop { color, position });
    }

    Ok(GradientStopList { stops })
}

/// Generate the eased stop list rendered as a CSS stop-list string
pub fn generate(request: &GenerationRequest<'_>) -> Result<String> {
    Ok(generate_stops(request)?.to_string())
}

/// Generate stepped stops as `color-mix()` expressions of two CSS colors
///
/// Used when the endpoints are only known to the browser (custom
/// properties). Each step contributes three stops: its start color, a 50/50
/// mix with the next color at the step midpoint, and the next color.
pub fn color_mix_stops(
    steps: u32,
    timing: &dyn TimingFunction,
    space: &str,
    from: &str,
    to: &str,
) -> Result<String> {
    check_steps(steps)?;

    let base: Vec<String> = (0..=steps)
        .map(|i| {
            let eased = timing.apply(i as f64 / steps as f64);
            let percent = round_half_up(eased * 100.0);
            format!("color-mix({}, {}, {} {}%)", space, from, to, percent)
        })
        .collect();

    let mut stops = Vec::with_capacity(steps as usize * 3);
    for (i, pair) in base.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let start = i as f64 / steps as f64;
        let end = (i + 1) as f64 / steps as f64;
        let mid = (start + end) / 2.0;

        stops.push(format!("{} {}%", a, to_fixed(start * 100.0, 2)));
        stops.push(format!(
            "color-mix({}, {}, {} 50%) {}%",
            space,
            a,
            b,
            to_fixed(mid * 100.0, 2)
        ));
        stops.push(format!("{} {}%", b, to_fixed(end * 100.0, 2)));
    }

    debug!("generated {} color-mix stops", stops.len());
    Ok(stops.join(", "))
}

fn check_steps(steps: u32) -> Result<()> {
    if steps == 0 || steps > MAX_STEPS {
        return Err(GradientError::InvalidSteps(steps));
    }
    Ok(())
}

/// Fixed-point rendering with ties rounded up (`3.125` → `3.13`)
fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale + 0.5).floor() / scale;
    format!("{:.*}", decimals, rounded)
}

/// Round to the nearest integer, ties toward positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradfn_easing::{CubicBezier, Easing};

    fn token(css: &str) -> ColorToken {
        ColorToken::parse(css).unwrap()
    }

    /// Trailing position token of every stop in a rendered list
    fn percent_positions(list: &str) -> Vec<f64> {
        list.split(", ")
            .map(|stop| {
                let position = stop.rsplit(' ').next().unwrap();
                position.trim_end_matches('%').parse::<f64>().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_zero_steps_rejected() {
        let a = token("red");
        let request = GenerationRequest::new(0, &a, &a, &Easing::Linear);
        assert_eq!(generate(&request), Err(GradientError::InvalidSteps(0)));
        assert!(color_mix_stops(0, &Easing::Linear, "in oklch", "a", "b").is_err());
    }

    #[test]
    fn test_stop_count() {
        let a = token("red");
        let b = token("blue");
        for steps in [1, 2, 4, 7, 16] {
            let request = GenerationRequest::new(steps, &a, &b, &Easing::EaseInOutSine);
            let stops = generate_stops(&request).unwrap();
            assert_eq!(stops.len(), steps as usize + 1);
        }
    }

    #[test]
    fn test_identical_endpoints_give_identical_stops() {
        let a = token("#3b82f6");
        let expected = a.resolve().unwrap().to_oklch().into_color().with_alpha(1.0);
        for easing in [Easing::Linear, Easing::EaseInExpo, Easing::EaseOutCirc] {
            let request = GenerationRequest::new(5, &a, &a, &easing);
            let stops = generate_stops(&request).unwrap();
            assert_eq!(stops.len(), 6);
            for stop in stops.iter() {
                assert_eq!(stop.color.to_string(), expected.to_string());
            }
        }
    }

    #[test]
    fn test_single_step_linear() {
        let a = token("red");
        let b = token("blue");
        let request = GenerationRequest::new(1, &a, &b, &Easing::Linear);
        let stops = generate_stops(&request).unwrap();
        assert_eq!(stops.len(), 2);

        let render = |c: &ColorToken| {
            c.resolve()
                .unwrap()
                .to_oklch()
                .into_color()
                .with_alpha(1.0)
                .to_string()
        };
        let first = stops.first().unwrap();
        let last = stops.last().unwrap();
        assert_eq!(first.to_string(), format!("{} 0.00%", render(&a)));
        assert_eq!(last.to_string(), format!("{} 100.00%", render(&b)));
    }

    #[test]
    fn test_rendered_list_shape() {
        let a = token("#000");
        let b = token("#fff");
        let request = GenerationRequest::new(2, &a, &b, &Easing::Linear);
        let css = generate(&request).unwrap();
        assert_eq!(
            css,
            "oklch(0 0 0 / 1) 0.00%, oklch(0.5 0 0 / 1) 50.00%, oklch(1 0 0 / 1) 100.00%"
        );
    }

    #[test]
    fn test_positions_ignore_easing() {
        let a = token("red");
        let b = token("blue");
        let linear = generate(&GenerationRequest::new(6, &a, &b, &Easing::Linear)).unwrap();
        let expo = generate(&GenerationRequest::new(6, &a, &b, &Easing::EaseInExpo)).unwrap();
        let curve = CubicBezier::new(0.7, -0.4, 0.2, 1.5);
        let bezier = generate(&GenerationRequest::new(6, &a, &b, &curve)).unwrap();

        let positions = percent_positions(&linear);
        assert_eq!(positions, percent_positions(&expo));
        assert_eq!(positions, percent_positions(&bezier));
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_positions_round_trip() {
        let a = token("red");
        let b = token("blue");
        for steps in [1u32, 3, 6, 7, 9, 32] {
            let css = generate(&GenerationRequest::new(steps, &a, &b, &Easing::EaseOut)).unwrap();
            let positions = percent_positions(&css);
            for (i, parsed) in positions.iter().enumerate() {
                let expected = (i as f64 / steps as f64 * 100.0 * 100.0 + 0.5).floor() / 100.0;
                assert!((parsed - expected).abs() < 1e-9, "{} vs {}", parsed, expected);
            }
        }
    }

    #[test]
    fn test_length_positions() {
        let a = token("red");
        let b = token("blue");
        let request = GenerationRequest::new(3, &a, &b, &Easing::Linear)
            .with_length(Some(240.0))
            .with_var_prefix("--x-grad");
        let stops = generate_stops(&request).unwrap();
        assert_eq!(
            stops.stops()[1].position.to_string(),
            "calc(0.3333 * var(--x-grad-length))"
        );
        assert_eq!(
            stops.last().unwrap().position.to_string(),
            "calc(1.0000 * var(--x-grad-length))"
        );

        let zero = GenerationRequest::new(3, &a, &b, &Easing::Linear).with_length(Some(0.0));
        assert!(generate(&zero).unwrap().ends_with("100.00%"));
    }

    #[test]
    fn test_unresolvable_endpoint() {
        let a = token("red");
        let missing = ColorToken::unresolved("currentColor");
        let request = GenerationRequest::new(3, &missing, &a, &Easing::Linear);
        assert_eq!(
            generate(&request),
            Err(GradientError::UnresolvableColor("currentColor".into()))
        );
    }

    #[test]
    fn test_deterministic() {
        let a = token("oklch(0.7 0.2 30 / 0.4)");
        let b = token("hsl(200 80% 40%)");
        let request = GenerationRequest::new(8, &a, &b, &Easing::EaseInOutQuart);
        assert_eq!(generate(&request).unwrap(), generate(&request).unwrap());
    }

    #[test]
    fn test_color_mix_stops() {
        let css = color_mix_stops(
            2,
            &Easing::Linear,
            "in oklch",
            "var(--f)",
            "var(--t)",
        )
        .unwrap();
        let c0 = "color-mix(in oklch, var(--f), var(--t) 0%)";
        let c1 = "color-mix(in oklch, var(--f), var(--t) 50%)";
        let c2 = "color-mix(in oklch, var(--f), var(--t) 100%)";
        let expected = [
            format!("{} 0.00%", c0),
            format!("color-mix(in oklch, {}, {} 50%) 25.00%", c0, c1),
            format!("{} 50.00%", c1),
            format!("{} 50.00%", c1),
            format!("color-mix(in oklch, {}, {} 50%) 75.00%", c1, c2),
            format!("{} 100.00%", c2),
        ]
        .join(", ");
        assert_eq!(css, expected);
    }

    #[test]
    fn test_ties_round_up() {
        let a = token("red");
        let b = token("blue");
        let stops = generate_stops(&GenerationRequest::new(32, &a, &b, &Easing::Linear)).unwrap();
        assert_eq!(stops.stops()[1].position.to_string(), "3.13%");

        let request = GenerationRequest::new(32, &a, &b, &Easing::Linear).with_length(Some(100.0));
        let stops = generate_stops(&request).unwrap();
        assert_eq!(
            stops.stops()[1].position.to_string(),
            "calc(0.0313 * var(--un-gradient-fn-length))"
        );

        let css = color_mix_stops(16, &Easing::Linear, "in oklch", "a", "b").unwrap();
        assert!(css.contains("50%) 3.13%"), "{}", css);

        assert_eq!(to_fixed(12.5, 2), "12.50");
        assert_eq!(to_fixed(0.0, 4), "0.0000");
        assert_eq!(to_fixed(1.0, 4), "1.0000");
    }

    #[test]
    fn test_step_count_is_bounded() {
        let a = token("red");
        let request = GenerationRequest::new(u32::MAX, &a, &a, &Easing::Linear);
        assert_eq!(generate(&request), Err(GradientError::InvalidSteps(u32::MAX)));
        assert_eq!(
            color_mix_stops(MAX_STEPS + 1, &Easing::Linear, "in oklch", "a", "b"),
            Err(GradientError::InvalidSteps(MAX_STEPS + 1))
        );
        let request = GenerationRequest::new(MAX_STEPS, &a, &a, &Easing::Linear);
        assert_eq!(generate_stops(&request).unwrap().len(), MAX_STEPS as usize + 1);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.5), 13);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(99.4), 99);
    }
}

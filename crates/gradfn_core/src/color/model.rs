//! Color values and conversion to OKLCH
//!
//! A [`Color`] keeps the components of the space it was written in. Every
//! space converts to OKLab/OKLCH, the common space gradients are blended in.
//!
//! source for the OKLab matrices: https://bottosson.github.io/posts/oklab/

use std::fmt;

/// Chroma below which a hue carries no information
pub const POWERLESS_CHROMA: f64 = 1e-4;

/// Color space tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// sRGB, components 0-255
    Rgb,
    /// HSL, hue in degrees, saturation and lightness in percent
    Hsl,
    /// Linear-light sRGB, components 0-1
    SrgbLinear,
    /// OKLab, L 0-1
    Oklab,
    /// OKLCH, L 0-1, hue in degrees
    Oklch,
}

impl ColorSpace {
    /// CSS identifier of the space
    pub fn css_name(&self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsl => "hsl",
            ColorSpace::SrgbLinear => "srgb-linear",
            ColorSpace::Oklab => "oklab",
            ColorSpace::Oklch => "oklch",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A color in a tagged space with optional alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub space: ColorSpace,
    pub components: [f64; 3],
    /// Alpha in `[0, 1]`; `None` means fully opaque
    pub alpha: Option<f64>,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn new(space: ColorSpace, components: [f64; 3], alpha: Option<f64>) -> Self {
        Self {
            space,
            components,
            alpha,
        }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(ColorSpace::Rgb, [r, g, b], None)
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(ColorSpace::Rgb, [r, g, b], Some(a))
    }

    pub const fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::new(ColorSpace::Hsl, [h, s, l], None)
    }

    pub const fn oklab(l: f64, a: f64, b: f64) -> Self {
        Self::new(ColorSpace::Oklab, [l, a, b], None)
    }

    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self::new(ColorSpace::Oklch, [l, c, h], None)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f64;
        let g = ((hex >> 8) & 0xFF) as f64;
        let b = (hex & 0xFF) as f64;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Alpha with a missing value read as opaque
    pub fn opacity(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }

    /// Convert to OKLab `[L, a, b]`
    pub fn to_oklab(&self) -> [f64; 3] {
        let [c0, c1, c2] = self.components;
        match self.space {
            ColorSpace::Rgb => linear_srgb_to_oklab([
                srgb_to_linear(c0 / 255.0),
                srgb_to_linear(c1 / 255.0),
                srgb_to_linear(c2 / 255.0),
            ]),
            ColorSpace::Hsl => {
                let [r, g, b] = hsl_to_srgb(c0, c1, c2);
                linear_srgb_to_oklab([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)])
            }
            ColorSpace::SrgbLinear => linear_srgb_to_oklab(self.components),
            ColorSpace::Oklab => self.components,
            ColorSpace::Oklch => {
                let h = c2.to_radians();
                [c0, c1 * h.cos(), c1 * h.sin()]
            }
        }
    }

    /// Convert to OKLCH
    pub fn to_oklch(&self) -> Oklch {
        let (l, c, h) = match self.space {
            ColorSpace::Oklch => {
                let [l, c, h] = self.components;
                (l, c, h)
            }
            _ => {
                let [l, a, b] = self.to_oklab();
                (l, (a * a + b * b).sqrt(), b.atan2(a).to_degrees())
            }
        };
        let h = if c < POWERLESS_CHROMA {
            0.0
        } else {
            h.rem_euclid(360.0)
        };
        Oklch {
            l,
            c,
            h,
            alpha: self.alpha,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c0, c1, c2] = self.components;
        let (c0, c1, c2) = (format_number(c0), format_number(c1), format_number(c2));
        let alpha = match self.alpha {
            Some(a) => format!(" / {}", format_number(a)),
            None => String::new(),
        };
        match self.space {
            ColorSpace::Hsl => write!(f, "hsl({} {}% {}%{})", c0, c1, c2, alpha),
            ColorSpace::SrgbLinear => write!(f, "color(srgb-linear {} {} {}{})", c0, c1, c2, alpha),
            space => write!(f, "{}({} {} {}{})", space.css_name(), c0, c1, c2, alpha),
        }
    }
}

/// A color in OKLCH with its alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
    pub alpha: Option<f64>,
}

impl Oklch {
    /// Greys have no meaningful hue
    pub fn is_hue_powerless(&self) -> bool {
        self.c < POWERLESS_CHROMA
    }

    pub fn into_color(self) -> Color {
        Color::new(ColorSpace::Oklch, [self.l, self.c, self.h], self.alpha)
    }
}

/// Render a number with at most 4 decimals and no trailing zeros
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // avoids "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{:.4}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

// ============================================================================
// Transfer functions and matrices
// ============================================================================

fn srgb_to_linear(x: f64) -> f64 {
    let sign = x.signum();
    let x = x.abs();
    if x <= 0.04045 {
        sign * x / 12.92
    } else {
        sign * ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn hsl_to_srgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let h = h.rem_euclid(360.0);
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let a = s * l.min(1.0 - l);
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

fn linear_srgb_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_and_black_in_oklch() {
        let white = Color::WHITE.to_oklch();
        assert!((white.l - 1.0).abs() < 1e-4);
        assert!(white.is_hue_powerless());
        assert_eq!(white.h, 0.0);

        let black = Color::BLACK.to_oklch();
        assert!(black.l.abs() < 1e-9);
        assert_eq!(black.h, 0.0);
    }

    #[test]
    fn test_red_reference_values() {
        // oklch(0.628 0.2577 29.23) per CSS Color 4
        let red = Color::rgb(255.0, 0.0, 0.0).to_oklch();
        assert!((red.l - 0.628).abs() < 1e-3);
        assert!((red.c - 0.2577).abs() < 1e-3);
        assert!((red.h - 29.23).abs() < 0.1);
    }

    #[test]
    fn test_hsl_matches_rgb() {
        let from_hsl = Color::hsl(120.0, 100.0, 50.0).to_oklab();
        let from_rgb = Color::rgb(0.0, 255.0, 0.0).to_oklab();
        for i in 0..3 {
            assert!((from_hsl[i] - from_rgb[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_oklch_hue_is_normalized() {
        let c = Color::oklch(0.5, 0.1, -30.0).to_oklch();
        assert!((c.h - 330.0).abs() < 1e-9);
        let c = Color::oklch(0.5, 0.1, 400.0).to_oklch();
        assert!((c.h - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_oklab_and_oklch_agree() {
        let lch = Color::oklch(0.7, 0.15, 250.0);
        let [l, a, b] = lch.to_oklab();
        let back = Color::oklab(l, a, b).to_oklch();
        assert!((back.c - 0.15).abs() < 1e-9);
        assert!((back.h - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_alpha_is_carried() {
        let c = Color::rgba(10.0, 20.0, 30.0, 0.25).to_oklch();
        assert_eq!(c.alpha, Some(0.25));
        assert_eq!(Color::BLACK.opacity(), 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(255.0, 0.0, 0.0).to_string(), "rgb(255 0 0)");
        assert_eq!(
            Color::oklch(0.62796, 0.25768, 29.2339).with_alpha(1.0).to_string(),
            "oklch(0.628 0.2577 29.2339 / 1)"
        );
        assert_eq!(Color::hsl(210.0, 50.0, 40.0).to_string(), "hsl(210 50% 40%)");
        assert_eq!(
            Color::new(ColorSpace::SrgbLinear, [1.0, 0.5, 0.0], Some(0.5)).to_string(),
            "color(srgb-linear 1 0.5 0 / 0.5)"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.123456), "0.1235");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(359.99999), "360");
    }
}

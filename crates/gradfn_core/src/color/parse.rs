//! CSS color parser
//!
//! Accepts the color syntaxes a utility-class host hands over:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb()` / `rgba()` with commas or spaces, percentages and `/ alpha`
//! - `hsl()` / `hsla()`
//! - `oklab()` and `oklch()` (lightness as number or percent)
//! - a small table of named colors

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{opt, value},
    error::ParseError as NomParseError,
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use tracing::trace;

use super::model::{Color, ColorSpace};
use crate::error::{GradientError, Result};

/// Parse a CSS color string
pub fn parse_color(input: &str) -> Result<Color> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(parse_error(input, "empty color string"));
    }

    if trimmed.starts_with('#') {
        return match parse_hex_color::<nom::error::Error<&str>>(trimmed) {
            Ok(("", color)) => Ok(color),
            _ => Err(parse_error(input, "expected #rgb, #rgba, #rrggbb or #rrggbbaa")),
        };
    }

    if trimmed.contains('(') {
        let (rest, (name, args)) = color_function::<nom::error::Error<&str>>(trimmed)
            .map_err(|_| parse_error(input, "malformed color function"))?;
        if !rest.trim().is_empty() {
            return Err(parse_error(input, "unexpected text after color function"));
        }
        trace!("color function {} with {} arguments", name, args.channels.len());
        return build_function_color(input, name, args);
    }

    parse_named_color(trimmed).ok_or_else(|| parse_error(input, "unknown color name"))
}

fn parse_error(input: &str, reason: &str) -> GradientError {
    GradientError::ColorParse {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

// ============================================================================
// Nom parsers
// ============================================================================

/// A numeric function argument
#[derive(Clone, Copy, Debug, PartialEq)]
enum Arg {
    Number(f64),
    Percent(f64),
}

impl Arg {
    /// Resolve against the value `100%` stands for
    fn resolve(self, full_scale: f64) -> f64 {
        match self {
            Arg::Number(n) => n,
            Arg::Percent(p) => p / 100.0 * full_scale,
        }
    }

    /// Percent value, reading plain numbers as percentages
    fn as_percent(self) -> f64 {
        match self {
            Arg::Number(n) | Arg::Percent(n) => n,
        }
    }
}

#[derive(Debug)]
struct FunctionArgs {
    channels: Vec<Arg>,
    alpha: Option<Arg>,
}

/// Parse hex color: #RGB, #RGBA, #RRGGBB or #RRGGBBAA
fn parse_hex_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (rest, _) = char('#')(input)?;
    let (rest, hex) = take_while1(|c: char| c.is_ascii_hexdigit())(rest)?;

    let digits: Vec<u8> = hex
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();

    let channel = |hi: u8, lo: u8| (hi * 16 + lo) as f64;
    let color = match digits.as_slice() {
        [r, g, b] => Color::rgb(channel(*r, *r), channel(*g, *g), channel(*b, *b)),
        [r, g, b, a] => Color::rgba(
            channel(*r, *r),
            channel(*g, *g),
            channel(*b, *b),
            channel(*a, *a) / 255.0,
        ),
        [r1, r2, g1, g2, b1, b2] => {
            Color::rgb(channel(*r1, *r2), channel(*g1, *g2), channel(*b1, *b2))
        }
        [r1, r2, g1, g2, b1, b2, a1, a2] => Color::rgba(
            channel(*r1, *r2),
            channel(*g1, *g2),
            channel(*b1, *b2),
            channel(*a1, *a2) / 255.0,
        ),
        _ => {
            return Err(nom::Err::Error(E::from_error_kind(
                input,
                nom::error::ErrorKind::LengthValue,
            )));
        }
    };

    Ok((rest, color))
}

/// Parse a number with an optional `%` or angle unit
fn argument<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Arg, E> {
    let start = input;
    let (input, n) = double(input)?;
    // `double` also accepts nan/inf
    if !n.is_finite() {
        return Err(nom::Err::Error(E::from_error_kind(
            start,
            nom::error::ErrorKind::Float,
        )));
    }
    let (input, unit) = opt(alt((
        value("%", char('%')),
        value("deg", tag_no_case("deg")),
    )))(input)?;
    let arg = match unit {
        Some("%") => Arg::Percent(n),
        _ => Arg::Number(n),
    };
    Ok((input, arg))
}

/// Separator between channels: a comma or plain whitespace
fn separator<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    alt((
        value((), tuple((multispace0, char(','), multispace0))),
        value((), multispace1),
    ))(input)
}

/// Parse `name(args [/ alpha])`
fn color_function<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (&'a str, FunctionArgs), E> {
    let (input, name) = take_while1(|c: char| c.is_ascii_alphabetic())(input)?;
    let (input, _) = multispace0(input)?;
    let (input, (channels, alpha)) = delimited(
        tuple((char('('), multispace0)),
        tuple((
            separated_list1(separator::<E>, argument::<E>),
            opt(preceded(
                tuple((multispace0, char('/'), multispace0)),
                argument::<E>,
            )),
        )),
        tuple((multispace0, char(')'))),
    )(input)?;
    Ok((input, (name, FunctionArgs { channels, alpha })))
}

fn build_function_color(input: &str, name: &str, args: FunctionArgs) -> Result<Color> {
    let FunctionArgs {
        mut channels,
        mut alpha,
    } = args;

    // legacy rgba(r, g, b, a)
    if channels.len() == 4 && alpha.is_none() {
        alpha = channels.pop();
    }
    let [c0, c1, c2] = match channels.as_slice() {
        [a, b, c] => [*a, *b, *c],
        _ => return Err(parse_error(input, "expected three color channels")),
    };
    let alpha = alpha.map(|a| a.resolve(1.0).clamp(0.0, 1.0));

    let (space, components) = match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => (
            ColorSpace::Rgb,
            [c0.resolve(255.0), c1.resolve(255.0), c2.resolve(255.0)],
        ),
        "hsl" | "hsla" => (
            ColorSpace::Hsl,
            [c0.resolve(360.0), c1.as_percent(), c2.as_percent()],
        ),
        "oklab" => (
            ColorSpace::Oklab,
            [c0.resolve(1.0), c1.resolve(0.4), c2.resolve(0.4)],
        ),
        "oklch" => (
            ColorSpace::Oklch,
            [c0.resolve(1.0), c1.resolve(0.4), c2.resolve(360.0)],
        ),
        _ => return Err(parse_error(input, "unsupported color function")),
    };

    Ok(Color::new(space, components, alpha))
}

/// Parse named colors
fn parse_named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::from_hex(0xff0000),
        "green" => Color::from_hex(0x008000),
        "lime" => Color::from_hex(0x00ff00),
        "blue" => Color::from_hex(0x0000ff),
        "yellow" => Color::from_hex(0xffff00),
        "cyan" | "aqua" => Color::from_hex(0x00ffff),
        "magenta" | "fuchsia" => Color::from_hex(0xff00ff),
        "gray" | "grey" => Color::from_hex(0x808080),
        "silver" => Color::from_hex(0xc0c0c0),
        "orange" => Color::from_hex(0xffa500),
        "purple" => Color::from_hex(0x800080),
        "pink" => Color::from_hex(0xffc0cb),
        "navy" => Color::from_hex(0x000080),
        "teal" => Color::from_hex(0x008080),
        "rebeccapurple" => Color::from_hex(0x663399),
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#fff").unwrap(), Color::rgb(255.0, 255.0, 255.0));
        assert_eq!(parse_color("#ff8000").unwrap(), Color::rgb(255.0, 128.0, 0.0));

        let c = parse_color("#00000080").unwrap();
        assert!((c.alpha.unwrap() - 128.0 / 255.0).abs() < 1e-9);

        let c = parse_color("#f008").unwrap();
        assert!((c.alpha.unwrap() - 136.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex_rejects_bad_length() {
        assert!(parse_color("#ff").is_err());
        assert!(parse_color("#fffff").is_err());
        assert!(parse_color("#ggg").is_err());
    }

    #[test]
    fn test_parse_rgb_forms() {
        let legacy = parse_color("rgb(255, 0, 128)").unwrap();
        assert!(approx(legacy.components, [255.0, 0.0, 128.0]));
        assert_eq!(legacy.alpha, None);

        let modern = parse_color("rgb(255 0 128 / 0.5)").unwrap();
        assert!(approx(modern.components, [255.0, 0.0, 128.0]));
        assert_eq!(modern.alpha, Some(0.5));

        let rgba = parse_color("rgba(0, 0, 0, 0.25)").unwrap();
        assert_eq!(rgba.alpha, Some(0.25));

        let percent = parse_color("rgb(100% 50% 0% / 50%)").unwrap();
        assert!(approx(percent.components, [255.0, 127.5, 0.0]));
        assert_eq!(percent.alpha, Some(0.5));
    }

    #[test]
    fn test_parse_hsl() {
        let c = parse_color("hsl(210deg 50% 40%)").unwrap();
        assert_eq!(c.space, ColorSpace::Hsl);
        assert!(approx(c.components, [210.0, 50.0, 40.0]));
    }

    #[test]
    fn test_parse_oklch() {
        let c = parse_color("oklch(62.8% 0.2577 29.23 / 0.8)").unwrap();
        assert_eq!(c.space, ColorSpace::Oklch);
        assert!(approx(c.components, [0.628, 0.2577, 29.23]));
        assert_eq!(c.alpha, Some(0.8));

        let c = parse_color("oklch(0.5 100% 120)").unwrap();
        assert!((c.components[1] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_parse_oklab() {
        let c = parse_color("oklab(0.5 -0.1 0.1)").unwrap();
        assert_eq!(c.space, ColorSpace::Oklab);
        assert!(approx(c.components, [0.5, -0.1, 0.1]));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("Black").unwrap(), Color::BLACK);
        assert_eq!(parse_color(" teal ").unwrap(), Color::from_hex(0x008080));
        assert_eq!(parse_color("transparent").unwrap().alpha, Some(0.0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_color(""),
            Err(GradientError::ColorParse { .. })
        ));
        assert!(parse_color("notacolor").is_err());
        assert!(parse_color("rgb(1, 2)").is_err());
        assert!(parse_color("lab(50 20 20)").is_err());
        assert!(parse_color("rgb(1 2 3) trailing").is_err());
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_color("rgb(nan 0 0)").is_err());
        assert!(parse_color("oklch(0.5 inf 120)").is_err());
        assert!(parse_color("hsl(infinity 50% 50%)").is_err());
        assert!(parse_color("rgb(0 0 0 / NaN)").is_err());
    }
}

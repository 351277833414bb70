//! Gradient-Fn CLI
//!
//! Generate eased gradient stops and the CSS custom properties behind the
//! `bg-gradient-fn-*` utilities.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gradfn_core::{
    Direction, EasingSelection, Endpoint, GradientContext, GradientFn, GradientKind,
    InterpolationSpace, PropertyMap, Shape,
};
use gradfn_easing::CubicBezier;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

#[derive(Parser)]
#[command(name = "gradfn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Eased CSS gradient generator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./gradfn.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print concrete oklch() stops between two colors
    Stops {
        /// Start color (CSS color or palette name)
        from: String,

        /// End color (CSS color or palette name)
        to: String,

        #[command(flatten)]
        curve: CurveArgs,

        /// Gradient length in pixels
        #[arg(short, long)]
        length: Option<f64>,
    },

    /// Print the custom properties for a fully specified gradient
    Properties {
        /// Start color (CSS color or palette name)
        from: String,

        /// End color (CSS color or palette name)
        to: String,

        #[command(flatten)]
        curve: CurveArgs,

        /// Gradient length in pixels
        #[arg(short, long)]
        length: Option<f64>,

        /// Linear gradient direction (t, r, b, l, tl, tr, bl, br, ...)
        #[arg(short, long, conflicts_with = "shape")]
        direction: Option<Direction>,

        /// Gradient shape: a direction keyword or `[css_with_underscores]`
        #[arg(long)]
        shape: Option<Shape>,

        /// Gradient function (linear, radial, conic, repeating-*)
        #[arg(short, long)]
        kind: Option<GradientKind>,

        /// Interpolation color space
        #[arg(long)]
        color_space: Option<InterpolationSpace>,

        /// Print JSON instead of CSS declarations
        #[arg(long)]
        json: bool,
    },

    /// Print stepped color-mix() stops driven by the from/to variables
    Mix {
        #[command(flatten)]
        curve: CurveArgs,

        /// Print JSON instead of CSS declarations
        #[arg(long)]
        json: bool,
    },

    /// List registered easing functions
    List,

    /// Print the @property preflight CSS
    Preflight,

    /// Write a starter gradfn.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Timing function selection shared by the generating commands
#[derive(Args)]
struct CurveArgs {
    /// Easing function name
    #[arg(short, long)]
    easing: Option<String>,

    /// Cubic bezier control points, `x1,y1,x2,y2`
    #[arg(short, long, value_parser = parse_bezier, conflicts_with = "easing")]
    bezier: Option<CubicBezier>,

    /// Number of steps (defaults to the configured value)
    #[arg(short, long)]
    steps: Option<u32>,
}

impl CurveArgs {
    fn selection(&self) -> EasingSelection {
        match (&self.bezier, &self.easing) {
            (Some(curve), _) => EasingSelection::Bezier(*curve),
            (None, Some(name)) => EasingSelection::Named(name.clone()),
            (None, None) => EasingSelection::default(),
        }
    }
}

fn parse_bezier(value: &str) -> std::result::Result<CubicBezier, String> {
    let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
    let points = inner
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid control point: {}", e))?;

    match points.as_slice() {
        [x1, y1, x2, y2] => Ok(CubicBezier::new(*x1, *y1, *x2, *y2)),
        _ => Err(format!("expected 4 control points, got {}", points.len())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Commands::Init { force } = cli.command {
        return cmd_init(force);
    }

    let cwd = std::env::current_dir()?;
    let config = config::load(cli.config.as_deref(), &cwd)?;
    let gradient = GradientFn::new(config).context("Invalid configuration")?;

    match cli.command {
        Commands::Stops {
            from,
            to,
            curve,
            length,
        } => cmd_stops(&gradient, &from, &to, &curve, length),

        Commands::Properties {
            from,
            to,
            curve,
            length,
            direction,
            shape,
            kind,
            color_space,
            json,
        } => {
            let layout = Layout {
                direction,
                shape,
                kind,
                color_space,
            };
            cmd_properties(&gradient, &from, &to, &curve, length, &layout, json)
        }

        Commands::Mix { curve, json } => cmd_mix(&gradient, &curve, json),

        Commands::List => cmd_list(&gradient),

        Commands::Preflight => cmd_preflight(&gradient),

        Commands::Init { .. } => Ok(()),
    }
}

fn context(
    gradient: &GradientFn,
    from: &str,
    to: &str,
    curve: &CurveArgs,
    length: Option<f64>,
) -> Result<GradientContext> {
    let from = gradient
        .color(from)
        .with_context(|| format!("Invalid start color '{}'", from))?;
    let to = gradient
        .color(to)
        .with_context(|| format!("Invalid end color '{}'", to))?;

    let mut context = GradientContext::new(curve.selection())
        .with_from(from)
        .with_to(to);
    context.steps = curve.steps;
    context.length = length;
    Ok(context)
}

fn cmd_stops(
    gradient: &GradientFn,
    from: &str,
    to: &str,
    curve: &CurveArgs,
    length: Option<f64>,
) -> Result<()> {
    let context = context(gradient, from, to, curve, length)?;
    let stops = gradient.resolve_stops(&context)?;
    debug!("{} stops", stops.len());

    for stop in stops.iter() {
        println!("{}", stop);
    }
    Ok(())
}

/// Optional layout utilities applied on top of the stops
struct Layout {
    direction: Option<Direction>,
    shape: Option<Shape>,
    kind: Option<GradientKind>,
    color_space: Option<InterpolationSpace>,
}

fn cmd_properties(
    gradient: &GradientFn,
    from: &str,
    to: &str,
    curve: &CurveArgs,
    length: Option<f64>,
    layout: &Layout,
    json: bool,
) -> Result<()> {
    let context = context(gradient, from, to, curve, length)?;

    let mut properties = PropertyMap::new();
    if let Some(space) = layout.color_space {
        properties.extend(gradient.color_space(space));
    }
    // resolved stops replace the shape's placeholder gradient
    if let Some(direction) = layout.direction {
        properties.extend(gradient.direction(direction));
    }
    if let Some(shape) = &layout.shape {
        properties.extend(gradient.shape(shape));
    }
    properties.extend(gradient.resolve(&context)?);
    if let Some(kind) = layout.kind {
        properties.extend(gradient.kind(kind));
    }

    print_properties(&properties, json)
}

fn cmd_mix(gradient: &GradientFn, curve: &CurveArgs, json: bool) -> Result<()> {
    let mut properties = PropertyMap::new();
    properties.extend(gradient.endpoint(Endpoint::From, None));
    properties.extend(gradient.endpoint(Endpoint::To, None));

    let stepped = match curve.selection() {
        EasingSelection::Named(name) => gradient.easing(&name, curve.steps)?,
        EasingSelection::Bezier(bezier) => gradient.bezier(bezier, curve.steps)?,
    };
    properties.extend(stepped);

    print_properties(&properties, json)
}

fn print_properties(properties: &PropertyMap, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(properties)
            .context("Failed to serialize properties")?;
        println!("{}", text);
    } else {
        println!("{}", properties);
    }
    Ok(())
}

fn cmd_list(gradient: &GradientFn) -> Result<()> {
    for name in gradient.registry().names() {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_preflight(gradient: &GradientFn) -> Result<()> {
    println!("{}", gradient.preflight_css());
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    config::write_starter(&cwd, force)?;
    info!("Created {}", cwd.join(config::CONFIG_FILE).display());
    Ok(())
}

//! Color model, parsing and host tokens

pub mod model;
pub mod parse;
pub mod token;

pub use model::{format_number, Color, ColorSpace, Oklch, POWERLESS_CHROMA};
pub use parse::parse_color;
pub use token::{ColorToken, Palette};

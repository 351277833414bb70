//! Host color tokens
//!
//! The host framework resolves theme colors (`blue-500`, `[#123456]`, ...)
//! into tokens before handing them over. A token keeps its display name even
//! when no concrete color stands behind it, e.g. a `currentColor` reference.

use indexmap::IndexMap;

use super::model::Color;
use super::parse::parse_color;
use crate::error::{GradientError, Result};

/// A named color as resolved by the host
#[derive(Clone, Debug, PartialEq)]
pub struct ColorToken {
    /// Stable display name
    pub name: String,
    /// The underlying color, if the name resolved to one
    pub color: Option<Color>,
}

impl ColorToken {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color: Some(color),
        }
    }

    /// A token whose name has no concrete color
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    /// Parse CSS color text into a token named after the text
    pub fn parse(css: &str) -> Result<Self> {
        let color = parse_color(css)?;
        Ok(Self::new(css.trim(), color))
    }

    /// The concrete color, or `UnresolvableColor`
    pub fn resolve(&self) -> Result<&Color> {
        self.color
            .as_ref()
            .ok_or_else(|| GradientError::UnresolvableColor(self.name.clone()))
    }

    /// Value to write into a custom property
    pub fn css_value(&self) -> String {
        match &self.color {
            Some(color) => color.to_string(),
            None => self.name.clone(),
        }
    }
}

impl From<Color> for ColorToken {
    fn from(color: Color) -> Self {
        Self::new(color.to_string(), color)
    }
}

/// Named theme colors
#[derive(Clone, Debug, Default)]
pub struct Palette {
    colors: IndexMap<String, ColorToken>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from `name → css color` pairs
    pub fn from_css<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut palette = Self::new();
        for (name, css) in entries {
            let color = parse_color(css)?;
            palette.insert(name, color);
        }
        Ok(palette)
    }

    pub fn insert(&mut self, name: &str, color: Color) {
        self.colors
            .insert(name.to_string(), ColorToken::new(name, color));
    }

    pub fn get(&self, name: &str) -> Option<&ColorToken> {
        self.colors.get(name)
    }

    /// Resolve a palette name or CSS color text into a token
    pub fn token(&self, value: &str) -> Result<ColorToken> {
        match self.get(value.trim()) {
            Some(token) => Ok(token.clone()),
            None => ColorToken::parse(value),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

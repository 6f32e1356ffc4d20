//! Value types shared by the layout engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CloudError;

/// A weighted input word. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub weight: f64,
}

impl Word {
    /// Build a word, rejecting empty text and non-positive weights.
    pub fn new(text: impl Into<String>, weight: f64) -> Result<Self, CloudError> {
        let word = Self {
            text: text.into(),
            weight,
        };
        word.validate()?;
        Ok(word)
    }

    /// Check the invariants enforced by [`Word::new`].
    ///
    /// Words built with a struct literal or deserialized from JSON skip
    /// `new`, so the layout re-validates every input.
    pub fn validate(&self) -> Result<(), CloudError> {
        if self.text.is_empty() {
            return Err(CloudError::InvalidWord("text is empty".into()));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(CloudError::InvalidWord(format!(
                "'{}' has weight {}, expected a positive number",
                self.text, self.weight
            )));
        }
        Ok(())
    }
}

/// Font family plus an optional external resource it is loaded from.
///
/// Fonts with a `source` must be loaded into the measurer before they can
/// be measured. Loading happens once per distinct source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontFace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl FontFace {
    /// A font the measurer already knows about.
    pub fn installed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
        }
    }

    /// A custom font that has to be loaded from `source` first.
    pub fn custom(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(source.into()),
        }
    }
}

/// RGBA colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);
    pub const LIGHT_GRAY: Color = Color::rgb(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f64 / 255.0)
        };
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#rrggbb`; alpha is dropped.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub(crate) fn is_valid(&self) -> bool {
        [self.r, self.g, self.b, self.alpha]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

/// A word after the weight resolver has chosen how it looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledWord {
    pub text: String,
    pub font: FontFace,
    pub font_size: f64,
    pub color: Color,
}

impl StyledWord {
    pub fn descriptor(&self) -> FontDescriptor {
        FontDescriptor {
            family: self.font.name.clone(),
            size: self.font_size,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CloudError> {
        if self.text.is_empty() {
            return Err(CloudError::InvalidStyle("styled text is empty".into()));
        }
        if self.font.name.is_empty() {
            return Err(CloudError::InvalidStyle(format!(
                "'{}' has no font name",
                self.text
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CloudError::InvalidStyle(format!(
                "'{}' has font size {}",
                self.text, self.font_size
            )));
        }
        if !self.color.is_valid() {
            return Err(CloudError::InvalidStyle(format!(
                "'{}' has a colour channel outside 0..=1",
                self.text
            )));
        }
        Ok(())
    }
}

/// Font family and size as handed to the measurer.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: f64,
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt {}", self.size, self.family)
    }
}

/// Measured extent of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas size. Grows monotonically during one layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

//! Weight resolvers: map a raw [`Word`] to its visual style.
//!
//! Resolvers must be deterministic. The same word always resolves to the
//! same style, so measurements can be cached across growth passes.

use crate::config::LayoutConfig;
use crate::error::CloudError;
use crate::types::{Color, FontFace, StyledWord, Word};

pub trait WeightResolver {
    fn resolve(&self, word: &Word) -> Result<StyledWord, CloudError>;
}

impl<F> WeightResolver for F
where
    F: Fn(&Word) -> Result<StyledWord, CloudError>,
{
    fn resolve(&self, word: &Word) -> Result<StyledWord, CloudError> {
        self(word)
    }
}

/// Linear font size ramp shared by most resolvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRamp {
    pub min: f64,
    pub max: f64,
    pub weight_scale: f64,
}

impl SizeRamp {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            min: config.min_font_size,
            max: config.max_font_size,
            weight_scale: config.weight_scale,
        }
    }

    pub fn size_for(&self, weight: f64) -> f64 {
        (weight / self.weight_scale) * (self.max - self.min) + self.min
    }
}

impl Default for SizeRamp {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

/// The default resolver: one font, one colour, size linear in weight.
#[derive(Debug, Clone)]
pub struct LinearWeight {
    pub font: FontFace,
    pub ramp: SizeRamp,
    pub color: Color,
}

impl LinearWeight {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            font: FontFace::installed(config.font_name.clone()),
            ramp: SizeRamp::from_config(config),
            color: if config.dark_appearance {
                Color::WHITE
            } else {
                Color::BLACK
            },
        }
    }
}

impl Default for LinearWeight {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl WeightResolver for LinearWeight {
    fn resolve(&self, word: &Word) -> Result<StyledWord, CloudError> {
        word.validate()?;
        Ok(StyledWord {
            text: word.text.clone(),
            font: self.font.clone(),
            font_size: self.ramp.size_for(word.weight),
            color: self.color,
        })
    }
}

/// Every word at full size; weight drives opacity instead.
#[derive(Debug, Clone)]
pub struct OpacityWeight {
    pub font: FontFace,
    pub ramp: SizeRamp,
    pub color: Color,
}

impl Default for OpacityWeight {
    fn default() -> Self {
        Self {
            font: FontFace::installed("CourierNewPS-BoldMT"),
            ramp: SizeRamp::default(),
            color: Color::GREEN,
        }
    }
}

impl WeightResolver for OpacityWeight {
    fn resolve(&self, word: &Word) -> Result<StyledWord, CloudError> {
        word.validate()?;
        let alpha = (self.color.alpha * word.weight / self.ramp.weight_scale).clamp(0.0, 1.0);
        Ok(StyledWord {
            text: word.text.clone(),
            font: self.font.clone(),
            font_size: self.ramp.max,
            color: self.color.with_alpha(alpha),
        })
    }
}

/// Linear size, colour alternating between two choices.
///
/// The choice hashes the word text, so a given word keeps its colour.
#[derive(Debug, Clone)]
pub struct TwoToneWeight {
    pub font: FontFace,
    pub ramp: SizeRamp,
    pub colors: [Color; 2],
}

impl Default for TwoToneWeight {
    fn default() -> Self {
        Self {
            font: FontFace::installed("SnellRoundhand-Black"),
            ramp: SizeRamp::default(),
            colors: [Color::RED, Color::GREEN],
        }
    }
}

impl WeightResolver for TwoToneWeight {
    fn resolve(&self, word: &Word) -> Result<StyledWord, CloudError> {
        word.validate()?;
        let pick = word
            .text
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        Ok(StyledWord {
            text: word.text.clone(),
            font: self.font.clone(),
            font_size: self.ramp.size_for(word.weight),
            color: self.colors[(pick % 2) as usize],
        })
    }
}

/// Linear size in an arbitrary, possibly custom, font.
#[derive(Debug, Clone)]
pub struct FixedFontWeight {
    pub font: FontFace,
    pub ramp: SizeRamp,
    pub color: Color,
}

impl FixedFontWeight {
    pub fn new(font: FontFace, color: Color) -> Self {
        Self {
            font,
            ramp: SizeRamp::default(),
            color,
        }
    }

    pub fn spooky() -> Self {
        Self::new(
            FontFace::custom(
                "Lacquer",
                "https://fonts.googleapis.com/css2?family=Lacquer&display=swap",
            ),
            Color::ORANGE,
        )
    }

    pub fn stencil() -> Self {
        Self::new(
            FontFace::custom(
                "Fredericka the Great",
                "https://fonts.googleapis.com/css2?family=Fredericka+the+Great&display=swap",
            ),
            Color::LIGHT_GRAY,
        )
    }
}

impl WeightResolver for FixedFontWeight {
    fn resolve(&self, word: &Word) -> Result<StyledWord, CloudError> {
        word.validate()?;
        Ok(StyledWord {
            text: word.text.clone(),
            font: self.font.clone(),
            font_size: self.ramp.size_for(word.weight),
            color: self.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, weight: f64) -> Word {
        Word::new(text, weight).unwrap()
    }

    #[test]
    fn linear_ramp_hits_both_ends() {
        let resolver = LinearWeight::default();
        assert_eq!(resolver.resolve(&word("a", 10.0)).unwrap().font_size, 60.0);
        assert_eq!(resolver.resolve(&word("a", 5.0)).unwrap().font_size, 35.0);
        let light = resolver.resolve(&word("a", 0.1)).unwrap();
        assert!((light.font_size - 10.5).abs() < 1e-9);
        assert_eq!(light.font.name, "TrebuchetMS-Bold");
    }

    #[test]
    fn dark_appearance_switches_to_white() {
        let config = LayoutConfig {
            dark_appearance: true,
            ..LayoutConfig::default()
        };
        let styled = LinearWeight::from_config(&config)
            .resolve(&word("a", 1.0))
            .unwrap();
        assert_eq!(styled.color, Color::WHITE);
    }

    #[test]
    fn malformed_word_is_rejected() {
        let bad = Word {
            text: "x".into(),
            weight: 0.0,
        };
        assert!(matches!(
            LinearWeight::default().resolve(&bad),
            Err(CloudError::InvalidWord(_))
        ));
    }

    #[test]
    fn opacity_scales_alpha_only() {
        let styled = OpacityWeight::default().resolve(&word("a", 2.5)).unwrap();
        assert_eq!(styled.font_size, 60.0);
        assert!((styled.color.alpha - 0.25).abs() < 1e-9);
        let heavy = OpacityWeight::default().resolve(&word("a", 40.0)).unwrap();
        assert_eq!(heavy.color.alpha, 1.0);
    }

    #[test]
    fn two_tone_is_deterministic() {
        let resolver = TwoToneWeight::default();
        let a = resolver.resolve(&word("Seattle", 3.0)).unwrap();
        let b = resolver.resolve(&word("Seattle", 3.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |w: &Word| -> Result<StyledWord, CloudError> {
            Ok(StyledWord {
                text: w.text.to_uppercase(),
                font: FontFace::installed("Menlo"),
                font_size: 12.0,
                color: Color::RED,
            })
        };
        assert_eq!(resolver.resolve(&word("oslo", 1.0)).unwrap().text, "OSLO");
    }

    #[test]
    fn custom_fonts_carry_their_source() {
        let styled = FixedFontWeight::spooky().resolve(&word("boo", 1.0)).unwrap();
        assert!(styled.font.source.is_some());
    }
}

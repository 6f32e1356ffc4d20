//! Text measurement and its per-run cache.
//!
//! Measuring text is the expensive external step of a layout. The engine
//! only ever talks to a [`MeasureCache`], which asks the underlying
//! [`TextMeasurer`] at most once per `(text, font)` pair and loads every
//! custom font resource once.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{CloudError, MeasureError};
use crate::stats::LayoutStats;
use crate::types::{Dimensions, FontDescriptor, FontFace, StyledWord};

pub trait TextMeasurer {
    /// Make a custom font available. Called once per distinct source.
    fn load_font(&mut self, _font: &FontFace) -> Result<(), MeasureError> {
        Ok(())
    }

    fn measure(&mut self, text: &str, font: &FontDescriptor) -> Result<Dimensions, MeasureError>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn load_font(&mut self, font: &FontFace) -> Result<(), MeasureError> {
        (**self).load_font(font)
    }

    fn measure(&mut self, text: &str, font: &FontDescriptor) -> Result<Dimensions, MeasureError> {
        (**self).measure(text, font)
    }
}

/// Estimates extents from the character count.
///
/// Good enough for tests and previews; assumes every glyph is
/// `advance_em` wide and lines are `height_em` tall.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicMeasurer {
    pub advance_em: f64,
    pub height_em: f64,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            height_em: 1.0,
        }
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&mut self, text: &str, font: &FontDescriptor) -> Result<Dimensions, MeasureError> {
        let chars = text.chars().count() as f64;
        Ok(Dimensions::new(
            self.advance_em * font.size * chars,
            self.height_em * font.size,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    family: String,
    size_bits: u64,
}

impl MeasureKey {
    fn new(text: &str, font: &FontDescriptor) -> Self {
        Self {
            text: text.to_string(),
            family: font.family.clone(),
            size_bits: font.size.to_bits(),
        }
    }
}

/// Memoizing front for a [`TextMeasurer`], valid for one layout run.
///
/// Entries are keyed by text, family name and size; the font `source` is
/// not part of the key, so a family name must map to one font per run.
pub struct MeasureCache<M> {
    measurer: M,
    dimensions: HashMap<MeasureKey, Dimensions>,
    loaded_sources: HashSet<String>,
}

impl<M: TextMeasurer> MeasureCache<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            dimensions: HashMap::new(),
            loaded_sources: HashSet::new(),
        }
    }

    pub fn into_inner(self) -> M {
        self.measurer
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Dimensions of `word` in its resolved font.
    pub fn dimensions(
        &mut self,
        word: &StyledWord,
        stats: &mut LayoutStats,
    ) -> Result<Dimensions, CloudError> {
        let descriptor = word.descriptor();
        let key = MeasureKey::new(&word.text, &descriptor);
        if let Some(dims) = self.dimensions.get(&key) {
            stats.cache_hits += 1;
            return Ok(*dims);
        }

        self.ensure_font(&word.font, &word.text, &descriptor, stats)?;

        stats.measurements += 1;
        let dims = match self.measurer.measure(&word.text, &descriptor) {
            Ok(dims) => dims,
            Err(first) => {
                warn!(text = %word.text, font = %descriptor, error = %first, "measurement failed, retrying once");
                stats.measurements += 1;
                self.measurer
                    .measure(&word.text, &descriptor)
                    .map_err(|source| CloudError::Measurement {
                        text: word.text.clone(),
                        font: descriptor.to_string(),
                        source,
                    })?
            }
        };
        if !valid_dimensions(dims) {
            return Err(CloudError::Measurement {
                text: word.text.clone(),
                font: descriptor.to_string(),
                source: MeasureError::Unavailable(format!(
                    "measurer returned {}x{}",
                    dims.width, dims.height
                )),
            });
        }
        self.dimensions.insert(key, dims);
        Ok(dims)
    }

    fn ensure_font(
        &mut self,
        font: &FontFace,
        text: &str,
        descriptor: &FontDescriptor,
        stats: &mut LayoutStats,
    ) -> Result<(), CloudError> {
        let Some(source) = &font.source else {
            return Ok(());
        };
        if self.loaded_sources.contains(source) {
            return Ok(());
        }
        debug!(font = %font.name, source = %source, "loading custom font");
        self.measurer
            .load_font(font)
            .map_err(|source| CloudError::Measurement {
                text: text.to_string(),
                font: descriptor.to_string(),
                source,
            })?;
        stats.fonts_loaded += 1;
        self.loaded_sources.insert(source.clone());
        Ok(())
    }
}

fn valid_dimensions(dims: Dimensions) -> bool {
    dims.width.is_finite() && dims.height.is_finite() && dims.width >= 0.0 && dims.height >= 0.0
}

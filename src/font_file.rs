//! Text measurement from TrueType/OpenType font files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;
use ttf_parser::{Face, GlyphId};

use crate::error::MeasureError;
use crate::errors::format_io_error;
use crate::measure::TextMeasurer;
use crate::types::{Dimensions, FontDescriptor, FontFace};

/// Measures text with the horizontal advances of registered font files.
///
/// Width is the sum of glyph advances; height is ascender minus descender.
/// Both are scaled by `size / units_per_em`.
#[derive(Debug, Default)]
pub struct FontFileMeasurer {
    fonts: HashMap<String, Vec<u8>>,
}

impl FontFileMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(family)
    }

    /// Register font bytes under `family`, rejecting data that does not parse.
    pub fn register_bytes(&mut self, family: &str, data: Vec<u8>) -> Result<(), MeasureError> {
        if let Err(err) = Face::parse(&data, 0) {
            return Err(MeasureError::FontLoad {
                font: family.to_string(),
                reason: err.to_string(),
            });
        }
        self.fonts.insert(family.to_string(), data);
        Ok(())
    }

    pub fn register_file(&mut self, family: &str, path: impl AsRef<Path>) -> Result<(), MeasureError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| MeasureError::FontLoad {
            font: family.to_string(),
            reason: format_io_error("reading font", path, &err),
        })?;
        debug!(family, path = %path.display(), bytes = data.len(), "registered font file");
        self.register_bytes(family, data)
    }
}

impl TextMeasurer for FontFileMeasurer {
    /// Treat the font's `source` as a file path.
    fn load_font(&mut self, font: &FontFace) -> Result<(), MeasureError> {
        if self.contains(&font.name) {
            return Ok(());
        }
        match &font.source {
            Some(path) => self.register_file(&font.name, path),
            None => Err(MeasureError::UnknownFont(font.name.clone())),
        }
    }

    fn measure(&mut self, text: &str, font: &FontDescriptor) -> Result<Dimensions, MeasureError> {
        let data = self
            .fonts
            .get(&font.family)
            .ok_or_else(|| MeasureError::UnknownFont(font.family.clone()))?;
        let face = Face::parse(data, 0).map_err(|err| MeasureError::FontLoad {
            font: font.family.clone(),
            reason: err.to_string(),
        })?;

        let units = face.units_per_em().max(1) as f64;
        let advance_units: u64 = text
            .chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
                face.glyph_hor_advance(glyph).unwrap_or(0) as u64
            })
            .sum();
        let height_units = face.ascender() as f64 - face.descender() as f64;
        let scale = font.size / units;
        Ok(Dimensions::new(advance_units as f64 * scale, height_units * scale))
    }
}

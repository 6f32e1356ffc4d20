#![allow(dead_code)]

use std::collections::HashMap;

use spiral_cloud::{Dimensions, FontDescriptor, Hitbox, LayoutResult, MeasureError, TextMeasurer, Word};

/// Measurer with hand-picked dimensions per text.
#[derive(Default)]
pub struct FixedMeasurer {
    pub sizes: HashMap<String, Dimensions>,
    pub calls: usize,
}

impl FixedMeasurer {
    pub fn new(entries: &[(&str, f64, f64)]) -> Self {
        Self {
            sizes: entries
                .iter()
                .map(|(t, w, h)| (t.to_string(), Dimensions::new(*w, *h)))
                .collect(),
            calls: 0,
        }
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&mut self, text: &str, _font: &FontDescriptor) -> Result<Dimensions, MeasureError> {
        self.calls += 1;
        self.sizes
            .get(text)
            .copied()
            .ok_or_else(|| MeasureError::Unavailable(format!("no size for {text}")))
    }
}

pub fn words(items: &[(&str, f64)]) -> Vec<Word> {
    items.iter().map(|(t, w)| Word::new(*t, *w).unwrap()).collect()
}

pub fn final_hitboxes(result: &LayoutResult) -> Vec<Hitbox> {
    result.placed.iter().map(|p| p.hitbox(result.canvas)).collect()
}

/// Panics if two placed words overlap or one crosses the border.
pub fn assert_invariants(result: &LayoutResult, buffer: f64) {
    let boxes = final_hitboxes(result);
    for (i, a) in boxes.iter().enumerate() {
        assert!(!a.outside(result.canvas, buffer), "word {i} crosses the border: {a:?}");
        for (j, b) in boxes.iter().enumerate().skip(i + 1) {
            assert!(!a.collides(b, buffer), "words {i} and {j} overlap: {a:?} {b:?}");
        }
    }
    assert!(result.canvas.width >= result.provided.width);
    assert!(result.canvas.height >= result.provided.height);
}

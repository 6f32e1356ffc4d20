//! The layout orchestrator.
//!
//! One call to [`WordCloud::layout`] resolves every word's style, measures
//! it once, optionally grows the canvas up front, then runs placement
//! passes until every word is placed or, with grow-to-fit off, every word
//! has been tried once.
//!
//! Placed words are stored as offsets from the canvas centre. When the
//! canvas grows, they are replayed from those offsets instead of being
//! searched again, so earlier words keep their relative positions and the
//! cloud only expands outward.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::collision::CollisionEngine;
use crate::config::LayoutConfig;
use crate::error::CloudError;
use crate::growth::{grow_once, preflight, GrowthFunction, ProportionalGrowth};
use crate::hitbox::Hitbox;
use crate::measure::{MeasureCache, TextMeasurer};
use crate::placement::{trace_path, Breaches, Frame, Placement, SpiralPlacement};
use crate::stats::LayoutStats;
use crate::types::{Dimensions, Point, Size, StyledWord, Word};
use crate::weight::{LinearWeight, WeightResolver};

/// A word fixed on the canvas, relative to the canvas centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub word: StyledWord,
    pub dimensions: Dimensions,
    /// Offset of the word's centre from the canvas centre.
    pub offset: Point,
}

impl PlacedWord {
    pub fn center(&self, canvas: Size) -> Point {
        let c = canvas.center();
        Point::new(c.x + self.offset.x, c.y + self.offset.y)
    }

    pub fn hitbox(&self, canvas: Size) -> Hitbox {
        Hitbox::centered(self.center(canvas), self.dimensions)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    /// Final canvas size. Never smaller than `provided`.
    pub canvas: Size,
    /// Size the caller asked for.
    pub provided: Size,
    /// Placed words in placement order.
    pub placed: Vec<PlacedWord>,
    /// Words that found no slot. Always empty when growing to fit.
    pub unplaced: Vec<StyledWord>,
    /// Hitboxes registered during the last placement pass.
    pub hitboxes: Vec<Hitbox>,
    pub stats: LayoutStats,
    /// Placement path over the final canvas, when debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<Point>>,
}

impl LayoutResult {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn to_json(&self) -> Result<String, CloudError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Register the hitboxes of already placed words on a fresh engine.
///
/// No collision search happens here; the offsets are trusted.
pub fn replay(placed: &[PlacedWord], canvas: Size, buffer: f64) -> CollisionEngine {
    let mut engine = CollisionEngine::new(canvas, buffer);
    replay_into(&mut engine, placed);
    engine
}

fn replay_into(engine: &mut CollisionEngine, placed: &[PlacedWord]) {
    let canvas = engine.canvas();
    for word in placed {
        engine.register(word.hitbox(canvas));
    }
}

/// Word cloud layout with pluggable style, path and growth.
pub struct WordCloud<P = SpiralPlacement> {
    config: LayoutConfig,
    weight: Box<dyn WeightResolver>,
    placement: P,
    growth: Box<dyn GrowthFunction>,
}

impl WordCloud<SpiralPlacement> {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            weight: Box::new(LinearWeight::from_config(&config)),
            placement: SpiralPlacement::default(),
            growth: Box::new(ProportionalGrowth {
                factor: config.growth_factor,
            }),
            config,
        }
    }
}

impl Default for WordCloud<SpiralPlacement> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

enum Search {
    Placed(PlacedWord),
    Failed,
}

impl<P: Placement> WordCloud<P> {
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn with_weight<W: WeightResolver + 'static>(mut self, weight: W) -> Self {
        self.weight = Box::new(weight);
        self
    }

    pub fn with_growth<G: GrowthFunction + 'static>(mut self, growth: G) -> Self {
        self.growth = Box::new(growth);
        self
    }

    pub fn with_placement<Q: Placement>(self, placement: Q) -> WordCloud<Q> {
        WordCloud {
            config: self.config,
            weight: self.weight,
            placement,
            growth: self.growth,
        }
    }

    /// Lay out `words` in input order on a canvas of at least `size`.
    pub fn layout<M: TextMeasurer>(
        &self,
        size: Size,
        words: &[Word],
        measurer: M,
    ) -> Result<LayoutResult, CloudError> {
        self.config.validate()?;
        if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0) {
            return Err(CloudError::Config(format!(
                "canvas must be positive, got {}x{}",
                size.width, size.height
            )));
        }

        let mut stats = LayoutStats::new();
        let styled = words
            .iter()
            .map(|word| -> Result<StyledWord, CloudError> {
                word.validate()?;
                let styled = self.weight.resolve(word)?;
                styled.validate()?;
                Ok(styled)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut cache = MeasureCache::new(measurer);
        let dims = styled
            .iter()
            .map(|word| cache.dimensions(word, &mut stats))
            .collect::<Result<Vec<_>, CloudError>>()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut canvas = size;
        if self.config.grow_to_fit {
            canvas = preflight(
                &dims,
                canvas,
                size,
                self.growth.as_ref(),
                self.config.max_growth_iterations,
                &mut stats,
            )?;
        }

        let mut pending: VecDeque<usize> = (0..styled.len()).collect();
        let mut placed: Vec<PlacedWord> = Vec::with_capacity(styled.len());
        let mut unplaced: Vec<StyledWord> = Vec::new();
        let mut engine = CollisionEngine::new(canvas, self.config.buffer);
        let mut runtime_growths = 0usize;

        loop {
            engine.reset(canvas);
            let frame = Frame::new(canvas, size);
            stats.passes += 1;

            debug!(count = placed.len(), width = canvas.width, height = canvas.height, "replaying placed words");
            replay_into(&mut engine, &placed);

            debug!(count = pending.len(), "placing pending words");
            while let Some(&index) = pending.front() {
                match self.search(&styled[index], dims[index], &mut engine, &frame, &mut rng, &mut stats) {
                    Search::Placed(word) => {
                        trace!(text = %word.word.text, x = word.offset.x, y = word.offset.y, "placed");
                        placed.push(word);
                        pending.pop_front();
                    }
                    Search::Failed if self.config.grow_to_fit => break,
                    Search::Failed => {
                        debug!(text = %styled[index].text, "no room for word");
                        unplaced.push(styled[index].clone());
                        pending.pop_front();
                    }
                }
            }

            if pending.is_empty() {
                break;
            }

            if runtime_growths >= self.config.max_growth_iterations {
                return Err(CloudError::GrowthLimit {
                    iterations: runtime_growths,
                    width: canvas.width,
                    height: canvas.height,
                });
            }
            canvas = grow_once(self.growth.as_ref(), canvas, size)?;
            runtime_growths += 1;
            stats.runtime_growths += 1;
            info!(
                pending = pending.len(),
                width = canvas.width,
                height = canvas.height,
                "words did not fit, growing canvas"
            );
        }

        let trace = self.config.debug.then(|| {
            trace_path(
                &self.placement,
                &Frame::new(canvas, size),
                &mut rng,
                self.config.max_placement_steps,
            )
        });

        stats.finish();
        stats.report();
        Ok(LayoutResult {
            canvas,
            provided: size,
            placed,
            unplaced,
            hitboxes: engine.hitboxes().to_vec(),
            stats,
            trace,
        })
    }

    /// Walk the placement path for one word until it fits or gives up.
    fn search(
        &self,
        word: &StyledWord,
        dims: Dimensions,
        engine: &mut CollisionEngine,
        frame: &Frame,
        rng: &mut dyn RngCore,
        stats: &mut LayoutStats,
    ) -> Search {
        let canvas = frame.canvas;
        let mut breaches = Breaches::default();
        let mut state: Option<P::State> = None;

        for _ in 0..self.config.max_placement_steps {
            let (point, next) = self.placement.place(frame, state.as_ref(), rng);
            state = Some(next);
            stats.candidates += 1;
            breaches.observe(point, canvas);

            if engine.point_inside_any(point.x, point.y) {
                stats.point_rejections += 1;
            } else {
                let candidate = PlacedWord {
                    word: word.clone(),
                    dimensions: dims,
                    offset: Point::new(point.x - frame.center.x, point.y - frame.center.y),
                };
                let hitbox = candidate.hitbox(canvas);
                if engine.rect_collides(&hitbox) {
                    stats.rect_collisions += 1;
                    trace!(text = %word.text, x = point.x, y = point.y, "candidate collides");
                } else if engine.rect_outside_canvas(&hitbox) {
                    stats.border_rejections += 1;
                    trace!(text = %word.text, x = point.x, y = point.y, "candidate crosses border");
                    if self.config.grow_to_fit && self.config.tight_packing {
                        return Search::Failed;
                    }
                } else {
                    engine.register(hitbox);
                    return Search::Placed(candidate);
                }
            }

            if breaches.all() {
                return Search::Failed;
            }
        }
        Search::Failed
    }
}

/// Lay out `words` with the default resolver, spiral and growth.
pub fn layout<M: TextMeasurer>(
    size: Size,
    words: &[Word],
    config: &LayoutConfig,
    measurer: M,
) -> Result<LayoutResult, CloudError> {
    WordCloud::new(config.clone()).layout(size, words, measurer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HeuristicMeasurer;
    use crate::placement::RosettePlacement;

    fn seeded() -> LayoutConfig {
        LayoutConfig {
            seed: Some(42),
            ..LayoutConfig::default()
        }
    }

    fn words(items: &[(&str, f64)]) -> Vec<Word> {
        items
            .iter()
            .map(|(t, w)| Word::new(*t, *w).unwrap())
            .collect()
    }

    #[test]
    fn first_word_lands_on_center() {
        let result = layout(
            Size::new(300.0, 300.0),
            &words(&[("Seattle", 10.0)]),
            &seeded(),
            HeuristicMeasurer::default(),
        )
        .unwrap();
        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.placed[0].offset, Point::new(0.0, 0.0));
        assert_eq!(result.canvas, Size::new(300.0, 300.0));
    }

    #[test]
    fn empty_input_is_trivially_complete() {
        let result = layout(Size::new(50.0, 50.0), &[], &seeded(), HeuristicMeasurer::default()).unwrap();
        assert!(result.placed.is_empty());
        assert!(result.is_complete());
        assert_eq!(result.canvas, Size::new(50.0, 50.0));
    }

    #[test]
    fn invalid_word_aborts() {
        let bad = vec![Word {
            text: String::new(),
            weight: 1.0,
        }];
        let err = layout(Size::new(50.0, 50.0), &bad, &seeded(), HeuristicMeasurer::default()).unwrap_err();
        assert!(matches!(err, CloudError::InvalidWord(_)));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let err = layout(
            Size::new(0.0, 10.0),
            &words(&[("a", 1.0)]),
            &seeded(),
            HeuristicMeasurer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CloudError::Config(_)));
    }

    #[test]
    fn same_seed_same_layout() {
        let input = words(&[("Seattle", 10.0), ("Boston", 8.0), ("Denver", 6.0), ("Oslo", 3.0)]);
        let a = layout(Size::new(250.0, 250.0), &input, &seeded(), HeuristicMeasurer::default()).unwrap();
        let b = layout(Size::new(250.0, 250.0), &input, &seeded(), HeuristicMeasurer::default()).unwrap();
        assert_eq!(a.canvas, b.canvas);
        assert_eq!(a.placed, b.placed);
    }

    #[test]
    fn rosette_paths_also_lay_out() {
        let input = words(&[("Paris", 4.0), ("Tokyo", 2.0), ("Fort", 1.0)]);
        let result = WordCloud::new(seeded())
            .with_placement(RosettePlacement::galaxy())
            .layout(Size::new(250.0, 250.0), &input, HeuristicMeasurer::default())
            .unwrap();
        assert_eq!(result.placed.len(), 3);
    }

    #[test]
    fn debug_records_trace() {
        let config = LayoutConfig {
            debug: true,
            ..seeded()
        };
        let result = layout(
            Size::new(100.0, 100.0),
            &words(&[("Oslo", 1.0)]),
            &config,
            HeuristicMeasurer::default(),
        )
        .unwrap();
        let trace = result.trace.expect("trace requested");
        assert!(!trace.is_empty());
        assert_eq!(trace[0], result.canvas.center());
    }

    #[test]
    fn result_serializes() {
        let result = layout(
            Size::new(200.0, 120.0),
            &words(&[("Dublin", 3.0)]),
            &seeded(),
            HeuristicMeasurer::default(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["placed"][0]["word"]["text"], "Dublin");
        assert!(json.get("trace").is_none());
    }
}

//! Canvas growth: the growth function itself and the preflight sizing
//! pass that runs before any word is placed.

use tracing::info;

use crate::error::CloudError;
use crate::stats::LayoutStats;
use crate::types::{Dimensions, Size};

pub trait GrowthFunction {
    /// Next canvas size after `current`. `provided` is the size the caller
    /// originally asked for.
    fn grow(&self, current: Size, provided: Size) -> Size;
}

impl<F> GrowthFunction for F
where
    F: Fn(Size, Size) -> Size,
{
    fn grow(&self, current: Size, provided: Size) -> Size {
        self(current, provided)
    }
}

/// Adds `factor` of the current size to each side.
#[derive(Debug, Clone, Copy)]
pub struct ProportionalGrowth {
    pub factor: f64,
}

impl Default for ProportionalGrowth {
    fn default() -> Self {
        Self { factor: 0.1 }
    }
}

impl GrowthFunction for ProportionalGrowth {
    fn grow(&self, current: Size, _provided: Size) -> Size {
        Size::new(
            current.width + current.width * self.factor,
            current.height + current.height * self.factor,
        )
    }
}

/// Apply `growth` once, refusing to shrink and failing if nothing grew.
pub fn grow_once<G: GrowthFunction + ?Sized>(
    growth: &G,
    current: Size,
    provided: Size,
) -> Result<Size, CloudError> {
    let proposed = growth.grow(current, provided);
    let next = Size::new(
        proposed.width.max(current.width),
        proposed.height.max(current.height),
    );
    let finite = next.width.is_finite() && next.height.is_finite();
    if !finite || (next.width <= current.width && next.height <= current.height) {
        return Err(CloudError::GrowthStalled {
            width: current.width,
            height: current.height,
        });
    }
    Ok(next)
}

/// Aggregate size requirements of a word set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WordStats {
    pub max_width: f64,
    pub max_height: f64,
    pub total_area: f64,
}

impl WordStats {
    pub fn collect(dims: &[Dimensions]) -> Self {
        dims.iter().fold(Self::default(), |acc, d| Self {
            max_width: acc.max_width.max(d.width),
            max_height: acc.max_height.max(d.height),
            total_area: acc.total_area + d.area(),
        })
    }
}

/// Minimum `(width, height)` forced by words too large to sit side by side.
///
/// Words wider than half the canvas have to stack vertically, so their
/// heights add up; likewise widths of words taller than half the canvas.
/// Depends on `canvas`, so it is re-evaluated after every growth step.
pub fn stacked_min(dims: &[Dimensions], canvas: Size) -> (f64, f64) {
    let mut stacked_width = 0.0;
    let mut stacked_height = 0.0;
    for d in dims {
        if d.width > canvas.width / 2.0 {
            stacked_height += d.height;
        }
        if d.height > canvas.height / 2.0 {
            stacked_width += d.width;
        }
    }
    (stacked_width, stacked_height)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortfall {
    Dimensions,
    Area,
    Stacked,
}

fn shortfall(stats: &WordStats, dims: &[Dimensions], canvas: Size) -> Option<Shortfall> {
    if stats.max_width > canvas.width || stats.max_height > canvas.height {
        return Some(Shortfall::Dimensions);
    }
    if stats.total_area > canvas.area() {
        return Some(Shortfall::Area);
    }
    let (stacked_width, stacked_height) = stacked_min(dims, canvas);
    if stacked_width > canvas.width || stacked_height > canvas.height {
        return Some(Shortfall::Stacked);
    }
    None
}

/// Grow `start` until it could plausibly hold every word.
///
/// All three conditions are rechecked after each step; growth on one axis
/// changes the half-canvas threshold of the stacked check.
pub fn preflight<G: GrowthFunction + ?Sized>(
    dims: &[Dimensions],
    start: Size,
    provided: Size,
    growth: &G,
    max_iterations: usize,
    stats: &mut LayoutStats,
) -> Result<Size, CloudError> {
    let word_stats = WordStats::collect(dims);
    let mut canvas = start;
    let mut iterations = 0;
    while let Some(reason) = shortfall(&word_stats, dims, canvas) {
        if iterations >= max_iterations {
            return Err(CloudError::GrowthLimit {
                iterations,
                width: canvas.width,
                height: canvas.height,
            });
        }
        canvas = grow_once(growth, canvas, provided)?;
        iterations += 1;
        stats.preflight_growths += 1;
        info!(?reason, width = canvas.width, height = canvas.height, "preflight growth");
    }
    Ok(canvas)
}

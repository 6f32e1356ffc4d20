//! `LayoutStats` counts the work done by one layout run. It does no
//! logging of its own until [`LayoutStats::report`] is called.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct LayoutStats {
    #[serde(skip)]
    start_time: Instant,
    /// Candidate points produced by the placement function.
    pub candidates: u64,
    /// Candidates skipped because the point fell inside a placed hitbox.
    pub point_rejections: u64,
    /// Candidates whose hitbox overlapped a placed word.
    pub rect_collisions: u64,
    /// Candidates whose hitbox crossed the canvas border.
    pub border_rejections: u64,
    /// Calls made to the text measurer, retries included.
    pub measurements: u64,
    pub cache_hits: u64,
    pub fonts_loaded: u64,
    pub preflight_growths: u64,
    pub runtime_growths: u64,
    /// Placement passes over the pending words.
    pub passes: u64,
    pub elapsed_ms: u64,
}

impl LayoutStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            candidates: 0,
            point_rejections: 0,
            rect_collisions: 0,
            border_rejections: 0,
            measurements: 0,
            cache_hits: 0,
            fonts_loaded: 0,
            preflight_growths: 0,
            runtime_growths: 0,
            passes: 0,
            elapsed_ms: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub(crate) fn finish(&mut self) {
        self.elapsed_ms = self.elapsed().as_millis() as u64;
    }

    pub fn growths(&self) -> u64 {
        self.preflight_growths + self.runtime_growths
    }

    pub fn report(&self) {
        info!(
            elapsed_ms = self.elapsed_ms,
            passes = self.passes,
            candidates = self.candidates,
            point_rejections = self.point_rejections,
            rect_collisions = self.rect_collisions,
            border_rejections = self.border_rejections,
            measurements = self.measurements,
            cache_hits = self.cache_hits,
            fonts_loaded = self.fonts_loaded,
            preflight_growths = self.preflight_growths,
            runtime_growths = self.runtime_growths,
            "layout finished"
        );
    }
}

impl Default for LayoutStats {
    fn default() -> Self {
        Self::new()
    }
}

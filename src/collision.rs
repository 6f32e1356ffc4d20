//! Bookkeeping of placed hitboxes for one canvas size.

use crate::hitbox::Hitbox;
use crate::types::Size;

#[derive(Debug, Clone)]
pub struct CollisionEngine {
    canvas: Size,
    buffer: f64,
    hitboxes: Vec<Hitbox>,
}

impl CollisionEngine {
    pub fn new(canvas: Size, buffer: f64) -> Self {
        Self {
            canvas,
            buffer,
            hitboxes: Vec::new(),
        }
    }

    /// Drop every hitbox and adopt a new canvas size.
    pub fn reset(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.hitboxes.clear();
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    pub fn register(&mut self, hitbox: Hitbox) {
        self.hitboxes.push(hitbox);
    }

    pub fn rect_collides(&self, candidate: &Hitbox) -> bool {
        self.hitboxes
            .iter()
            .any(|placed| candidate.collides(placed, self.buffer))
    }

    /// Cheap pre-check run before a candidate hitbox is built.
    pub fn point_inside_any(&self, x: f64, y: f64) -> bool {
        self.hitboxes
            .iter()
            .any(|placed| placed.contains_point(x, y, self.buffer))
    }

    pub fn rect_outside_canvas(&self, candidate: &Hitbox) -> bool {
        candidate.outside(self.canvas, self.buffer)
    }
}

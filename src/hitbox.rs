use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, Point, Size};

/// Axis-aligned rectangle in canvas coordinates.
///
/// Stored unbuffered. The buffer margin is applied by the checks below, so
/// the same box can be checked against different buffers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Hitbox {
    /// Box of `dims` centred on `center`.
    pub fn centered(center: Point, dims: Dimensions) -> Self {
        let min_x = center.x - dims.width / 2.0;
        let min_y = center.y - dims.height / 2.0;
        Self {
            min_x,
            min_y,
            max_x: min_x + dims.width,
            max_y: min_y + dims.height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Standard interval-overlap test on both axes, with `other` inflated
    /// by `buffer` on every side.
    pub fn collides(&self, other: &Hitbox, buffer: f64) -> bool {
        self.min_x < other.max_x + buffer
            && self.max_x > other.min_x - buffer
            && self.min_y < other.max_y + buffer
            && self.max_y > other.min_y - buffer
    }

    /// Whether `(x, y)` lies strictly inside this box inflated by `buffer`.
    pub fn contains_point(&self, x: f64, y: f64, buffer: f64) -> bool {
        x < self.max_x + buffer
            && x > self.min_x - buffer
            && y < self.max_y + buffer
            && y > self.min_y - buffer
    }

    /// Whether any edge crosses the canvas border pulled in by `buffer`.
    pub fn outside(&self, canvas: Size, buffer: f64) -> bool {
        self.min_x < buffer
            || self.max_x > canvas.width - buffer
            || self.min_y < buffer
            || self.max_y > canvas.height - buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> Hitbox {
        Hitbox::centered(Point::new(x, y), Dimensions::new(w, h))
    }

    #[test]
    fn buffer_separates_neighbours() {
        let a = boxed(50.0, 50.0, 20.0, 10.0);
        // 5 units of clear space between the two boxes.
        let b = boxed(75.0, 50.0, 20.0, 10.0);
        assert!(!a.collides(&b, 0.0));
        assert!(!a.collides(&b, 5.0));
        assert!(a.collides(&b, 5.5));
    }

    #[test]
    fn point_inside_inflated_box() {
        let a = boxed(50.0, 50.0, 20.0, 10.0);
        assert!(a.contains_point(50.0, 50.0, 0.0));
        assert!(!a.contains_point(65.0, 50.0, 0.0));
        assert!(a.contains_point(65.0, 50.0, 10.0));
    }

    #[test]
    fn border_check_is_inset_by_buffer() {
        let canvas = Size::new(100.0, 100.0);
        assert!(!boxed(50.0, 50.0, 80.0, 20.0).outside(canvas, 10.0));
        assert!(boxed(50.0, 50.0, 81.0, 20.0).outside(canvas, 10.0));
        assert!(boxed(5.0, 50.0, 4.0, 4.0).outside(canvas, 10.0));
    }

    quickcheck! {
        fn collision_is_symmetric(ax: i16, ay: i16, bx: i16, by: i16, w: u8, h: u8, buffer: u8) -> bool {
            let a = boxed(ax as f64, ay as f64, w as f64 + 1.0, h as f64 + 1.0);
            let b = boxed(bx as f64, by as f64, h as f64 + 1.0, w as f64 + 1.0);
            a.collides(&b, buffer as f64) == b.collides(&a, buffer as f64)
        }
    }
}

//! Placement functions: generators of candidate centre points.
//!
//! A placement function is called repeatedly for one word. Each call gets
//! the state it returned last time (`None` on the first call for a word)
//! and yields the next point to try. State never carries over between
//! words.

use std::f64::consts::PI;
use std::fmt;

use rand::{Rng, RngCore};

use crate::types::{Point, Size};

/// Geometry handed to a placement function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub canvas: Size,
    pub center: Point,
    /// `width / longest side` of the requested canvas, for stretching paths.
    pub x_ratio: f64,
    /// `height / longest side` of the requested canvas.
    pub y_ratio: f64,
}

impl Frame {
    /// Frame over `canvas`, with stretch ratios taken from `requested`.
    ///
    /// The ratios follow the size the caller asked for rather than the
    /// grown canvas, so the path shape is stable across growth.
    pub fn new(canvas: Size, requested: Size) -> Self {
        let longest = requested.width.max(requested.height);
        let (x_ratio, y_ratio) = if longest > 0.0 {
            (requested.width / longest, requested.height / longest)
        } else {
            (1.0, 1.0)
        };
        Self {
            canvas,
            center: canvas.center(),
            x_ratio,
            y_ratio,
        }
    }
}

pub trait Placement {
    type State: Clone + fmt::Debug;

    fn place(
        &self,
        frame: &Frame,
        previous: Option<&Self::State>,
        rng: &mut dyn RngCore,
    ) -> (Point, Self::State);
}

/// Outward spiral from the centre. Each word draws its own radius and
/// angle directions to avoid every word drifting the same way.
#[derive(Debug, Clone, Copy)]
pub struct SpiralPlacement {
    pub radius_step: f64,
    pub steps_per_turn: f64,
}

impl Default for SpiralPlacement {
    fn default() -> Self {
        Self {
            radius_step: 0.75,
            steps_per_turn: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralState {
    pub radius: f64,
    pub angle: f64,
    pub radius_direction: f64,
    pub angle_direction: f64,
}

fn coin(rng: &mut dyn RngCore) -> f64 {
    if rng.gen_bool(0.5) {
        -1.0
    } else {
        1.0
    }
}

impl Placement for SpiralPlacement {
    type State = SpiralState;

    fn place(
        &self,
        frame: &Frame,
        previous: Option<&SpiralState>,
        rng: &mut dyn RngCore,
    ) -> (Point, SpiralState) {
        let state = match previous {
            Some(prev) => SpiralState {
                radius: prev.radius + self.radius_step * prev.radius_direction,
                angle: prev.angle + (2.0 * PI) / self.steps_per_turn * prev.angle_direction,
                ..*prev
            },
            None => SpiralState {
                radius: 0.0,
                angle: 0.0,
                radius_direction: coin(rng),
                angle_direction: coin(rng),
            },
        };
        let point = Point::new(
            frame.center.x + state.radius * state.angle.cos() * frame.x_ratio,
            frame.center.y + state.radius * state.angle.sin() * frame.y_ratio,
        );
        (point, state)
    }
}

/// Curve `scale·θ·(cos kθ, sin kθ)` with `θ = π·range/500·i`.
///
/// Both the galaxy and star paths are instances of it.
#[derive(Debug, Clone, Copy)]
pub struct RosettePlacement {
    pub scale: f64,
    pub dots: f64,
    pub range: f64,
}

impl RosettePlacement {
    pub fn galaxy() -> Self {
        Self {
            scale: 2.0,
            dots: 10.0,
            range: 234.0,
        }
    }

    pub fn star() -> Self {
        Self {
            scale: 0.25,
            dots: 100.0,
            range: 336.0,
        }
    }
}

impl Placement for RosettePlacement {
    /// Step index.
    type State = u64;

    fn place(&self, frame: &Frame, previous: Option<&u64>, _rng: &mut dyn RngCore) -> (Point, u64) {
        let i = previous.map_or(0, |i| i + 1);
        let angle = PI * self.range / 500.0 * i as f64;
        let point = Point::new(
            self.scale * angle * (self.dots * angle).cos() + frame.center.x,
            self.scale * angle * (self.dots * angle).sin() + frame.center.y,
        );
        (point, i)
    }
}

/// Tracks which canvas sides a search path has crossed.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Breaches {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl Breaches {
    pub(crate) fn observe(&mut self, point: Point, canvas: Size) {
        self.left |= point.x < 0.0;
        self.right |= point.x > canvas.width;
        self.top |= point.y < 0.0;
        self.bottom |= point.y > canvas.height;
    }

    pub(crate) fn all(&self) -> bool {
        self.left && self.right && self.top && self.bottom
    }
}

/// Walk a placement function from a fresh state until it has left the
/// canvas on all four sides, returning every point visited.
pub fn trace_path<P: Placement + ?Sized>(
    placement: &P,
    frame: &Frame,
    rng: &mut dyn RngCore,
    max_steps: usize,
) -> Vec<Point> {
    let mut points = Vec::new();
    let mut breaches = Breaches::default();
    let mut state: Option<P::State> = None;
    while !breaches.all() && points.len() < max_steps {
        let (point, next) = placement.place(frame, state.as_ref(), rng);
        breaches.observe(point, frame.canvas);
        points.push(point);
        state = Some(next);
    }
    points
}

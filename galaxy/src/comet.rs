//! Comets and their fading trails.

use rand::Rng;
use std::collections::VecDeque;

use crate::surface::{DrawSurface, Point, Rgba, Viewport};

pub const COMET_COLORS: [Rgba; 4] = [
    Rgba::new(0, 245, 255, 0.8),
    Rgba::new(255, 255, 255, 0.9),
    Rgba::new(255, 200, 100, 0.7),
    Rgba::new(100, 255, 200, 0.6),
];

/// Comets enter and leave this far outside the viewport.
pub const OFFSCREEN_MARGIN: f32 = 100.0;

/// Fixed-capacity FIFO of recent positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailBuffer {
    points: VecDeque<Point>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once full.
    pub fn push(&mut self, point: Point) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<Point> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Consecutive segments, oldest first, with their index (1-based).
    pub fn segments(&self) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .enumerate()
            .map(|(i, (a, b))| (i + 1, *a, *b))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comet {
    pub position: Point,
    pub velocity: Point,
    pub size: f32,
    pub color: Rgba,
    pub opacity: f32,
    pub trail: TrailBuffer,
}

impl Comet {
    /// A new comet just off the left edge, in the middle band of the viewport.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        speed: f32,
        trail_length: usize,
    ) -> Self {
        let y = rng.gen::<f32>() * viewport.height * 0.6 + viewport.height * 0.2;
        Self {
            position: Point::new(-OFFSCREEN_MARGIN, y),
            velocity: Point::new(
                (rng.gen::<f32>() * 2.0 + 1.0) * speed,
                (rng.gen::<f32>() - 0.5) * 0.5 * speed,
            ),
            size: rng.gen::<f32>() * 4.0 + 2.0,
            color: COMET_COLORS[rng.gen_range(0..COMET_COLORS.len())],
            opacity: rng.gen::<f32>() * 0.7 + 0.3,
            trail: TrailBuffer::new(trail_length),
        }
    }

    pub fn step(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.trail.push(self.position);
    }

    pub fn is_offscreen(&self, viewport: Viewport) -> bool {
        self.position.x > viewport.width + OFFSCREEN_MARGIN
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let len = self.trail.len() as f32;
        for (i, from, to) in self.trail.segments() {
            let alpha = (i as f32 / len) * self.opacity;
            surface.stroke_line(from, to, self.color, self.size, alpha);
        }
        surface.fill_circle(
            self.position,
            self.size,
            self.color,
            self.opacity,
            self.size * 3.0,
        );
    }
}

//! Twinkling stars on parallax layers.

use rand::Rng;
use std::f32::consts::TAU;

use crate::surface::{DrawSurface, Point, Rgba, Viewport};

pub const STAR_COLORS: [Rgba; 6] = [
    Rgba::opaque(255, 255, 255),
    Rgba::opaque(255, 250, 205),
    Rgba::opaque(135, 206, 235),
    Rgba::opaque(255, 182, 193),
    Rgba::opaque(152, 251, 152),
    Rgba::opaque(221, 160, 221),
];

/// Size above which a star may sparkle.
const SPARKLE_MIN_SIZE: f32 = 2.0;
/// Twinkle level above which a large star sparkles.
const SPARKLE_MIN_TWINKLE: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Point,
    pub size: f32,
    pub brightness: f32,
    pub twinkle_phase: f32,
    /// Per-star multiplier on the configured twinkle speed.
    pub twinkle_factor: f32,
    pub color: Rgba,
    pub layer: u8,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, layers: u8) -> Self {
        Self {
            position: viewport.random_point(rng),
            size: rng.gen::<f32>() * 3.0 + 0.5,
            brightness: rng.gen(),
            twinkle_phase: rng.gen::<f32>() * TAU,
            twinkle_factor: rng.gen::<f32>() + 0.5,
            color: STAR_COLORS[rng.gen_range(0..STAR_COLORS.len())],
            layer: rng.gen_range(0..layers.max(1)),
        }
    }

    pub fn advance(&mut self, twinkle_speed: f32, motion_scale: f32) {
        self.twinkle_phase += self.twinkle_factor * twinkle_speed * motion_scale;
    }

    /// Current twinkle level in `[0, 1]`.
    pub fn twinkle(&self) -> f32 {
        (self.twinkle_phase.sin() + 1.0) * 0.5
    }

    pub fn alpha(&self) -> f32 {
        self.brightness * (0.3 + self.twinkle() * 0.7)
    }

    pub fn parallax_offset(&self) -> f32 {
        (self.layer as f32 + 1.0) * 0.1
    }

    /// Position after the slow parallax sway at frame time `t_ms`.
    pub fn display_position(&self, t_ms: f64) -> Point {
        let sway = (t_ms * 0.0001) as f32;
        let offset = self.parallax_offset();
        Point::new(
            self.position.x + sway.sin() * offset,
            self.position.y + sway.cos() * offset * 0.5,
        )
    }

    pub fn has_sparkle(&self) -> bool {
        self.size > SPARKLE_MIN_SIZE && self.twinkle() > SPARKLE_MIN_TWINKLE
    }

    /// Draw the star; returns whether it sparkled.
    pub fn draw(&self, surface: &mut dyn DrawSurface, t_ms: f64) -> bool {
        let at = self.display_position(t_ms);
        surface.fill_circle(at, self.size, self.color, self.alpha(), self.size * 2.0);
        let sparkled = self.has_sparkle();
        if sparkled {
            surface.sparkle(at, self.size, self.color);
        }
        sparkled
    }
}

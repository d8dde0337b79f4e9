//! Short-lived supernova flashes.

use crate::surface::{DrawSurface, Point, Rgba};

/// Fraction of the lifetime spent expanding before the flash shrinks.
const EXPANSION_SHARE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub center: Point,
    pub max_size: f32,
    pub started_at_ms: f64,
    pub duration_ms: f64,
    pub color: Rgba,
}

impl Flash {
    pub fn new(center: Point, max_size: f32, started_at_ms: f64, duration_ms: f64) -> Self {
        Self {
            center,
            max_size,
            started_at_ms,
            duration_ms,
            color: Rgba::WHITE,
        }
    }

    /// Elapsed share of the lifetime, clamped to `[0, 1]`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    pub fn size(&self, now_ms: f64) -> f32 {
        let p = self.progress(now_ms);
        let scale = if p < EXPANSION_SHARE {
            p / EXPANSION_SHARE
        } else {
            1.0 - (p - EXPANSION_SHARE) / (1.0 - EXPANSION_SHARE)
        };
        self.max_size * scale as f32
    }

    pub fn alpha(&self, now_ms: f64) -> f32 {
        (1.0 - self.progress(now_ms)) as f32
    }

    /// Draw the flash unless it has finished; returns whether it drew.
    pub fn draw(&self, surface: &mut dyn DrawSurface, now_ms: f64) -> bool {
        if self.is_finished(now_ms) {
            return false;
        }
        let size = self.size(now_ms);
        surface.fill_circle(self.center, size, self.color, self.alpha(now_ms), size * 2.0);
        true
    }
}

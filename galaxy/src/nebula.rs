//! Slowly drifting, pulsing nebula clouds.

use rand::Rng;
use std::f32::consts::TAU;

use crate::surface::{DrawSurface, Point, Rgba, Viewport};

pub const NEBULA_COLORS: [Rgba; 5] = [
    Rgba::new(106, 76, 147, 0.3),
    Rgba::new(61, 90, 128, 0.3),
    Rgba::new(238, 108, 77, 0.2),
    Rgba::new(247, 37, 133, 0.2),
    Rgba::new(6, 255, 165, 0.1),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub position: Point,
    pub radius: f32,
    pub color: Rgba,
    pub opacity: f32,
    /// Signed multiplier on the configured drift speed, in `[-0.5, 0.5)`.
    pub drift_factor: f32,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
}

impl Nebula {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            position: viewport.random_point(rng),
            radius: rng.gen::<f32>() * 200.0 + 100.0,
            color: NEBULA_COLORS[rng.gen_range(0..NEBULA_COLORS.len())],
            opacity: rng.gen::<f32>() * 0.1 + 0.05,
            drift_factor: rng.gen::<f32>() - 0.5,
            pulse_phase: rng.gen::<f32>() * TAU,
            pulse_speed: rng.gen::<f32>() * 0.01 + 0.005,
        }
    }

    /// Drift, wrap around the viewport edges and advance the pulse.
    pub fn advance(&mut self, viewport: Viewport, nebula_speed: f32, motion_scale: f32) {
        let drift = self.drift_factor * nebula_speed * motion_scale;
        self.position.x += drift;
        self.position.y += drift * 0.5;
        self.position.x = wrap(self.position.x, viewport.width, self.radius);
        self.position.y = wrap(self.position.y, viewport.height, self.radius);
        self.pulse_phase += self.pulse_speed;
    }

    pub fn current_opacity(&self) -> f32 {
        let pulse = (self.pulse_phase.sin() + 1.0) * 0.5;
        self.opacity * (0.5 + pulse * 0.5)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let opacity = self.current_opacity();
        surface.radial_gradient(
            self.position,
            self.radius,
            &[
                (0.0, self.color.with_alpha(opacity)),
                (0.5, self.color.with_alpha(opacity * 0.5)),
                (1.0, self.color.with_alpha(0.0)),
            ],
        );
    }
}

fn wrap(value: f32, extent: f32, radius: f32) -> f32 {
    if value > extent + radius {
        -radius
    } else if value < -radius {
        extent + radius
    } else {
        value
    }
}

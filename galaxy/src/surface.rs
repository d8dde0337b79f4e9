//! The drawing seam between the engine and whatever paints pixels.

use rand::Rng;

use crate::error::GalaxyError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawable area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, GalaxyError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GalaxyError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Uniformly random point inside the viewport.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.gen::<f32>() * self.width,
            rng.gen::<f32>() * self.height,
        )
    }
}

/// Straight-alpha colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with its alpha channel replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Primitive operations the engine draws with.
///
/// `alpha` is a global multiplier applied on top of the colour's own alpha;
/// `glow` is a blur radius for a soft halo (0 for none).
pub trait DrawSurface {
    fn clear(&mut self, viewport: Viewport);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, alpha: f32, glow: f32);

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32, alpha: f32);

    /// Circle filled with a radial gradient; `stops` are `(offset, colour)` pairs.
    fn radial_gradient(&mut self, center: Point, radius: f32, stops: &[(f32, Rgba)]);

    /// Four-pointed cross with diagonals, used on bright stars.
    fn sparkle(&mut self, center: Point, size: f32, color: Rgba) {
        let arm = size * 3.0;
        let diag = arm * 0.7;
        let Point { x, y } = center;
        self.stroke_line(Point::new(x - arm, y), Point::new(x + arm, y), color, 1.0, 0.6);
        self.stroke_line(Point::new(x, y - arm), Point::new(x, y + arm), color, 1.0, 0.6);
        self.stroke_line(Point::new(x - diag, y - diag), Point::new(x + diag, y + diag), color, 1.0, 0.6);
        self.stroke_line(Point::new(x + diag, y - diag), Point::new(x - diag, y + diag), color, 1.0, 0.6);
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    Circle {
        center: Point,
        radius: f32,
        color: Rgba,
        alpha: f32,
        glow: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
        alpha: f32,
    },
    Gradient {
        center: Point,
        radius: f32,
        stops: Vec<(f32, Rgba)>,
    },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn gradients(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Gradient { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, alpha: f32, glow: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
            glow,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32, alpha: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
            alpha,
        });
    }

    fn radial_gradient(&mut self, center: Point, radius: f32, stops: &[(f32, Rgba)]) {
        self.commands.push(DrawCommand::Gradient {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }
}

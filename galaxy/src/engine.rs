//! The starfield engine - owns every population and advances them per frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::comet::Comet;
use crate::config::{GalaxyConfig, Intensity};
use crate::error::GalaxyError;
use crate::flash::Flash;
use crate::nebula::Nebula;
use crate::star::Star;
use crate::surface::{DrawSurface, Point, Viewport};

/// Counts from one drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub stars: usize,
    pub sparkles: usize,
    pub comets: usize,
    pub nebulae: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Hidden or stopped; nothing was updated or drawn.
    Skipped,
    Drawn(FrameStats),
}

/// Host-side events the engine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum GalaxyEvent {
    Frame { t_ms: f64 },
    Resize(Viewport),
    VisibilityChanged(bool),
    ReducedMotionChanged(bool),
    SetIntensity(Intensity),
    Flash { at: Option<Point>, now_ms: f64 },
    Tick { now_ms: f64 },
    Start,
    Stop,
    Destroy,
}

pub struct GalaxyEngine<R: Rng = StdRng> {
    config: GalaxyConfig,
    viewport: Viewport,
    rng: R,

    stars: Vec<Star>,
    comets: Vec<Comet>,
    nebulae: Vec<Nebula>,
    flashes: Vec<Flash>,

    twinkle_speed: f32,
    comet_speed: f32,
    intensity: Intensity,

    visible: bool,
    running: bool,
    reduced_motion: bool,
    last_time_ms: f64,
}

impl GalaxyEngine<StdRng> {
    /// Engine with default config and an entropy-seeded generator.
    pub fn with_defaults(viewport: Viewport) -> Self {
        Self::new(GalaxyConfig::default(), viewport, StdRng::from_entropy())
    }
}

impl<R: Rng> GalaxyEngine<R> {
    /// Create a running engine with freshly generated populations.
    pub fn new(config: GalaxyConfig, viewport: Viewport, rng: R) -> Self {
        let mut engine = Self {
            twinkle_speed: config.twinkle_speed,
            comet_speed: config.comet_speed,
            config,
            viewport,
            rng,
            stars: Vec::new(),
            comets: Vec::new(),
            nebulae: Vec::new(),
            flashes: Vec::new(),
            intensity: Intensity::default(),
            visible: true,
            running: true,
            reduced_motion: false,
            last_time_ms: 0.0,
        };
        engine.generate_stars();
        engine.generate_comets();
        engine.generate_nebulae();
        info!(
            stars = engine.stars.len(),
            comets = engine.comets.len(),
            nebulae = engine.nebulae.len(),
            "Galaxy generated"
        );
        engine
    }

    /// Start with reduced motion already on.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.set_reduced_motion(reduced);
        self
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    pub fn nebulae(&self) -> &[Nebula] {
        &self.nebulae
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn twinkle_speed(&self) -> f32 {
        self.twinkle_speed
    }

    pub fn comet_speed(&self) -> f32 {
        self.comet_speed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Multiplier on twinkle and drift for the current motion preference.
    pub fn motion_scale(&self) -> f32 {
        if self.reduced_motion {
            self.config.reduced_motion_scale
        } else {
            1.0
        }
    }

    /// Advance and draw one frame at host time `t_ms`.
    pub fn frame(&mut self, t_ms: f64, surface: &mut dyn DrawSurface) -> FrameOutcome {
        if !self.visible || !self.running {
            return FrameOutcome::Skipped;
        }
        self.last_time_ms = t_ms;
        let scale = self.motion_scale();
        let mut stats = FrameStats::default();

        surface.clear(self.viewport);

        for nebula in &mut self.nebulae {
            nebula.advance(self.viewport, self.config.nebula_speed, scale);
            nebula.draw(surface);
        }
        stats.nebulae = self.nebulae.len();

        for star in &mut self.stars {
            star.advance(self.twinkle_speed, scale);
            if star.draw(surface, t_ms) {
                stats.sparkles += 1;
            }
        }
        stats.stars = self.stars.len();

        if !self.reduced_motion {
            let viewport = self.viewport;
            for comet in &mut self.comets {
                comet.step();
                comet.draw(surface);
            }
            self.comets.retain(|c| !c.is_offscreen(viewport));
            if self.comets.len() < self.config.comet_count {
                self.spawn_comet();
            }
        }
        stats.comets = self.comets.len();

        FrameOutcome::Drawn(stats)
    }

    /// Regenerate stars and nebulae for new dimensions; comets carry over.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !self.stars.is_empty() {
            self.generate_stars();
            self.generate_nebulae();
        }
        info!(width = viewport.width, height = viewport.height, "Galaxy resized");
    }

    /// Validate raw dimensions and resize.
    pub fn resize_to(&mut self, width: f32, height: f32) -> Result<(), GalaxyError> {
        self.resize(Viewport::new(width, height)?);
        Ok(())
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            debug!(visible, "Galaxy visibility changed");
        }
        self.visible = visible;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion == reduced {
            return;
        }
        self.reduced_motion = reduced;
        if reduced {
            self.comets.clear();
            info!("Reduced motion enabled");
        } else {
            self.generate_comets();
            info!(comets = self.comets.len(), "Full motion enabled");
        }
    }

    pub fn set_intensity(&mut self, intensity: Intensity) {
        self.intensity = intensity;
        self.twinkle_speed = intensity.twinkle_speed();
        self.comet_speed = intensity.comet_speed();
        if intensity.triggers_shower() {
            self.add_comet_shower();
        }
        info!(intensity = %intensity, "Galaxy intensity set");
    }

    /// Add a burst of comets at once; no-op under reduced motion.
    pub fn add_comet_shower(&mut self) {
        if self.reduced_motion {
            return;
        }
        for _ in 0..self.config.shower_size {
            self.spawn_comet();
        }
        debug!(comets = self.comets.len(), "Comet shower");
    }

    /// Start a flash at `at`, or at a random point when `None`.
    pub fn add_flash(&mut self, at: Option<Point>, now_ms: f64) {
        let center = match at {
            Some(point) => point,
            None => self.viewport.random_point(&mut self.rng),
        };
        self.flashes.push(Flash::new(
            center,
            self.config.flash_max_size,
            now_ms,
            self.config.flash_duration_ms,
        ));
        debug!(x = center.x, y = center.y, "Flash added");
    }

    /// Draw live flashes and drop finished ones; returns how many remain.
    ///
    /// Runs independently of `frame`, visibility and the running state.
    pub fn tick_transients(&mut self, now_ms: f64, surface: &mut dyn DrawSurface) -> usize {
        self.flashes.retain(|f| f.draw(surface, now_ms));
        self.flashes.len()
    }

    pub fn start(&mut self) {
        if !self.running {
            info!("Galaxy animations started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("Galaxy animations stopped");
        }
        self.running = false;
    }

    /// Stop and drop every population.
    pub fn destroy(&mut self) {
        self.running = false;
        self.stars.clear();
        self.comets.clear();
        self.nebulae.clear();
        self.flashes.clear();
        info!("Galaxy destroyed");
    }

    /// Single dispatch point for host events.
    pub fn handle(&mut self, event: GalaxyEvent, surface: &mut dyn DrawSurface) -> Option<FrameOutcome> {
        match event {
            GalaxyEvent::Frame { t_ms } => return Some(self.frame(t_ms, surface)),
            GalaxyEvent::Resize(viewport) => self.resize(viewport),
            GalaxyEvent::VisibilityChanged(visible) => self.set_visible(visible),
            GalaxyEvent::ReducedMotionChanged(reduced) => self.set_reduced_motion(reduced),
            GalaxyEvent::SetIntensity(intensity) => self.set_intensity(intensity),
            GalaxyEvent::Flash { at, now_ms } => self.add_flash(at, now_ms),
            GalaxyEvent::Tick { now_ms } => {
                self.tick_transients(now_ms, surface);
            }
            GalaxyEvent::Start => self.start(),
            GalaxyEvent::Stop => self.stop(),
            GalaxyEvent::Destroy => self.destroy(),
        }
        None
    }

    fn spawn_comet(&mut self) {
        let comet = Comet::spawn(
            &mut self.rng,
            self.viewport,
            self.comet_speed,
            self.config.max_trail_length,
        );
        self.comets.push(comet);
    }

    fn generate_stars(&mut self) {
        let (viewport, layers) = (self.viewport, self.config.parallax_layers);
        let rng = &mut self.rng;
        self.stars = (0..self.config.star_count)
            .map(|_| Star::random(rng, viewport, layers))
            .collect();
    }

    fn generate_comets(&mut self) {
        self.comets.clear();
        if self.reduced_motion {
            return;
        }
        for _ in 0..self.config.comet_count {
            self.spawn_comet();
        }
    }

    fn generate_nebulae(&mut self) {
        let viewport = self.viewport;
        let rng = &mut self.rng;
        self.nebulae = (0..self.config.nebula_count)
            .map(|_| Nebula::random(rng, viewport))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn engine() -> GalaxyEngine {
        let config = GalaxyConfig {
            star_count: 40,
            ..GalaxyConfig::default()
        };
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        GalaxyEngine::new(config, viewport, StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_initial_populations() {
        let engine = engine();
        assert_eq!(engine.stars().len(), 40);
        assert_eq!(engine.comets().len(), 3);
        assert_eq!(engine.nebulae().len(), 5);
    }

    #[test]
    fn test_hidden_frame_is_skipped() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        let phase = engine.stars()[0].twinkle_phase;

        engine.set_visible(false);
        assert_eq!(engine.frame(16.0, &mut surface), FrameOutcome::Skipped);
        assert!(surface.is_empty());
        assert_eq!(engine.stars()[0].twinkle_phase, phase);

        engine.set_visible(true);
        assert!(matches!(engine.frame(32.0, &mut surface), FrameOutcome::Drawn(_)));
        assert!(!surface.is_empty());
    }

    #[test]
    fn test_frame_draw_order() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.frame(16.0, &mut surface);

        let commands = surface.commands();
        assert!(matches!(commands[0], crate::surface::DrawCommand::Clear(_)));
        // Nebulae form the background layer.
        assert!(commands[1..6]
            .iter()
            .all(|c| matches!(c, crate::surface::DrawCommand::Gradient { .. })));
    }

    #[test]
    fn test_storm_intensity_adds_shower() {
        let mut engine = engine();
        engine.set_intensity(Intensity::Storm);
        assert_eq!(engine.comets().len(), 8);
        assert_eq!(engine.comet_speed(), 0.8);
        assert_eq!(engine.twinkle_speed(), 0.05);

        engine.set_intensity(Intensity::Calm);
        assert_eq!(engine.comets().len(), 8);
        assert_eq!(engine.comet_speed(), 0.1);
    }

    #[test]
    fn test_storm_under_reduced_motion_skips_shower() {
        let mut engine = engine().with_reduced_motion(true);
        engine.set_intensity(Intensity::Storm);
        assert!(engine.comets().is_empty());
        assert_eq!(engine.twinkle_speed(), 0.05);
    }

    #[test]
    fn test_offscreen_comet_replaced_one_per_frame() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        for comet in &mut engine.comets {
            comet.position.x = 10_000.0;
        }

        engine.frame(16.0, &mut surface);
        assert_eq!(engine.comets().len(), 1);
        engine.frame(32.0, &mut surface);
        assert_eq!(engine.comets().len(), 2);
        engine.frame(48.0, &mut surface);
        engine.frame(64.0, &mut surface);
        assert_eq!(engine.comets().len(), 3);
    }

    #[test]
    fn test_flash_ticks_while_hidden() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.set_visible(false);
        engine.add_flash(Some(Point::new(10.0, 20.0)), 0.0);
        engine.add_flash(None, 500.0);

        assert_eq!(engine.tick_transients(1000.0, &mut surface), 2);
        assert_eq!(surface.circles(), 2);
        assert_eq!(engine.tick_transients(2100.0, &mut surface), 1);
        assert_eq!(engine.tick_transients(2600.0, &mut surface), 0);
    }

    #[test]
    fn test_destroy_clears_everything() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.add_flash(None, 0.0);
        engine.destroy();

        assert!(engine.stars().is_empty());
        assert!(engine.comets().is_empty());
        assert!(engine.nebulae().is_empty());
        assert!(engine.flashes().is_empty());
        assert_eq!(engine.frame(16.0, &mut surface), FrameOutcome::Skipped);
    }

    #[test]
    fn test_handle_dispatch() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();

        assert_eq!(engine.handle(GalaxyEvent::Stop, &mut surface), None);
        assert_eq!(
            engine.handle(GalaxyEvent::Frame { t_ms: 16.0 }, &mut surface),
            Some(FrameOutcome::Skipped)
        );
        engine.handle(GalaxyEvent::Start, &mut surface);
        engine.handle(GalaxyEvent::SetIntensity(Intensity::Calm), &mut surface);
        assert_eq!(engine.intensity(), Intensity::Calm);
        assert!(matches!(
            engine.handle(GalaxyEvent::Frame { t_ms: 32.0 }, &mut surface),
            Some(FrameOutcome::Drawn(_))
        ));
    }

    #[test]
    fn test_resize_to_rejects_zero() {
        let mut engine = engine();
        assert!(engine.resize_to(0.0, 100.0).is_err());
        assert_eq!(engine.viewport().width, 800.0);
    }
}

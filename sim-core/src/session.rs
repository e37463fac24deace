//! The per-window simulation session.
//!
//! [`Session`] is the single owner of everything that changes while the
//! header is on screen: the target, the viewport, the backend selector, the
//! motion drivers and the statistics. The host window forwards its events
//! and calls [`Session::frame`] once per display refresh.

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    backend::BackendError,
    config::Config,
    motion::MotionDriver,
    render::{Canvas, DrawStats, draw_points},
    selector::{BackendSelector, SelectorState},
    stats::{Benchmark, BenchmarkReport, FrameStats},
    types::{BackendKind, Viewport},
};

/// Decorrelates the motion RNG from the placement RNG sharing the same seed.
const MOTION_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Longest step fed to the motion drivers; longer stalls are clamped.
pub const MAX_STEP: f32 = 0.1;

pub struct Session {
    cfg: Config,
    viewport: Viewport,
    target: Vec2,
    render_enabled: bool,

    selector: BackendSelector,
    drivers: [MotionDriver; 2],
    rng: StdRng,

    frames: u64,
    last_draw: DrawStats,
    stats: FrameStats,
    benchmark: Benchmark,
}

impl Session {
    /// Starts a session on the built-in backends.
    ///
    /// Uses `cfg.seed` when set, otherwise a seed from the thread RNG.
    pub fn new(cfg: Config, viewport: Viewport) -> Self {
        let seed = cfg.seed.unwrap_or_else(rand::random);
        let selector = BackendSelector::new(&cfg, seed);
        Self::with_selector(cfg, viewport, selector, seed)
    }

    /// Starts a session on a caller-provided selector.
    pub fn with_selector(
        cfg: Config,
        viewport: Viewport,
        mut selector: BackendSelector,
        seed: u64,
    ) -> Self {
        log::info!("starting session {}x{} with seed {seed}", viewport.width, viewport.height);

        let target = viewport.center();
        selector.start(viewport, target, cfg.prefer_native);

        Self {
            drivers: [MotionDriver::new(cfg.motion), MotionDriver::new(cfg.motion)],
            rng: StdRng::seed_from_u64(seed ^ MOTION_SEED_SALT),
            stats: FrameStats::new(cfg.stats_interval),
            benchmark: Benchmark::default(),
            frames: 0,
            last_draw: DrawStats::default(),
            render_enabled: true,
            cfg,
            viewport,
            target,
            selector,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn selector(&self) -> &BackendSelector {
        &self.selector
    }

    pub fn state(&self) -> SelectorState {
        self.selector.state()
    }

    pub fn active_kind(&self) -> BackendKind {
        self.selector.active_kind()
    }

    pub fn native_available(&self) -> bool {
        self.selector.native_available()
    }

    /// Point count of the active backend; `0` when none is loaded.
    pub fn points_count(&self) -> usize {
        self.selector.active().map_or(0, |b| b.points_count())
    }

    /// Number of frames actually rendered.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_draw(&self) -> DrawStats {
        self.last_draw
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn benchmark(&self) -> &Benchmark {
        &self.benchmark
    }

    pub fn render_enabled(&self) -> bool {
        self.render_enabled
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.target = pos;
        self.selector.set_target(pos);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("resize {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.selector.resize(viewport);
    }

    /// Rendering stays on while the header is at least partly visible.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.render_enabled = offset <= self.viewport.height;
    }

    pub fn toggle_backend(&mut self) -> BackendKind {
        self.selector.toggle(self.viewport, self.target)
    }

    /// Starts a benchmark, or stops the running one and returns its report.
    pub fn toggle_benchmark(&mut self) -> Option<BenchmarkReport> {
        if self.benchmark.is_running() {
            Some(self.benchmark.stop())
        } else {
            self.benchmark.start();
            None
        }
    }

    /// Runs one display refresh that took `dt` seconds of wall time.
    ///
    /// Statistics see the real `dt`; the motion step is capped at
    /// [`MAX_STEP`] so a stalled window does not make the field jump.
    /// The active field always drifts. When rendering is enabled the canvas is
    /// cleared, activity is recomputed and the field is drawn. A fault in the
    /// active backend switches backends and redraws the same frame with the
    /// new one.
    ///
    /// ### Returns
    /// What was drawn, or `None` if the frame was not rendered.
    pub fn frame(&mut self, dt: f32, canvas: &mut impl Canvas) -> Option<DrawStats> {
        let kind = self.selector.active_kind();
        if let Some(backend) = self.selector.active_mut() {
            self.drivers[kind.slot()].advance(dt.min(MAX_STEP), backend, &mut self.rng);
        }

        if let Some(sample) = self.stats.record(dt as f64, self.render_enabled) {
            self.benchmark.record(kind, sample.fps);
        }

        if !self.render_enabled {
            return None;
        }

        canvas.clear();
        self.frames += 1;

        let drawn = match self.step(canvas) {
            Ok(drawn) => drawn,
            Err(err) => {
                let faulted = err.backend();
                self.drivers[faulted.slot()] = MotionDriver::new(self.cfg.motion);
                self.selector.fall_back(&err, self.viewport, self.target)?;

                canvas.clear();
                match self.step(canvas) {
                    Ok(drawn) => drawn,
                    Err(err) => {
                        log::error!("{err}; skipping frame");
                        return None;
                    }
                }
            }
        };

        self.last_draw = drawn;
        Some(drawn)
    }

    fn step(&mut self, canvas: &mut impl Canvas) -> Result<DrawStats, BackendError> {
        let Some(backend) = self.selector.active_mut() else {
            return Ok(DrawStats::default());
        };
        backend.update()?;
        draw_points(backend, canvas, &self.cfg.palette)
    }
}

//! Chooses which backend serves the render loop.
//!
//! The selector owns at most one instance of each backend and a single
//! "active" marker. Construction is lazy: a backend is only built the first
//! time it becomes active. Every transition is synchronous and takes effect
//! on the next call into the active backend.

use glam::Vec2;

use crate::{
    backend::{BackendError, NativeBackend, PointBackend, ScriptBackend},
    config::Config,
    types::{BackendKind, Viewport},
};

/// Builds a backend for a viewport.
pub type BackendCtor = Box<dyn Fn(Viewport) -> Result<Box<dyn PointBackend>, BackendError>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorState {
    Uninitialized,
    NativeActive,
    ScriptActive,
    /// Script is active because the native backend failed to load or faulted.
    NativeFailed,
}

pub struct BackendSelector {
    ctors: [BackendCtor; 2],
    backends: [Option<Box<dyn PointBackend>>; 2],
    active: BackendKind,
    state: SelectorState,
    native_available: bool,
}

impl BackendSelector {
    /// Selector over the built-in backends, both seeded with `seed`.
    pub fn new(cfg: &Config, seed: u64) -> Self {
        let field = cfg.field;
        let native: BackendCtor = if cfg.native_enabled {
            Box::new(move |viewport| {
                NativeBackend::load(viewport, field, seed).map(|b| Box::new(b) as Box<dyn PointBackend>)
            })
        } else {
            Box::new(|_| {
                Err(BackendError::Unavailable {
                    backend: BackendKind::Native,
                    reason: "disabled by configuration".to_owned(),
                })
            })
        };
        let script: BackendCtor = Box::new(move |viewport| {
            Ok(Box::new(ScriptBackend::new(viewport, field, seed)) as Box<dyn PointBackend>)
        });
        Self::with_constructors(native, script)
    }

    /// Selector over arbitrary backend constructors.
    pub fn with_constructors(native: BackendCtor, script: BackendCtor) -> Self {
        Self {
            ctors: [native, script],
            backends: [None, None],
            active: BackendKind::Script,
            state: SelectorState::Uninitialized,
            native_available: true,
        }
    }

    /// Loads the first backend. With `prefer_native`, a native load failure
    /// falls back to script for the rest of the session.
    pub fn start(&mut self, viewport: Viewport, target: Vec2, prefer_native: bool) {
        if prefer_native {
            match self.ensure(BackendKind::Native, viewport) {
                Ok(()) => {
                    log::info!("native backend loaded");
                    self.activate(BackendKind::Native, target);
                    return;
                }
                Err(err) => {
                    log::warn!("{err}; falling back to script backend");
                    self.native_available = false;
                }
            }
        }
        self.activate_script(viewport, target);
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn active_kind(&self) -> BackendKind {
        self.active
    }

    /// `false` once the native backend failed to load.
    pub fn native_available(&self) -> bool {
        self.native_available
    }

    pub fn active(&self) -> Option<&dyn PointBackend> {
        self.backend(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut dyn PointBackend> {
        match &mut self.backends[self.active.slot()] {
            Some(b) => Some(&mut **b),
            None => None,
        }
    }

    pub fn backend(&self, kind: BackendKind) -> Option<&dyn PointBackend> {
        self.backends[kind.slot()].as_deref()
    }

    /// Pushes the target into the active backend.
    pub fn set_target(&mut self, target: Vec2) {
        if let Some(b) = self.active_mut() {
            b.set_target(target);
        }
    }

    /// Resizes every constructed backend.
    pub fn resize(&mut self, viewport: Viewport) {
        for b in self.backends.iter_mut().flatten() {
            b.resize(viewport);
        }
    }

    /// Swaps the active backend, building it first if needed.
    ///
    /// Does nothing while the native backend is unavailable. Returns the kind
    /// that is active afterwards.
    pub fn toggle(&mut self, viewport: Viewport, target: Vec2) -> BackendKind {
        if !self.native_available {
            log::info!("native backend unavailable; staying on {}", self.active);
            return self.active;
        }

        let next = self.active.other();
        match self.ensure(next, viewport) {
            Ok(()) => {
                log::info!("switched backend: {} -> {}", self.active, next);
                self.activate(next, target);
            }
            Err(err) => {
                log::warn!("{err}; staying on {}", self.active);
                if next == BackendKind::Native {
                    self.native_available = false;
                }
            }
        }
        self.active
    }

    /// Handles a runtime fault of the active backend.
    ///
    /// The faulted instance is discarded and the other backend becomes active,
    /// built on demand. If the other backend cannot be used either, a fresh
    /// instance of the faulted kind is built instead.
    ///
    /// ### Returns
    /// The kind that is active afterwards, or `None` if no backend could be built.
    pub fn fall_back(
        &mut self,
        err: &BackendError,
        viewport: Viewport,
        target: Vec2,
    ) -> Option<BackendKind> {
        let faulted = err.backend();
        log::warn!("{err}; falling back from {faulted}");
        self.backends[faulted.slot()] = None;

        let other = faulted.other();
        if other == BackendKind::Script || self.native_available {
            match self.ensure(other, viewport) {
                Ok(()) => {
                    self.activate(other, target);
                    if faulted == BackendKind::Native {
                        self.state = SelectorState::NativeFailed;
                    }
                    return Some(other);
                }
                Err(e) => {
                    log::error!("{e}; fallback target unusable");
                    if other == BackendKind::Native {
                        self.native_available = false;
                    }
                }
            }
        }

        match self.ensure(faulted, viewport) {
            Ok(()) => {
                self.activate(faulted, target);
                if faulted == BackendKind::Script && !self.native_available {
                    self.state = SelectorState::NativeFailed;
                }
                Some(faulted)
            }
            Err(e) => {
                log::error!("{e}; no backend available");
                None
            }
        }
    }

    fn activate_script(&mut self, viewport: Viewport, target: Vec2) {
        match self.ensure(BackendKind::Script, viewport) {
            Ok(()) => {
                self.activate(BackendKind::Script, target);
                if !self.native_available {
                    self.state = SelectorState::NativeFailed;
                }
            }
            Err(e) => log::error!("{e}; no backend available"),
        }
    }

    fn ensure(&mut self, kind: BackendKind, viewport: Viewport) -> Result<(), BackendError> {
        let slot = kind.slot();
        if self.backends[slot].is_none() {
            let backend = (self.ctors[slot])(viewport)?;
            log::info!("{kind} backend constructed with {} points", backend.points_count());
            self.backends[slot] = Some(backend);
        } else if let Some(b) = self.backends[slot].as_mut() {
            b.resize(viewport);
        }
        Ok(())
    }

    fn activate(&mut self, kind: BackendKind, target: Vec2) {
        self.active = kind;
        self.state = match kind {
            BackendKind::Native => SelectorState::NativeActive,
            BackendKind::Script => SelectorState::ScriptActive,
        };
        self.set_target(target);
    }
}

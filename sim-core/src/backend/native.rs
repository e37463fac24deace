use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

use super::{BackendError, PointBackend, PointView};
use crate::{
    config::FieldConfig,
    geometry::{NeighborSlots, build_neighbor_index},
    placement::jittered_grid,
    proximity::Activity,
    types::{BackendKind, PointId, Viewport},
};

/// Packed backend: one contiguous array per attribute and a fixed-capacity
/// neighbour list per point.
///
/// `update` refuses to run on non-finite coordinates and reports a
/// [`BackendError::Fault`] instead, so a corrupted field is handed over to the
/// other backend rather than drawn.
#[derive(Debug)]
pub struct NativeBackend {
    cfg: FieldConfig,
    rng: StdRng,
    viewport: Viewport,
    generation: u64,
    target: Vec2,

    pos: Vec<Vec2>,
    origin: Vec<Vec2>,
    radius: Vec<f32>,
    active: Vec<f32>,
    marker: Vec<f32>,
    closest: Vec<NeighborSlots>,
}

impl NativeBackend {
    /// Builds the field for `viewport` from `seed`.
    ///
    /// ### Errors
    /// [`BackendError::Unavailable`] if the viewport has non-finite or negative
    /// dimensions, or holds more points than a `u32` index can address.
    pub fn load(viewport: Viewport, cfg: FieldConfig, seed: u64) -> Result<Self, BackendError> {
        if !viewport.is_valid() {
            return Err(BackendError::Unavailable {
                backend: BackendKind::Native,
                reason: format!("unsupported viewport {}x{}", viewport.width, viewport.height),
            });
        }
        let cells = (cfg.grid_divisions as u64).pow(2);
        if cells > u32::MAX as u64 {
            return Err(BackendError::Unavailable {
                backend: BackendKind::Native,
                reason: format!("{cells} points exceed the index range"),
            });
        }

        let mut backend = Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
            viewport,
            generation: 0,
            target: viewport.center(),
            pos: Vec::new(),
            origin: Vec::new(),
            radius: Vec::new(),
            active: Vec::new(),
            marker: Vec::new(),
            closest: Vec::new(),
        };
        backend.rebuild();
        Ok(backend)
    }

    fn rebuild(&mut self) {
        let seeds = jittered_grid(self.viewport, &self.cfg, &mut self.rng);
        let n = seeds.len();

        self.origin = seeds.iter().map(|s| s.origin).collect();
        self.radius = seeds.iter().map(|s| s.radius).collect();
        self.pos = self.origin.clone();
        self.active = vec![0.0; n];
        self.marker = vec![0.0; n];
        self.closest = build_neighbor_index(&self.origin);
        self.generation += 1;

        log::debug!(
            "native field rebuilt: {} points for {}x{} (generation {})",
            n,
            self.viewport.width,
            self.viewport.height,
            self.generation
        );
    }

    fn view(&self, i: PointId) -> PointView {
        PointView {
            pos: self.pos[i],
            origin: self.origin[i],
            active: self.active[i],
            marker: self.marker[i],
            radius: self.radius[i],
        }
    }
}

impl PointBackend for NativeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.rebuild();
    }

    fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    fn update(&mut self) -> Result<(), BackendError> {
        if !self.target.is_finite() {
            return Err(BackendError::Fault {
                backend: BackendKind::Native,
                reason: format!("non-finite target {}", self.target),
            });
        }

        let target = self.target;
        for (i, p) in self.pos.iter().enumerate() {
            let d2 = (*p - target).length_squared();
            if !d2.is_finite() {
                return Err(BackendError::Fault {
                    backend: BackendKind::Native,
                    reason: format!("point {i} has non-finite position {p}"),
                });
            }
            let a = Activity::from_distance_sq(d2);
            self.active[i] = a.link;
            self.marker[i] = a.marker;
        }
        Ok(())
    }

    fn points_count(&self) -> usize {
        self.pos.len()
    }

    fn point(&self, index: PointId) -> Option<PointView> {
        (index < self.pos.len()).then(|| self.view(index))
    }

    fn closest_count(&self, index: PointId) -> usize {
        self.closest.get(index).map_or(0, NeighborSlots::len)
    }

    fn point_closest(&self, index: PointId, neighbor: usize) -> Option<PointView> {
        let id = self.closest.get(index)?.get(neighbor)?;
        Some(self.view(id))
    }

    fn update_point_position(&mut self, index: PointId, pos: Vec2) {
        if let Some(p) = self.pos.get_mut(index) {
            *p = pos;
        }
    }
}

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

use super::{BackendError, PointBackend, PointView};
use crate::{
    config::FieldConfig,
    geometry::NEIGHBOR_SLOTS,
    placement::jittered_grid,
    proximity::Activity,
    types::{BackendKind, PointId, Viewport},
};

#[derive(Clone, Debug)]
struct ScriptPoint {
    pos: Vec2,
    origin: Vec2,
    radius: f32,
    activity: Activity,
    closest: Vec<PointId>,
}

/// Straightforward backend: a vector of point objects, each with its own
/// growable neighbour list. Always constructible.
#[derive(Debug)]
pub struct ScriptBackend {
    cfg: FieldConfig,
    rng: StdRng,
    viewport: Viewport,
    generation: u64,
    target: Vec2,
    points: Vec<ScriptPoint>,
}

impl ScriptBackend {
    pub fn new(viewport: Viewport, cfg: FieldConfig, seed: u64) -> Self {
        let mut backend = Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
            viewport,
            generation: 0,
            target: viewport.center(),
            points: Vec::new(),
        };
        backend.rebuild();
        backend
    }

    fn rebuild(&mut self) {
        self.points = jittered_grid(self.viewport, &self.cfg, &mut self.rng)
            .into_iter()
            .map(|s| ScriptPoint {
                pos: s.origin,
                origin: s.origin,
                radius: s.radius,
                activity: Activity::IDLE,
                closest: Vec::with_capacity(NEIGHBOR_SLOTS),
            })
            .collect();
        link_closest(&mut self.points);
        self.generation += 1;

        log::debug!(
            "script field rebuilt: {} points for {}x{} (generation {})",
            self.points.len(),
            self.viewport.width,
            self.viewport.height,
            self.generation
        );
    }

    fn view(p: &ScriptPoint) -> PointView {
        PointView {
            pos: p.pos,
            origin: p.origin,
            active: p.activity.link,
            marker: p.activity.marker,
            radius: p.radius,
        }
    }
}

/// Fills each point's neighbour list: empty places first, then the first
/// occupant farther from `p1` than the candidate is replaced.
fn link_closest(points: &mut [ScriptPoint]) {
    let dist2 = |a: Vec2, b: Vec2| (a - b).length_squared();

    for i in 0..points.len() {
        let p1 = points[i].origin;
        let mut closest: Vec<PointId> = Vec::with_capacity(NEIGHBOR_SLOTS);
        for (j, p2) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            if closest.len() < NEIGHBOR_SLOTS {
                closest.push(j);
                continue;
            }
            let d2 = dist2(p1, p2.origin);
            if let Some(k) = closest.iter().position(|&c| d2 < dist2(p1, points[c].origin)) {
                closest[k] = j;
            }
        }
        points[i].closest = closest;
    }
}

impl PointBackend for ScriptBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Script
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
        let target = self.target;
        for p in &mut self.points {
            p.activity = Activity::between(p.pos, target);
        }
        Ok(())
    }

    fn points_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: PointId) -> Option<PointView> {
        self.points.get(index).map(Self::view)
    }

    fn closest_count(&self, index: PointId) -> usize {
        self.points.get(index).map_or(0, |p| p.closest.len())
    }

    fn point_closest(&self, index: PointId, neighbor: usize) -> Option<PointView> {
        let id = *self.points.get(index)?.closest.get(neighbor)?;
        self.point(id)
    }

    fn update_point_position(&mut self, index: PointId, pos: Vec2) {
        if let Some(p) = self.points.get_mut(index) {
            p.pos = pos;
        }
    }
}

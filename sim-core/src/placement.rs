use glam::Vec2;
use rand::Rng;

use crate::{config::FieldConfig, types::Viewport};

/// Initial state of one point, shared by both backends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSeed {
    pub origin: Vec2,
    pub radius: f32,
}

/// Number of whole grid cells along one axis.
///
/// `size / (size / divisions)` is evaluated in `f64` with a small tolerance so
/// that an exact division never truncates to `divisions - 1`.
fn cell_count(size: f32, step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    (size as f64 / step + 1e-9).floor() as usize
}

/// Places one point per cell of a `grid_divisions` x `grid_divisions` grid,
/// jittered uniformly inside its cell.
///
/// Points are produced column by column (outer loop over x). Each point draws
/// its x jitter, then its y jitter, then its marker radius from `rng`, so the
/// same seed and viewport always give the same seeds.
///
/// ### Returns
/// `floor(width / step_x) * floor(height / step_y)` seeds; empty for a
/// degenerate viewport or zero divisions.
pub fn jittered_grid(viewport: Viewport, cfg: &FieldConfig, rng: &mut impl Rng) -> Vec<PointSeed> {
    if !viewport.is_valid() || cfg.grid_divisions == 0 {
        return Vec::new();
    }

    let divisions = cfg.grid_divisions as f64;
    let step_x = viewport.width as f64 / divisions;
    let step_y = viewport.height as f64 / divisions;
    let cols = cell_count(viewport.width, step_x);
    let rows = cell_count(viewport.height, step_y);

    let mut seeds = Vec::with_capacity(cols * rows);
    for col in 0..cols {
        for row in 0..rows {
            let x = col as f64 * step_x + rng.random::<f64>() * step_x;
            let y = row as f64 * step_y + rng.random::<f64>() * step_y;
            let radius = cfg.radius_min + rng.random::<f32>() * cfg.radius_spread;
            seeds.push(PointSeed {
                origin: Vec2::new(x as f32, y as f32),
                radius,
            });
        }
    }
    seeds
}

//! Perpetual idle drift of every point around its origin.
//!
//! Each point runs its own tween towards a random destination near its
//! origin. When a tween completes, a new one is issued from wherever the
//! point is, so the drift never stops and points never synchronize.

use glam::Vec2;
use rand::Rng;

use crate::{
    backend::PointBackend,
    config::MotionConfig,
    tween::{Tween, TweenScheduler},
    types::PointId,
};

/// Drives the tweens of one backend's point field.
///
/// The driver remembers the field generation its tweens were issued for. A
/// rebuilt field (new generation) gets a fresh set of tweens before the next
/// step, so no tween ever writes into a field it was not issued for.
#[derive(Debug)]
pub struct MotionDriver {
    cfg: MotionConfig,
    tweens: TweenScheduler,
    generation: Option<u64>,
    finished: Vec<PointId>,
}

impl MotionDriver {
    pub fn new(cfg: MotionConfig) -> Self {
        Self {
            cfg,
            tweens: TweenScheduler::default(),
            generation: None,
            finished: Vec::new(),
        }
    }

    pub fn tweens(&self) -> &TweenScheduler {
        &self.tweens
    }

    /// Random destination for a point resting at `origin`.
    pub fn destination(&self, origin: Vec2, rng: &mut impl Rng) -> Vec2 {
        let jitter = Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * self.cfg.spread;
        origin + self.cfg.offset + jitter
    }

    fn issue(&mut self, id: PointId, from: Vec2, origin: Vec2, rng: &mut impl Rng) {
        let to = self.destination(origin, rng);
        let duration = self.cfg.duration_min + rng.random::<f32>() * self.cfg.duration_spread;
        self.tweens.start(id, Tween::new(from, to, duration, self.cfg.easing));
    }

    /// Drops all tweens and issues a new one for every point of `backend`.
    pub fn restart(&mut self, backend: &dyn PointBackend, rng: &mut impl Rng) {
        let n = backend.points_count();
        self.tweens.reset(n);
        for id in 0..n {
            if let Some(p) = backend.point(id) {
                self.issue(id, p.pos, p.origin, rng);
            }
        }
        self.generation = Some(backend.generation());
    }

    /// Advances every tween by `dt` seconds, writing each interpolated
    /// position into `backend`, and re-issues the tweens that completed.
    pub fn advance(&mut self, dt: f32, backend: &mut dyn PointBackend, rng: &mut impl Rng) {
        if self.generation != Some(backend.generation()) {
            self.restart(backend, rng);
        }

        self.finished.clear();
        let finished = &mut self.finished;
        self.tweens.advance(
            dt,
            |id, pos| backend.update_point_position(id, pos),
            |id| finished.push(id),
        );

        let mut finished = std::mem::take(&mut self.finished);
        for &id in &finished {
            if let Some(p) = backend.point(id) {
                self.issue(id, p.pos, p.origin, rng);
            }
        }
        finished.clear();
        self.finished = finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::{NativeBackend, ScriptBackend},
        config::FieldConfig,
        types::Viewport,
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn in_drift_box(p: Vec2, origin: Vec2) -> bool {
        let lo = origin + Vec2::new(-80.0, -20.0);
        let hi = lo + Vec2::splat(99.0);
        p.x >= lo.x - 1e-3 && p.x <= hi.x + 1e-3 && p.y >= lo.y - 1e-3 && p.y <= hi.y + 1e-3
    }

    #[test]
    fn destinations_stay_in_the_drift_box() {
        let driver = MotionDriver::new(MotionConfig::default());
        let mut rng = StdRng::seed_from_u64(4);
        let origin = Vec2::new(300.0, 200.0);
        for _ in 0..1000 {
            assert!(in_drift_box(driver.destination(origin, &mut rng), origin));
        }
    }

    #[test]
    fn every_intermediate_step_is_written_back() {
        let mut backend = NativeBackend::load(Viewport::new(200.0, 200.0), FieldConfig::default(), 3).unwrap();
        let mut driver = MotionDriver::new(MotionConfig::default());
        let mut rng = StdRng::seed_from_u64(5);

        driver.advance(0.25, &mut backend, &mut rng);
        let tween = *driver.tweens().get(0).unwrap();
        let p = backend.point(0).unwrap();
        assert_eq!(p.pos, tween.value());
        assert_ne!(p.pos, p.origin);
    }

    #[test]
    fn drift_is_perpetual() {
        let mut backend = ScriptBackend::new(Viewport::new(200.0, 200.0), FieldConfig::default(), 3);
        let mut driver = MotionDriver::new(MotionConfig::default());
        let mut rng = StdRng::seed_from_u64(6);

        // Ten simulated seconds covers at least five full tweens per point.
        for _ in 0..600 {
            driver.advance(1.0 / 60.0, &mut backend, &mut rng);
            assert_eq!(driver.tweens().running(), backend.points_count());
        }
        for i in 0..backend.points_count() {
            let p = backend.point(i).unwrap();
            let tween = driver.tweens().get(i).unwrap();
            assert!(in_drift_box(tween.to, p.origin));
        }
    }

    #[test]
    fn tween_durations_span_one_to_two_seconds() {
        let mut backend = ScriptBackend::new(Viewport::new(200.0, 200.0), FieldConfig::default(), 3);
        let mut driver = MotionDriver::new(MotionConfig::default());
        let mut rng = StdRng::seed_from_u64(8);

        let (mut shortest, mut longest) = (f32::MAX, f32::MIN);
        // Covers the initial batch and several re-issues per point.
        for _ in 0..300 {
            driver.advance(1.0 / 30.0, &mut backend, &mut rng);
            for i in 0..backend.points_count() {
                let d = driver.tweens().get(i).unwrap().duration;
                assert!((1.0..2.0).contains(&d), "point {i} has duration {d}");
                shortest = shortest.min(d);
                longest = longest.max(d);
            }
        }
        assert!(shortest < 1.1 && longest > 1.9, "{shortest}..{longest}");
    }

    #[test]
    fn rebuilt_field_gets_fresh_tweens() {
        let mut backend = NativeBackend::load(Viewport::new(400.0, 400.0), FieldConfig::default(), 3).unwrap();
        let mut driver = MotionDriver::new(MotionConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        driver.advance(0.1, &mut backend, &mut rng);

        backend.resize(Viewport::new(100.0, 100.0));
        driver.advance(0.0, &mut backend, &mut rng);

        for i in 0..backend.points_count() {
            let origin = backend.point(i).unwrap().origin;
            assert!(in_drift_box(driver.tweens().get(i).unwrap().to, origin));
        }
    }
}

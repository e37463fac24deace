use glam::Vec2;
use sim_core::{
    backend::{NativeBackend, PointBackend, ScriptBackend},
    config::{FieldConfig, MotionConfig},
    motion::MotionDriver,
    types::Viewport,
};
use rand::{SeedableRng, rngs::StdRng};

const SEED: u64 = 2024;

fn pair(viewport: Viewport) -> (NativeBackend, ScriptBackend) {
    let cfg = FieldConfig::default();
    (
        NativeBackend::load(viewport, cfg, SEED).unwrap(),
        ScriptBackend::new(viewport, cfg, SEED),
    )
}

/// A fixed pointer path across the header, including points off-screen.
fn golden_trace() -> Vec<Vec2> {
    let mut trace = vec![
        Vec2::new(400.0, 300.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(799.0, 599.0),
        Vec2::new(-500.0, 250.0),
        Vec2::new(1200.0, 1200.0),
    ];
    trace.extend((0..40).map(|i| {
        let t = i as f32 / 40.0 * std::f32::consts::TAU;
        Vec2::new(400.0 + 250.0 * t.cos(), 300.0 + 180.0 * t.sin())
    }));
    trace
}

fn assert_same_field(a: &dyn PointBackend, b: &dyn PointBackend) {
    assert_eq!(a.points_count(), b.points_count());
    for i in 0..a.points_count() {
        let pa = a.point(i).unwrap();
        let pb = b.point(i).unwrap();
        assert!((pa.pos - pb.pos).length() < 1e-4, "point {i}: {pa:?} vs {pb:?}");
        assert_eq!(pa.origin, pb.origin);
        assert_eq!(pa.radius, pb.radius);
        assert!((pa.active - pb.active).abs() < 1e-6, "point {i} active differs");
        assert!((pa.marker - pb.marker).abs() < 1e-6, "point {i} marker differs");

        assert_eq!(a.closest_count(i), b.closest_count(i));
        for k in 0..a.closest_count(i) {
            assert_eq!(
                a.point_closest(i, k).map(|p| p.origin),
                b.point_closest(i, k).map(|p| p.origin)
            );
        }
    }
}

#[test]
fn static_fields_agree_on_golden_trace() {
    let (mut native, mut script) = pair(Viewport::new(800.0, 600.0));
    assert_same_field(&native, &script);

    for target in golden_trace() {
        native.set_target(target);
        script.set_target(target);
        native.update().unwrap();
        script.update().unwrap();
        assert_same_field(&native, &script);
    }
}

#[test]
fn drifting_fields_agree_on_golden_trace() {
    let (mut native, mut script) = pair(Viewport::new(1024.0, 640.0));
    let mut native_motion = MotionDriver::new(MotionConfig::default());
    let mut script_motion = MotionDriver::new(MotionConfig::default());
    let mut native_rng = StdRng::seed_from_u64(SEED);
    let mut script_rng = StdRng::seed_from_u64(SEED);

    for target in golden_trace() {
        native_motion.advance(1.0 / 30.0, &mut native, &mut native_rng);
        script_motion.advance(1.0 / 30.0, &mut script, &mut script_rng);
        native.set_target(target);
        script.set_target(target);
        native.update().unwrap();
        script.update().unwrap();
        assert_same_field(&native, &script);
    }
}

#[test]
fn resize_is_idempotent_for_both_backends() {
    let (mut native_once, mut script_once) = pair(Viewport::new(800.0, 600.0));
    let (mut native_twice, mut script_twice) = pair(Viewport::new(800.0, 600.0));

    let vp = Viewport::new(1280.0, 720.0);
    native_once.resize(vp);
    script_once.resize(vp);
    native_twice.resize(vp);
    native_twice.resize(vp);
    script_twice.resize(vp);
    script_twice.resize(vp);

    assert_same_field(&native_once, &native_twice);
    assert_same_field(&script_once, &script_twice);
    assert_same_field(&native_once, &script_once);
}

#[test]
fn grid_scenarios() {
    for (w, h) in [(800.0, 600.0), (1920.0, 1080.0), (375.0, 812.0)] {
        let (native, _) = pair(Viewport::new(w, h));
        assert_eq!(native.points_count(), 400, "{w}x{h}");
        for i in 0..native.points_count() {
            assert_eq!(native.closest_count(i), 5);
        }
    }
}

//! Draws a backend's point field onto a 2-D surface.

use glam::Vec2;

use crate::{
    backend::{BackendError, PointBackend},
    config::PaletteConfig,
};

/// 8-bit colour with a floating-point alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(rgb: [u8; 3], a: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: a.clamp(0.0, 1.0),
        }
    }
}

/// Drawing surface provided by the host window.
pub trait Canvas {
    fn clear(&mut self);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub points_drawn: usize,
    pub links_drawn: usize,
}

/// Draws links and markers for every visible point of `backend`.
///
/// Points with zero activity produce no draw calls at all. A visible point
/// strokes a line to each visible neighbour, coloured by its own activity,
/// then fills its marker. The canvas is not cleared here.
///
/// ### Errors
/// [`BackendError::Fault`] if the backend reports a neighbour it cannot resolve.
pub fn draw_points(
    backend: &dyn PointBackend,
    canvas: &mut impl Canvas,
    palette: &PaletteConfig,
) -> Result<DrawStats, BackendError> {
    let mut stats = DrawStats::default();

    for i in 0..backend.points_count() {
        let Some(p) = backend.point(i) else {
            continue;
        };
        if p.active <= 0.0 {
            continue;
        }

        let link = Rgba::new(palette.link, p.active);
        for k in 0..backend.closest_count(i) {
            let q = backend.point_closest(i, k).ok_or_else(|| BackendError::Fault {
                backend: backend.kind(),
                reason: format!("point {i} lists unresolvable neighbour {k}"),
            })?;
            if q.active > 0.0 {
                canvas.stroke_line(p.pos, q.pos, link);
                stats.links_drawn += 1;
            }
        }

        canvas.fill_circle(p.pos, p.radius, Rgba::new(palette.marker, p.marker));
        stats.points_drawn += 1;
    }

    Ok(stats)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        backend::{NativeBackend, ScriptBackend},
        config::FieldConfig,
        types::Viewport,
    };

    #[derive(Debug, PartialEq)]
    pub(crate) enum Call {
        Clear,
        Line(Vec2, Vec2, Rgba),
        Circle(Vec2, f32, Rgba),
    }

    /// Canvas that records every call.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) calls: Vec<Call>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
            self.calls.push(Call::Line(from, to, color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
            self.calls.push(Call::Circle(center, radius, color));
        }
    }

    #[test]
    fn idle_field_draws_nothing() {
        let mut b = NativeBackend::load(Viewport::new(800.0, 600.0), FieldConfig::default(), 1).unwrap();
        b.set_target(Vec2::new(-10_000.0, -10_000.0));
        b.update().unwrap();

        let mut canvas = Recorder::default();
        let stats = draw_points(&b, &mut canvas, &PaletteConfig::default()).unwrap();
        assert_eq!(stats, DrawStats::default());
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn visible_points_draw_links_then_marker() {
        let mut b = ScriptBackend::new(Viewport::new(800.0, 600.0), FieldConfig::default(), 1);
        let p = b.point(210).unwrap();
        b.set_target(p.origin);
        b.update().unwrap();

        let palette = PaletteConfig::default();
        let mut canvas = Recorder::default();
        let stats = draw_points(&b, &mut canvas, &palette).unwrap();

        assert!(stats.points_drawn > 0);
        let circles = canvas.calls.iter().filter(|c| matches!(c, Call::Circle(..))).count();
        let lines = canvas.calls.iter().filter(|c| matches!(c, Call::Line(..))).count();
        assert_eq!(circles, stats.points_drawn);
        assert_eq!(lines, stats.links_drawn);

        let marker = Rgba::new(palette.marker, 0.6);
        assert!(canvas.calls.contains(&Call::Circle(p.pos, p.radius, marker)));

        // Every line is coloured by its source point and ends on a visible point.
        for call in &canvas.calls {
            if let Call::Line(_, _, color) = call {
                assert!(color.a > 0.0);
                assert_eq!([color.r, color.g, color.b], palette.link);
            }
        }
    }

    /// Index of the point whose origin is `origin`.
    fn index_of(b: &dyn PointBackend, origin: Vec2) -> usize {
        (0..b.points_count()).find(|&j| b.point(j).unwrap().origin == origin).unwrap()
    }

    #[test]
    fn links_skip_idle_neighbours_and_take_the_source_tier() {
        let mut b = ScriptBackend::new(Viewport::new(800.0, 600.0), FieldConfig::default(), 1);
        let src = 210;
        let mid = index_of(&b, b.point_closest(src, 0).unwrap().origin);
        let idle = index_of(&b, b.point_closest(src, 1).unwrap().origin);

        // Park the pair far from the rest of the field: `src` under the
        // target, `mid` 100 px away (d² = 10000, middle tier).
        let target = Vec2::new(5000.0, 5000.0);
        b.update_point_position(src, target);
        b.update_point_position(mid, target + Vec2::new(100.0, 0.0));
        b.set_target(target);
        b.update().unwrap();

        let (p, q, r) = (b.point(src).unwrap(), b.point(mid).unwrap(), b.point(idle).unwrap());
        assert_eq!(r.active, 0.0);

        let palette = PaletteConfig::default();
        let mut canvas = Recorder::default();
        let stats = draw_points(&b, &mut canvas, &palette).unwrap();
        assert_eq!(stats.points_drawn, 2);

        let from_src: Vec<_> = canvas
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Line(from, to, color) if *from == p.pos => Some((*to, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(from_src, vec![(q.pos, Rgba::new(palette.link, 0.3))]);

        for call in &canvas.calls {
            if let Call::Line(from, to, _) = call {
                assert_ne!(*from, r.pos);
                assert_ne!(*to, r.pos);
            }
        }

        // Markers follow the tier table: 0.6 near, 0.3 middle.
        assert!(canvas.calls.contains(&Call::Circle(p.pos, p.radius, Rgba::new(palette.marker, 0.6))));
        assert!(canvas.calls.contains(&Call::Circle(q.pos, q.radius, Rgba::new(palette.marker, 0.3))));
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgba::new([1, 2, 3], 1.7).a, 1.0);
        assert_eq!(Rgba::new([1, 2, 3], -0.2).a, 0.0);
    }
}

//! [`Canvas`] implementation on top of an egui [`egui::Painter`].

use glam::Vec2;
use sim_core::render::{Canvas, Rgba};

pub fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a * 255.0).round() as u8)
}

/// Draws header-local coordinates into a screen-space rectangle.
pub struct PainterCanvas {
    painter: egui::Painter,
    origin: egui::Pos2,
    background: egui::Color32,
}

impl PainterCanvas {
    pub fn new(painter: egui::Painter, origin: egui::Pos2, background: [u8; 3]) -> Self {
        Self {
            painter,
            origin,
            background: egui::Color32::from_rgb(background[0], background[1], background[2]),
        }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y)
    }
}

impl Canvas for PainterCanvas {
    fn clear(&mut self) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, self.background);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(1.0, to_color32(color)),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.painter.circle_filled(self.to_screen(center), radius, to_color32(color));
    }
}

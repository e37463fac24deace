//! Interactive particle-network header built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation [`Session`] and
//! implements [`eframe::App`] to play the role of the page hosting it: the
//! header canvas, pointer/scroll/resize events and the stat overlay.

use eframe::App;
use glam::Vec2;
use sim_core::{
    config::Config,
    session::Session,
    stats::BenchmarkReport,
    types::Viewport,
};

use crate::canvas::PainterCanvas;

/// Main application state for the header viewer.
///
/// The per-frame update is:
/// 1. Draw the stat overlay and handle its buttons.
/// 2. Lay out the header at window size, forward resize and pointer events.
/// 3. Call [`Session::frame`] with a canvas over the header rectangle.
/// 4. Forward the page scroll offset so the header stops rendering when hidden.
///
/// ### Fields
/// - `session` - Simulation state: backends, target, motion, statistics.
/// - `last_report` - Result of the last finished benchmark, for display.
pub struct Viewer {
    session: Session,
    last_report: Option<BenchmarkReport>,
}

impl Viewer {
    /// Creates a viewer whose header initially covers `viewport`.
    pub fn new(cfg: Config, viewport: Viewport) -> Self {
        Self {
            session: Session::new(cfg, viewport),
            last_report: None,
        }
    }

    fn engine_label(&self) -> &'static str {
        self.session.active_kind().label()
    }

    fn toggle_label(&self) -> &'static str {
        if self.session.native_available() {
            "Toggle Engine"
        } else {
            "Native Unavailable"
        }
    }

    fn benchmark_label(&self) -> &'static str {
        if self.session.benchmark().is_running() {
            "Stop Benchmark"
        } else {
            "Start Benchmark"
        }
    }

    /// Overlay lines: engine, FPS, points, average frame time.
    fn overlay_lines(&self) -> [String; 4] {
        let sample = self.session.stats().last();
        [
            format!("Engine: {}", self.engine_label()),
            format!("FPS: {}", sample.map_or("--".to_owned(), |s| s.fps.to_string())),
            format!("Points: {}", self.session.points_count()),
            format!(
                "Avg Frame Time: {}ms",
                sample.map_or("--".to_owned(), |s| format!("{:.2}", s.avg_frame_ms))
            ),
        ]
    }

    fn toggle_engine(&mut self) {
        self.session.toggle_backend();
    }

    fn toggle_benchmark(&mut self) {
        if let Some(report) = self.session.toggle_benchmark() {
            self.last_report = Some(report);
        }
    }

    /// Builds the floating stat overlay in the top-right corner.
    fn ui_overlay(&mut self, ctx: &egui::Context) {
        egui::Area::new("overlay".into())
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 204))
                    .inner_margin(egui::Margin::same(12))
                    .corner_radius(8)
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            for line in self.overlay_lines() {
                                ui.label(egui::RichText::new(line).monospace().color(egui::Color32::WHITE));
                            }

                            if let Some(report) = self.last_report {
                                let fmt = |v: Option<f64>| v.map_or("N/A".to_owned(), |v| format!("{v:.1}"));
                                ui.separator();
                                ui.label(format!("Native avg FPS: {}", fmt(report.native_avg)));
                                ui.label(format!("Script avg FPS: {}", fmt(report.script_avg)));
                                if let Some(gain) = report.improvement_pct() {
                                    ui.label(format!("Improvement: {gain:.1}%"));
                                }
                            }

                            let can_toggle = self.session.native_available();
                            if ui.add_enabled(can_toggle, egui::Button::new(self.toggle_label())).clicked() {
                                self.toggle_engine();
                            }
                            if ui.button(self.benchmark_label()).clicked() {
                                self.toggle_benchmark();
                            }
                        });
                    });
            });
    }

    /// Builds the scrollable page: the header canvas followed by the page body.
    ///
    /// The body is at least as tall as the header, so the header can be
    /// scrolled fully out of view.
    ///
    /// ### Returns
    /// How far the page can scroll, in points.
    fn ui_page(&mut self, ctx: &egui::Context) -> f32 {
        let dt = ctx.input(|i| i.stable_dt);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let header_size = ui.available_size();

                let output = egui::ScrollArea::vertical().show(ui, |ui| {
                    let (rect, response) = ui.allocate_exact_size(header_size, egui::Sense::hover());
                    self.session.resize(Viewport::new(rect.width(), rect.height()));

                    if let Some(pos) = response.hover_pos() {
                        let local = pos - rect.min;
                        self.session.pointer_moved(Vec2::new(local.x, local.y));
                    }

                    let background = self.session.config().palette.background;
                    let mut canvas = PainterCanvas::new(ui.painter_at(rect), rect.min, background);
                    self.session.frame(dt, &mut canvas);

                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Particle Network");
                        ui.label("Move the pointer over the header to light up nearby points.");
                        ui.label("Scroll the header out of view to pause rendering.");
                        ui.add_space(header_size.y);
                    });
                });

                self.session.set_scroll_offset(output.state.offset.y);
                (output.content_size.y - output.inner_rect.height()).max(0.0)
            })
            .inner
    }
}

impl App for Viewer {
    /// eframe callback that builds the page and overlay for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_page(ctx);
        self.ui_overlay(ctx);
        ctx.request_repaint();
    }
}

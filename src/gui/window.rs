//! eframe window: static sphere wireframe plus per-frame vector glyphs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use nalgebra::Vector3;

use super::{sphere_wireframe, Camera, GraphicalRenderer, ScreenPoint, AVERAGE_RGB, CURRENT_RGB, WIRE_RGB};
use crate::core::error::{BlochError, Result};
use crate::core::{BlochVector, CancelToken, Frame};
use crate::renderer::FrameStream;

const POLL: Duration = Duration::from_millis(100);
const HEADING_CLR: egui::Color32 = egui::Color32::from_rgb(220, 218, 210);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);

fn rgb(c: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

fn depth_alpha(depth: f64) -> u8 {
    let t = ((depth + 1.0) / 2.0).clamp(0.0, 1.0);
    (30.0 + 150.0 * t) as u8
}

struct BlochWindow {
    frames: FrameStream,
    current: Option<Frame>,
    exhausted: bool,
    last_advance: Option<Instant>,
    interval: Duration,
    camera: Camera,
    wireframe: Vec<Vec<Vector3<f64>>>,
    cancel: CancelToken,
    shown: Arc<AtomicUsize>,
}

impl BlochWindow {
    fn advance(&mut self) {
        if self.exhausted {
            return;
        }
        let due = self.last_advance.map_or(true, |t| t.elapsed() >= self.interval);
        if !due {
            return;
        }
        match self.frames.next() {
            Some(frame) => {
                self.current = Some(frame);
                self.shown.fetch_add(1, Ordering::SeqCst);
                self.last_advance = Some(Instant::now());
            }
            None => {
                tracing::debug!("window playback finished, holding last frame");
                self.exhausted = true;
            }
        }
    }

    fn to_screen(p: ScreenPoint, rect: egui::Rect) -> egui::Pos2 {
        let size = (rect.width().min(rect.height()) * 0.38) as f64;
        let c = rect.center();
        egui::pos2(c.x + (p.u * size) as f32, c.y - (p.v * size) as f32)
    }

    fn draw(&self, painter: &egui::Painter, rect: egui::Rect) {
        for line in &self.wireframe {
            for pair in line.windows(2) {
                let a = self.camera.view(pair[0]);
                let b = self.camera.view(pair[1]);
                let alpha = depth_alpha((a.depth + b.depth) / 2.0);
                painter.line_segment(
                    [Self::to_screen(a, rect), Self::to_screen(b, rect)],
                    egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(WIRE_RGB[0], WIRE_RGB[1], WIRE_RGB[2], alpha)),
                );
            }
        }

        let origin = Self::to_screen(self.camera.view(Vector3::zeros()), rect);
        for (axis, label) in [
            (Vector3::new(1.15, 0.0, 0.0), "x"),
            (Vector3::new(0.0, 1.15, 0.0), "y"),
            (Vector3::new(0.0, 0.0, 1.15), "|0⟩"),
            (Vector3::new(0.0, 0.0, -1.15), "|1⟩"),
        ] {
            let tip = Self::to_screen(self.camera.view(axis), rect);
            painter.line_segment([origin, tip], egui::Stroke::new(1.0, DIM));
            painter.text(tip, egui::Align2::CENTER_CENTER, label, egui::FontId::proportional(14.0), DIM);
        }

        let Some(frame) = self.current else {
            return;
        };

        if frame.is_measurement() {
            self.draw_vector(painter, rect, origin, &frame.average, rgb(AVERAGE_RGB));
        }
        self.draw_vector(painter, rect, origin, &frame.current, rgb(CURRENT_RGB));

        painter.text(
            rect.center_top() + egui::vec2(0.0, 12.0),
            egui::Align2::CENTER_TOP,
            frame.caption(),
            egui::FontId::proportional(17.0),
            HEADING_CLR,
        );
        painter.text(
            rect.left_bottom() + egui::vec2(12.0, -12.0),
            egui::Align2::LEFT_BOTTOM,
            format!("frame {}/{}", frame.index + 1, frame.total),
            egui::FontId::monospace(13.0),
            DIM,
        );
        if frame.is_measurement() {
            painter.text(
                rect.right_bottom() + egui::vec2(-12.0, -30.0),
                egui::Align2::RIGHT_BOTTOM,
                "current measurement",
                egui::FontId::proportional(13.0),
                rgb(CURRENT_RGB),
            );
            painter.text(
                rect.right_bottom() + egui::vec2(-12.0, -12.0),
                egui::Align2::RIGHT_BOTTOM,
                "running average",
                egui::FontId::proportional(13.0),
                rgb(AVERAGE_RGB),
            );
        }
    }

    fn draw_vector(&self, painter: &egui::Painter, rect: egui::Rect, origin: egui::Pos2, v: &BlochVector, color: egui::Color32) {
        let tip = Self::to_screen(self.camera.view_bloch(v), rect);
        painter.line_segment([origin, tip], egui::Stroke::new(3.0, color));
        painter.circle_filled(tip, 4.5, color);
    }
}

impl eframe::App for BlochWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.cancel.cancel();
        }
        if self.cancel.is_cancelled() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.advance();

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            self.draw(ui.painter(), rect);
        });

        ctx.request_repaint_after(self.interval.min(POLL));
    }
}

pub(super) fn run(renderer: GraphicalRenderer, frames: FrameStream, cancel: CancelToken) -> Result<usize> {
    let shown = Arc::new(AtomicUsize::new(0));
    let app = BlochWindow {
        frames,
        current: None,
        exhausted: false,
        last_advance: None,
        interval: renderer.interval,
        camera: renderer.camera,
        wireframe: sphere_wireframe(7, 12, 64),
        cancel: cancel.clone(),
        shown: Arc::clone(&shown),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([renderer.width, renderer.height])
            .with_title("Bloch sphere"),
        ..Default::default()
    };

    eframe::run_native("bloch", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| BlochError::NoDisplaySurface(format!("window backend failed: {e}")))?;

    // closing the window ends the run
    cancel.cancel();
    Ok(shown.load(Ordering::SeqCst))
}

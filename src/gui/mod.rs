//! Windowed 3-D renderer.
//!
//! The geometry (camera, sphere wireframe) lives here and is always compiled so
//! it can be tested headless. The egui/eframe window is behind the `gui` feature.
use std::f64::consts::{PI, TAU};
use std::time::Duration;

use nalgebra::{Rotation3, Vector3};

use crate::core::error::{BlochError, Result};
use crate::core::{BlochVector, CancelToken};
use crate::renderer::{FrameStream, Renderer};

#[cfg(feature = "gui")]
mod window;

pub const CURRENT_RGB: [u8; 3] = [70, 130, 230];
pub const AVERAGE_RGB: [u8; 3] = [230, 70, 70];
pub const WIRE_RGB: [u8; 3] = [120, 140, 160];

/// Orthographic view: yaw about +z, then pitch about +x. Screen `u` is right,
/// `v` is up, `depth` grows toward the viewer.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    rotation: Rotation3<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub u: f64,
    pub v: f64,
    pub depth: f64,
}

impl Camera {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), pitch)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), yaw);
        Self { rotation }
    }

    pub fn view(&self, p: Vector3<f64>) -> ScreenPoint {
        let r = self.rotation * p;
        ScreenPoint { u: r.x, v: r.z, depth: -r.y }
    }

    pub fn view_bloch(&self, b: &BlochVector) -> ScreenPoint {
        self.view(b.as_vector())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(-0.6, 0.3)
    }
}

/// Latitude circles plus pole-to-pole meridians on the unit sphere.
pub fn sphere_wireframe(latitudes: usize, meridians: usize, segments: usize) -> Vec<Vec<Vector3<f64>>> {
    let segments = segments.max(2);
    let mut lines = Vec::with_capacity(latitudes + meridians);
    for k in 1..=latitudes {
        let theta = PI * k as f64 / (latitudes + 1) as f64;
        lines.push(
            (0..=segments)
                .map(|s| {
                    let phi = TAU * s as f64 / segments as f64;
                    Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
                })
                .collect(),
        );
    }
    for k in 0..meridians {
        let phi = TAU * k as f64 / meridians as f64;
        lines.push(
            (0..=segments)
                .map(|s| {
                    let theta = PI * s as f64 / segments as f64;
                    Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
                })
                .collect(),
        );
    }
    lines
}

/// Fails fast on X11/Wayland platforms when no display server is advertised.
pub fn display_probe(var: impl Fn(&str) -> Option<String>) -> Result<()> {
    if cfg!(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd"
    )) {
        let set = |key: &str| var(key).is_some_and(|v| !v.trim().is_empty());
        if !set("DISPLAY") && !set("WAYLAND_DISPLAY") {
            return Err(BlochError::no_display("neither DISPLAY nor WAYLAND_DISPLAY is set"));
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct GraphicalRenderer {
    pub width: f32,
    pub height: f32,
    pub interval: Duration,
    pub camera: Camera,
}

impl GraphicalRenderer {
    pub fn new(width: f32, height: f32, interval: Duration) -> Self {
        Self { width, height, interval, camera: Camera::default() }
    }
}

impl Renderer for GraphicalRenderer {
    fn play(&mut self, frames: FrameStream, cancel: &CancelToken) -> Result<usize> {
        display_probe(|key| std::env::var(key).ok())?;
        #[cfg(feature = "gui")]
        {
            window::run(*self, frames, cancel.clone())
        }
        #[cfg(not(feature = "gui"))]
        {
            let _ = (frames, cancel);
            Err(BlochError::no_display("window support not compiled in (rebuild with `--features gui`)"))
        }
    }
}

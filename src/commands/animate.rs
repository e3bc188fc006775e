//! `rotate` and `flicker`: build a frame sequence, pick a renderer once, play.
use std::io;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::RendererKind;
use crate::config::Settings;
use crate::core::{CancelToken, FrameSequencer, MeasurementSampler, MeasurementSchedule, RotationSchedule};
use crate::gui::GraphicalRenderer;
use crate::renderer::{FrameStream, Renderer};
use crate::tui::AsciiRenderer;

pub struct Playback<'a> {
    pub settings: &'a Settings,
    pub renderer: RendererKind,
    pub delay_ms: Option<u64>,
    pub cancel: CancelToken,
}

pub fn make_renderer(kind: RendererKind, settings: &Settings, delay_ms: Option<u64>) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Ascii => {
            let delay = Duration::from_millis(delay_ms.unwrap_or(settings.ascii.delay_ms));
            Box::new(AsciiRenderer::new(io::stdout(), settings.ascii.width, settings.ascii.height, delay))
        }
        RendererKind::Window => {
            let interval = Duration::from_millis(delay_ms.unwrap_or(settings.window.interval_ms));
            Box::new(GraphicalRenderer::new(settings.window.width, settings.window.height, interval))
        }
    }
}

fn play(p: &Playback<'_>, frames: FrameStream, total: usize) -> Result<()> {
    let mut renderer = make_renderer(p.renderer, p.settings, p.delay_ms);
    tracing::info!(renderer = ?p.renderer, total, "starting playback");
    let shown = renderer.play(frames, &p.cancel).context("playback failed")?;
    if shown < total {
        eprintln!("{} stopped after {shown}/{total} frames", "info:".cyan().bold());
    }
    Ok(())
}

pub fn rotate(p: &Playback<'_>, start: f64, end: f64, frames: usize) -> Result<()> {
    if !start.is_finite() || !end.is_finite() {
        bail!("rotation angles must be finite (got start={start}, end={end})");
    }
    let schedule = RotationSchedule::new(start, end, frames);
    let seq = FrameSequencer::new(frames, schedule, p.cancel.clone());
    play(p, Box::new(seq), frames)
}

pub fn flicker(p: &Playback<'_>, prob_one: f64, frames: usize, shots_per_frame: u32, seed: Option<u64>) -> Result<()> {
    let sampler = match seed.or(p.settings.sampler.seed) {
        Some(s) => MeasurementSampler::seeded(s),
        None => MeasurementSampler::from_entropy(),
    };
    // Validated here, before anything is drawn.
    let schedule = MeasurementSchedule::new(prob_one, shots_per_frame, sampler)?;
    let seq = FrameSequencer::new(frames, schedule, p.cancel.clone());
    play(p, Box::new(seq), frames)
}

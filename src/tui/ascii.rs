//! Terminal renderer: x–z cross-section of the Bloch sphere, repainted in place.
use std::f64::consts::TAU;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType, SetTitle},
};

use super::grid::{Cell, Grid, Tint};
use crate::core::error::Result;
use crate::core::{CancelToken, Frame, FrameDetail};
use crate::renderer::{FrameStream, Renderer};

const OUTLINE_POINTS: usize = 360;
const ROW_INDENT: &str = "  ";

/// Maps Bloch (x, z) ∈ [−1, 1]² onto grid cells. Rows grow downward, so z is inverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    center_col: i64,
    center_row: i64,
    col_scale: i64,
    row_scale: i64,
}

impl Projection {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            center_col: (width / 2) as i64,
            center_row: (height / 2) as i64,
            col_scale: (width / 3) as i64,
            row_scale: (height / 3) as i64,
        }
    }

    pub fn project(&self, x: f64, z: f64) -> (i64, i64) {
        let col = self.center_col + (x * self.col_scale as f64).round() as i64;
        let row = self.center_row - (z * self.row_scale as f64).round() as i64;
        (col, row)
    }

    pub fn origin(&self) -> (i64, i64) {
        (self.center_col, self.center_row)
    }
}

/// Segment glyph for a line from `from` to `to` in screen space.
fn line_glyph(from: (i64, i64), to: (i64, i64)) -> char {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    if dx.abs() > 2 * dy.abs() {
        '-'
    } else if dy.abs() > 2 * dx.abs() || dx == 0 {
        '|'
    } else if (dx > 0) != (dy > 0) {
        '/'
    } else {
        '\\'
    }
}

pub struct AsciiRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
    projection: Projection,
    outline: Vec<(i64, i64)>,
    delay: Duration,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, width: usize, height: usize, delay: Duration) -> Self {
        let projection = Projection::new(width, height);
        let outline = (0..OUTLINE_POINTS)
            .map(|i| {
                let angle = i as f64 * TAU / OUTLINE_POINTS as f64;
                projection.project(angle.cos(), angle.sin())
            })
            .collect();
        Self { out, width, height, projection, outline, delay }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Builds the grid for one frame from scratch.
    pub fn rasterize(&self, frame: &Frame) -> Grid {
        let mut grid = Grid::new(self.width, self.height);
        for &(c, r) in &self.outline {
            grid.set_if_blank(c, r, Cell::new('o', Tint::Dim));
        }

        let origin = self.projection.origin();
        let current_tip = self.tip(frame.current.x, frame.current.z);

        if frame.is_measurement() {
            let average_tip = self.tip(frame.average.x, frame.average.z);
            grid.draw_line(origin, average_tip, Cell::new(line_glyph(origin, average_tip), Tint::Red));
            grid.draw_line(origin, current_tip, Cell::new(line_glyph(origin, current_tip), Tint::Blue));
            grid.set(average_tip.0, average_tip.1, Cell::new('+', Tint::Red));
            let marker = if current_tip == average_tip { Tint::Magenta } else { Tint::Blue };
            grid.set(current_tip.0, current_tip.1, Cell::new('*', marker));
        } else {
            grid.draw_line(origin, current_tip, Cell::new(line_glyph(origin, current_tip), Tint::Blue));
            grid.set(current_tip.0, current_tip.1, Cell::new('*', Tint::Blue));
        }
        grid
    }

    fn tip(&self, x: f64, z: f64) -> (i64, i64) {
        self.projection.project(x.clamp(-1.0, 1.0), z.clamp(-1.0, 1.0))
    }

    /// Header, grid rows and footer as separate lines.
    pub fn compose(&self, frame: &Frame) -> Vec<String> {
        let grid = self.rasterize(frame);
        let mut lines = header(frame);
        lines.push(String::new());
        lines.extend((0..grid.height()).map(|r| format!("{ROW_INDENT}{}", grid.painted_row(r))));
        lines.push(String::new());
        lines.extend(footer(frame));
        lines
    }

    /// Writes the whole scene in a single buffer so the terminal never shows half a frame.
    pub fn paint(&mut self, frame: &Frame) -> io::Result<()> {
        let lines = self.compose(frame);
        let mut buf: Vec<u8> = Vec::with_capacity(lines.iter().map(|l| l.len() + 8).sum());
        queue!(buf, MoveTo(0, 0))?;
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            queue!(buf, Print(line), Clear(ClearType::UntilNewLine))?;
            if i != last {
                queue!(buf, Print("\n"))?;
            }
        }
        self.out.write_all(&buf)?;
        self.out.flush()
    }

    fn begin(&mut self) -> io::Result<()> {
        queue!(self.out, SetTitle("Bloch sphere"), Clear(ClearType::All), Hide)?;
        self.out.flush()
    }

    fn end(&mut self) -> io::Result<()> {
        queue!(self.out, Show, Print("\n"))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn play(&mut self, frames: FrameStream, _cancel: &CancelToken) -> Result<usize> {
        self.begin()?;
        let mut shown = 0;
        let mut outcome = Ok(());
        for frame in frames {
            if let Err(e) = self.paint(&frame) {
                outcome = Err(e);
                break;
            }
            shown += 1;
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        let restored = self.end();
        outcome?;
        restored?;
        tracing::debug!(shown, "terminal playback finished");
        Ok(shown)
    }
}

fn header(frame: &Frame) -> Vec<String> {
    let mut lines = vec![
        " ASCII Bloch sphere cross-section (x–z plane)".to_string(),
        "   top of sphere ≈ |0> (z=+1), bottom ≈ |1> (z=-1)".to_string(),
    ];
    match frame.detail {
        FrameDetail::Rotation { .. } => {
            lines.push("   blue line & * = state vector R_y(θ)|0>".to_string());
        }
        FrameDetail::Measurement { .. } => {
            lines.push("   blue line & * = current measurement (flicking)".to_string());
            lines.push("   red  line & + = running average (stabilising)".to_string());
            lines.push("   magenta *     = both tips in the same cell".to_string());
        }
    }
    lines
}

fn footer(frame: &Frame) -> Vec<String> {
    let mut lines = vec![format!(" step {}/{}", frame.index + 1, frame.total)];
    match frame.detail {
        FrameDetail::Rotation { theta } => {
            let v = frame.current;
            lines.push(format!(" θ = {theta:.3} rad"));
            lines.push(format!(" bloch vector: x = {:+.3}, y = {:+.3}, z = {:+.3}", v.x, v.y, v.z));
        }
        FrameDetail::Measurement { last_outcome, shots_this_frame } => {
            let s = frame.stats;
            lines.push(format!(
                " last outcome: {}  (0 => |0>, 1 => |1>), shots this frame: {shots_this_frame}",
                last_outcome.bit()
            ));
            lines.push(format!(" counts: 0 -> {}, 1 -> {}, total -> {}", s.count0, s.count1, s.total));
            lines.push(format!(" estimated P(0) ≈ {:.3}, P(1) ≈ {:.3}", s.p_zero(), s.p_one()));
            lines.push(format!(
                " current z: {:+.3}, running <Z>: {:+.3}",
                frame.current.z, frame.average.z
            ));
        }
    }
    lines
}

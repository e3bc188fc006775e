//! Fixed-size character canvas with per-cell color tags.
//!
//! Every access goes through [`Grid::offset`], so callers may hand in any
//! coordinate: anything outside `width × height` is dropped.
use colored::Colorize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tint {
    #[default]
    Plain,
    Dim,
    Blue,
    Red,
    Magenta,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub tint: Tint,
}

impl Cell {
    pub const BLANK: Cell = Cell { glyph: ' ', tint: Tint::Plain };

    pub const fn new(glyph: char, tint: Tint) -> Self {
        Self { glyph, tint }
    }

    pub fn is_blank(&self) -> bool {
        self.glyph == ' '
    }

    /// Glyph wrapped in its ANSI color (honours NO_COLOR / CLICOLOR via `colored`).
    pub fn paint(&self) -> String {
        let g = self.glyph.to_string();
        match self.tint {
            Tint::Plain => g,
            Tint::Dim => g.dimmed().to_string(),
            Tint::Blue => g.blue().to_string(),
            Tint::Red => g.red().to_string(),
            Tint::Magenta => g.magenta().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::BLANK; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (c, r) = (col as usize, row as usize);
        (c < self.width && r < self.height).then(|| r * self.width + c)
    }

    pub fn get(&self, col: i64, row: i64) -> Option<Cell> {
        self.offset(col, row).map(|i| self.cells[i])
    }

    /// Returns false when the point was clipped.
    pub fn set(&mut self, col: i64, row: i64, cell: Cell) -> bool {
        match self.offset(col, row) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn set_if_blank(&mut self, col: i64, row: i64, cell: Cell) -> bool {
        match self.offset(col, row) {
            Some(i) if self.cells[i].is_blank() => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    /// Plots a Bresenham segment; returns the number of cells that landed inside the grid.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), cell: Cell) -> usize {
        bresenham(from, to)
            .into_iter()
            .filter(|&(c, r)| self.set(c, r, cell))
            .count()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn painted_row(&self, row: usize) -> String {
        self.row(row).iter().map(Cell::paint).collect()
    }

    pub fn plain_row(&self, row: usize) -> String {
        self.row(row).iter().map(|c| c.glyph).collect()
    }

    pub fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }
}

/// Integer Bresenham line, all octants, endpoints included.
pub fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

pub mod ascii;
pub mod grid;

pub use ascii::{AsciiRenderer, Projection};
pub use grid::{bresenham, Cell, Grid, Tint};

//! Renderer capability shared by the terminal and window front-ends.
use crate::core::error::Result;
use crate::core::{CancelToken, Frame};

/// Owned, lazily produced frames. The window loop keeps the stream for the
/// lifetime of the app, so it has to be `'static`.
pub type FrameStream = Box<dyn Iterator<Item = Frame>>;

pub trait Renderer {
    /// Consumes `frames` until exhausted or cancelled. Returns how many frames were shown.
    fn play(&mut self, frames: FrameStream, cancel: &CancelToken) -> Result<usize>;
}

// Library surface shared by the `bloch` binary and the integration tests.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod gui;
pub mod renderer;
pub mod tui;

pub use crate::core::error::BlochError;

//! Command-line interface
//!
//! Argument parsing for the node binary and the text view it prints.

pub mod commands;
pub mod display;

pub use commands::{Command, Opt};
pub use display::render_chain;

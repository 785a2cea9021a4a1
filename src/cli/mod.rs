//! Command-line surface of the inspector binary.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

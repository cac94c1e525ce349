//! CLI module for the tomato timer.
//!
//! This module provides the terminal view:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `input`: Key-to-command mapping
//! - `view`: Loop that renders state and forwards commands

pub mod commands;
pub mod display;
pub mod input;
pub mod view;

pub use commands::{Cli, Commands, RunArgs};
pub use display::{Display, OutputFormat};
pub use input::{parse_input, Input};
pub use view::run_view;

//! Display utilities for the tomato CLI.
//!
//! This module provides formatted output for:
//! - The single-line clock face with progress bar
//! - JSON state lines
//! - Key help, session summary and error messages

use std::io::{self, Write};

use crate::types::{TimerConfig, TimerState, TimerView};

use super::input::KEY_BINDINGS;

/// Width of the progress bar in characters.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Clears the current terminal line and returns the cursor to column 0.
const CLEAR_LINE: &str = "\r\x1b[2K";

// ============================================================================
// OutputFormat
// ============================================================================

/// How state changes are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Clock face redrawn in place
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Writes one state update in the requested format.
    pub fn write_state<W: Write>(
        out: &mut W,
        format: OutputFormat,
        state: &TimerState,
        config: &TimerConfig,
    ) -> io::Result<()> {
        match format {
            OutputFormat::Text => {
                write!(out, "{}{}", CLEAR_LINE, Self::render_line(state, &state.view(config)))?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, state)?;
                writeln!(out)?;
            }
        }
        out.flush()
    }

    /// Renders the clock face line, e.g. `> 24:59  Work Time  [#---]   0%`.
    pub fn render_line(state: &TimerState, view: &TimerView) -> String {
        let marker = if state.is_running { ">" } else { "||" };
        let mut line = format!(
            "{:<2} {}  {:<10}  [{}] {:>3.0}%",
            marker,
            view.clock_face(),
            state.mode.label(),
            Self::progress_bar(view.progress_percent, PROGRESS_BAR_WIDTH),
            view.progress_percent.floor()
        );
        if state.completed_work_sessions > 0 {
            line.push_str(&format!(
                "  Sessions completed: {}",
                state.completed_work_sessions
            ));
        }
        line
    }

    /// Draws a progress bar `width` characters wide.
    pub fn progress_bar(percent: f64, width: usize) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
        let mut bar = "#".repeat(filled);
        bar.push_str(&"-".repeat(width - filled));
        bar
    }

    /// Writes the key bindings.
    pub fn write_key_help<W: Write>(out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        for (keys, description) in KEY_BINDINGS {
            writeln!(out, "  {:<12} {}", keys, description)?;
        }
        out.flush()
    }

    /// Shows the summary printed on exit.
    pub fn show_summary(state: &TimerState) {
        println!();
        match state.completed_work_sessions {
            0 => println!("No sessions completed"),
            1 => println!("1 session completed"),
            n => println!("{} sessions completed", n),
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

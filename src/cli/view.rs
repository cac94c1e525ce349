//! Terminal view loop.
//!
//! Observes scheduler state and turns input lines into commands. The view
//! holds no timer logic of its own.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::timer::SchedulerHandle;
use crate::types::{TimerConfig, TimerState};

use super::display::{Display, OutputFormat};
use super::input::{parse_input, Input};

enum ViewEvent {
    StateChanged(bool),
    Line(std::io::Result<Option<String>>),
}

/// Renders state changes and forwards commands until the user quits, input
/// ends, or the scheduler stops. Returns the last state seen.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the
/// scheduler goes away while a command is in flight.
pub async fn run_view<R, W>(
    handle: &SchedulerHandle,
    config: &TimerConfig,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<TimerState>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut states = handle.subscribe();

    let mut last = *states.borrow_and_update();
    Display::write_state(out, format, &last, config).context("Failed to write state")?;

    loop {
        let event = tokio::select! {
            changed = states.changed() => ViewEvent::StateChanged(changed.is_ok()),
            line = lines.next_line() => ViewEvent::Line(line),
        };

        match event {
            ViewEvent::StateChanged(false) => break,
            ViewEvent::StateChanged(true) => {
                let state = *states.borrow_and_update();
                if state != last {
                    Display::write_state(out, format, &state, config)
                        .context("Failed to write state")?;
                    last = state;
                }
            }
            ViewEvent::Line(line) => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("Input closed");
                    break;
                };
                match parse_input(&line) {
                    Some(Input::Command(command)) => {
                        let state = handle.send(command).await?;
                        // Already rendered here; skip the matching watch update.
                        let _ = states.borrow_and_update();
                        if state != last {
                            Display::write_state(out, format, &state, config)
                                .context("Failed to write state")?;
                            last = state;
                        }
                    }
                    Some(Input::Help) if format == OutputFormat::Text => {
                        Display::write_key_help(out).context("Failed to write help")?;
                        Display::write_state(out, format, &last, config)
                            .context("Failed to write state")?;
                    }
                    Some(Input::Help) => {}
                    Some(Input::Quit) => break,
                    None => debug!("Ignoring unknown input: {:?}", line),
                }
            }
        }
    }

    Ok(last)
}

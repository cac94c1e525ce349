//! Core data types for the Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Timer modes and their nominal durations
//! - Timer configuration with validation
//! - State snapshots and the derived display projection

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nominal work period length in seconds (25 minutes).
pub const DEFAULT_WORK_SECONDS: u32 = 25 * 60;

/// Nominal break period length in seconds (5 minutes).
pub const DEFAULT_BREAK_SECONDS: u32 = 5 * 60;

// ============================================================================
// TimerMode
// ============================================================================

/// The active period type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work period
    #[default]
    Work,
    /// Rest period between work sessions
    Break,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::Break => "break",
        }
    }

    /// Returns the label shown under the clock face.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work Time",
            TimerMode::Break => "Break Time",
        }
    }

    /// Returns the mode that follows this one.
    pub fn other(&self) -> Self {
        match self {
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break => TimerMode::Work,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Errors raised while validating a [`TimerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A period was configured with no length at all.
    #[error("{mode} duration must be at least one second")]
    ZeroDuration {
        /// Mode whose duration is zero
        mode: TimerMode,
    },
}

/// Period lengths handed to the engine at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Work period length in seconds
    pub work_seconds: u32,
    /// Break period length in seconds
    pub break_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            break_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

impl TimerConfig {
    /// Returns a copy with the given work period length.
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Returns a copy with the given break period length.
    pub fn with_break_seconds(mut self, seconds: u32) -> Self {
        self.break_seconds = seconds;
        self
    }

    /// Nominal duration of `mode` in seconds.
    pub fn duration_of(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_seconds,
            TimerMode::Break => self.break_seconds,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDuration`] if either period is zero seconds long.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in [TimerMode::Work, TimerMode::Break] {
            if self.duration_of(mode) == 0 {
                return Err(ConfigError::ZeroDuration { mode });
            }
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Point-in-time snapshot of the timer, as read by views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Current period type
    pub mode: TimerMode,
    /// Seconds left in the current period
    pub remaining_seconds: u32,
    /// Whether the countdown is advancing
    pub is_running: bool,
    /// Number of transitions into work mode so far
    pub completed_work_sessions: u32,
}

impl TimerState {
    /// The state every engine starts in.
    pub fn initial(config: &TimerConfig) -> Self {
        Self {
            mode: TimerMode::Work,
            remaining_seconds: config.duration_of(TimerMode::Work),
            is_running: false,
            completed_work_sessions: 0,
        }
    }

    /// Builds the display projection for this snapshot.
    pub fn view(&self, config: &TimerConfig) -> TimerView {
        TimerView::new(self.remaining_seconds, config.duration_of(self.mode))
    }
}

// ============================================================================
// TimerView
// ============================================================================

/// Derived projection used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    /// Whole minutes left
    pub minutes: u32,
    /// Seconds left within the current minute
    pub seconds: u32,
    /// Share of the period already elapsed, 0.0 to 100.0
    pub progress_percent: f64,
}

impl TimerView {
    /// Projects `remaining` seconds of a period lasting `duration` seconds.
    pub fn new(remaining: u32, duration: u32) -> Self {
        let progress_percent = if duration == 0 {
            100.0
        } else {
            (1.0 - f64::from(remaining) / f64::from(duration)) * 100.0
        };
        Self {
            minutes: remaining / 60,
            seconds: remaining % 60,
            progress_percent,
        }
    }

    /// Formats the remaining time as `MM:SS`.
    pub fn clock_face(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Timer engine for the Pomodoro timer.
//!
//! The engine is a pure state machine over {Idle, Running} × {Work, Break}.
//! It owns no clock and performs no I/O: the scheduler feeds it ticks and
//! decides what happens when a period runs out.

use tracing::debug;

use crate::types::{ConfigError, TimerConfig, TimerMode, TimerState, TimerView};

// ============================================================================
// Phase
// ============================================================================

/// Explicit state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Countdown is stopped
    Idle {
        /// Current mode
        mode: TimerMode,
        /// Seconds left in the period
        remaining: u32,
    },
    /// Countdown advances on every tick
    Running {
        /// Current mode
        mode: TimerMode,
        /// Seconds left in the period, never zero
        remaining: u32,
    },
}

impl Phase {
    /// Returns the mode of this phase.
    pub fn mode(&self) -> TimerMode {
        match *self {
            Phase::Idle { mode, .. } | Phase::Running { mode, .. } => mode,
        }
    }

    /// Returns the seconds left in this phase.
    pub fn remaining(&self) -> u32 {
        match *self {
            Phase::Idle { remaining, .. } | Phase::Running { remaining, .. } => remaining,
        }
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running { .. })
    }
}

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of feeding one tick to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was idle; nothing changed
    Ignored,
    /// One second was taken off the countdown
    Advanced {
        /// Seconds left after this tick
        remaining: u32,
    },
    /// The countdown reached zero and stopped
    Completed {
        /// Mode of the period that just finished
        mode: TimerMode,
    },
}

// ============================================================================
// Command
// ============================================================================

/// Zero-argument commands a view can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or pause the countdown
    ToggleRun,
    /// Refill the current period and stop
    Reset,
    /// Jump to the other mode
    SwitchMode,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// State machine that owns the timer state.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    completed_work_sessions: u32,
}

impl Default for TimerEngine {
    fn default() -> Self {
        let config = TimerConfig::default();
        Self {
            phase: Phase::Idle {
                mode: TimerMode::Work,
                remaining: config.duration_of(TimerMode::Work),
            },
            config,
            completed_work_sessions: 0,
        }
    }
}

impl TimerEngine {
    /// Creates an engine in `Idle(Work, work duration)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration has a zero-length period.
    pub fn new(config: TimerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = TimerState::initial(&config);
        Ok(Self {
            config,
            phase: Phase::Idle {
                mode: initial.mode,
                remaining: initial.remaining_seconds,
            },
            completed_work_sessions: initial.completed_work_sessions,
        })
    }

    /// Starts or pauses the countdown.
    ///
    /// A finished period (`Idle` at zero) cannot be started; it has to be
    /// switched or reset first.
    pub fn toggle_run(&mut self) {
        self.phase = match self.phase {
            Phase::Idle { remaining: 0, .. } => {
                debug!("Ignoring start request: period already finished");
                self.phase
            }
            Phase::Idle { mode, remaining } => Phase::Running { mode, remaining },
            Phase::Running { mode, remaining } => Phase::Idle { mode, remaining },
        };
    }

    /// Stops the countdown and refills the current mode's period.
    pub fn reset(&mut self) {
        let mode = self.phase.mode();
        self.phase = Phase::Idle {
            mode,
            remaining: self.config.duration_of(mode),
        };
    }

    /// Stops the countdown and moves to the other mode.
    ///
    /// Entering work mode counts one completed session.
    pub fn switch_mode(&mut self) {
        let mode = self.phase.mode().other();
        self.phase = Phase::Idle {
            mode,
            remaining: self.config.duration_of(mode),
        };
        if mode == TimerMode::Work {
            self.completed_work_sessions += 1;
        }
    }

    /// Takes one second off a running countdown.
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            Phase::Running { mode, remaining } if remaining > 1 => {
                self.phase = Phase::Running {
                    mode,
                    remaining: remaining - 1,
                };
                TickOutcome::Advanced {
                    remaining: remaining - 1,
                }
            }
            Phase::Running { mode, remaining: 1 } => {
                self.phase = Phase::Idle { mode, remaining: 0 };
                TickOutcome::Completed { mode }
            }
            // Running at zero is unreachable; treat it like idle.
            Phase::Running { .. } | Phase::Idle { .. } => TickOutcome::Ignored,
        }
    }

    /// Applies a view command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleRun => self.toggle_run(),
            Command::Reset => self.reset(),
            Command::SwitchMode => self.switch_mode(),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> TimerState {
        TimerState {
            mode: self.phase.mode(),
            remaining_seconds: self.phase.remaining(),
            is_running: self.phase.is_running(),
            completed_work_sessions: self.completed_work_sessions,
        }
    }

    /// Returns the display projection of the current state.
    pub fn view(&self) -> TimerView {
        self.state().view(&self.config)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> TimerMode {
        self.phase.mode()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.phase.remaining()
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Pomodoro Timer Library
//!
//! This library provides the core of a single-screen Pomodoro timer.
//! It includes:
//! - Timer engine: a pure Work/Break state machine with session counting
//! - Scheduler: clock lifecycle, tick delivery and completion alerts
//! - Notifiers for the period-complete alert (sound, bell, silent)
//! - CLI command parsing and display utilities
//! - Type definitions for configuration and state

pub mod cli;
pub mod notify;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, TimerConfig, TimerMode, TimerState, TimerView};

pub use timer::{
    Clock, Command, IntervalClock, ManualClock, Phase, Scheduler, SchedulerError,
    SchedulerHandle, TickOutcome, Ticker, TimerEngine,
};

pub use notify::{
    select_notifier, BellNotifier, MockNotifier, Notifier, NotifyError, SilentNotifier,
    SoundNotifier, SoundSource,
};

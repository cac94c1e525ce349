//! Timer module for the Pomodoro timer.
//!
//! This module contains the countdown core:
//! - `engine`: pure state machine (tick, toggle, reset, switch)
//! - `clock`: tick sources acquired while the timer runs
//! - `scheduler`: tokio task tying engine, clock and notifier together

pub mod clock;
pub mod engine;
pub mod scheduler;

pub use clock::{Clock, IntervalClock, ManualClock, Ticker, TICK_PERIOD};
pub use engine::{Command, Phase, TickOutcome, TimerEngine};
pub use scheduler::{Scheduler, SchedulerError, SchedulerHandle};

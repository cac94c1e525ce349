//! Scheduler that drives the timer engine.
//!
//! The scheduler owns the engine, the clock lifecycle and the notifier:
//! - A ticker is acquired when the engine enters Running and dropped on every
//!   exit (pause, reset, switch, natural completion)
//! - Ticks are applied one by one, in arrival order
//! - On the zero-crossing the clock is released first, then the notifier
//!   fires, then the engine switches mode
//!
//! Views talk to it through a cloneable [`SchedulerHandle`].

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::types::TimerState;

use super::clock::{Clock, Ticker};
use super::engine::{Command, TickOutcome, TimerEngine};

// ============================================================================
// SchedulerError
// ============================================================================

/// Errors seen by handle users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The scheduler task has stopped
    #[error("timer scheduler is no longer running")]
    Closed,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug)]
enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<TimerState>,
    },
    Shutdown,
}

enum Event {
    Request(Option<Request>),
    Tick,
}

// ============================================================================
// SchedulerHandle
// ============================================================================

/// Command and query access to a running scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    requests: mpsc::UnboundedSender<Request>,
    state: watch::Receiver<TimerState>,
}

impl SchedulerHandle {
    /// Starts or pauses the countdown and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Closed` if the scheduler has stopped.
    pub async fn toggle_run(&self) -> Result<TimerState, SchedulerError> {
        self.send(Command::ToggleRun).await
    }

    /// Stops the countdown and refills the current period.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Closed` if the scheduler has stopped.
    pub async fn reset(&self) -> Result<TimerState, SchedulerError> {
        self.send(Command::Reset).await
    }

    /// Moves to the other mode.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Closed` if the scheduler has stopped.
    pub async fn switch_mode(&self) -> Result<TimerState, SchedulerError> {
        self.send(Command::SwitchMode).await
    }

    /// Sends a command and waits for the state it produced.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Closed` if the scheduler has stopped.
    pub async fn send(&self, command: Command) -> Result<TimerState, SchedulerError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Command { command, reply })
            .map_err(|_| SchedulerError::Closed)?;
        response.await.map_err(|_| SchedulerError::Closed)
    }

    /// Asks the scheduler to stop. The clock is released on the way out.
    pub fn shutdown(&self) {
        let _ = self.requests.send(Request::Shutdown);
    }

    /// Latest published state.
    pub fn state(&self) -> TimerState {
        *self.state.borrow()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state.clone()
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// Owns a [`TimerEngine`] and applies ticks and commands to it.
pub struct Scheduler<C: Clock, N: Notifier> {
    engine: TimerEngine,
    clock: C,
    /// Present exactly while the engine is running
    ticker: Option<C::Ticker>,
    notifier: N,
    requests: mpsc::UnboundedReceiver<Request>,
    state_tx: watch::Sender<TimerState>,
}

impl<C: Clock, N: Notifier> Scheduler<C, N> {
    /// Creates a scheduler and the handle used to talk to it.
    ///
    /// If the engine is already running, the clock is started right away.
    pub fn new(engine: TimerEngine, clock: C, notifier: N) -> (Self, SchedulerHandle) {
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(engine.state());

        let mut scheduler = Self {
            engine,
            clock,
            ticker: None,
            notifier,
            requests,
            state_tx,
        };
        if scheduler.engine.is_running() {
            scheduler.acquire_clock();
        }

        let handle = SchedulerHandle {
            requests: requests_tx,
            state: state_rx,
        };
        (scheduler, handle)
    }

    /// Processes commands and ticks until shutdown or until every handle is
    /// dropped.
    pub async fn run(mut self) {
        debug!("Scheduler started");

        loop {
            let event = tokio::select! {
                // Commands win over a tick that is ready at the same moment,
                // so a pause always cancels the pending tick.
                biased;
                request = self.requests.recv() => Event::Request(request),
                () = next_tick(self.ticker.as_mut()) => Event::Tick,
            };

            match event {
                Event::Request(Some(Request::Command { command, reply })) => {
                    let state = self.apply(command);
                    let _ = reply.send(state);
                }
                Event::Request(Some(Request::Shutdown) | None) => break,
                Event::Tick => {
                    self.handle_tick();
                }
            }
        }

        self.release_clock();
        debug!("Scheduler stopped");
    }

    /// Applies a command synchronously and returns the resulting state.
    ///
    /// Every command either leaves or enters Running, so the current ticker
    /// is always released before the engine is touched.
    pub fn apply(&mut self, command: Command) -> TimerState {
        self.release_clock();
        self.engine.apply(command);
        if self.engine.is_running() {
            self.acquire_clock();
        }

        debug!(?command, state = ?self.engine.state(), "Command applied");
        self.publish()
    }

    /// Applies one clock tick.
    pub fn handle_tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();
        match outcome {
            TickOutcome::Ignored => {
                // Only reachable if a tick was already in flight; stop the source.
                self.release_clock();
            }
            TickOutcome::Advanced { .. } => {
                self.publish();
            }
            TickOutcome::Completed { mode } => {
                self.release_clock();
                self.publish();

                info!("{} period complete", mode);
                if let Err(e) = self.notifier.notify_period_complete() {
                    warn!("Notification failed: {} ({})", e, e.suggestion());
                }

                self.engine.switch_mode();
                self.publish();
            }
        }
        outcome
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Returns true while a ticker is held.
    pub fn clock_active(&self) -> bool {
        self.ticker.is_some()
    }

    fn acquire_clock(&mut self) {
        if self.ticker.is_none() {
            debug!("Clock started");
            self.ticker = Some(self.clock.start());
        }
    }

    fn release_clock(&mut self) {
        if self.ticker.take().is_some() {
            debug!("Clock stopped");
        }
    }

    fn publish(&self) -> TimerState {
        let state = self.engine.state();
        self.state_tx.send_replace(state);
        state
    }
}

/// Waits for the next tick, or forever when no ticker is held.
async fn next_tick<T: Ticker>(ticker: Option<&mut T>) {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}

// ============================================================================
// Tests
// ============================================================================

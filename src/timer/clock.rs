//! Tick sources for the scheduler.
//!
//! A [`Clock`] hands out a [`Ticker`] when the countdown starts. The ticker is
//! the acquired resource: dropping it stops the tick stream, and a dropped
//! ticker can never deliver another tick.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Nominal tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Factory for tick streams.
pub trait Clock {
    /// The tick stream handed out by [`Clock::start`].
    type Ticker: Ticker;

    /// Starts a new tick stream. The first tick arrives one period later.
    fn start(&self) -> Self::Ticker;
}

/// An active tick stream. Dropping it releases the clock.
pub trait Ticker: Send {
    /// Resolves on the next tick.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;
}

// ============================================================================
// IntervalClock
// ============================================================================

/// Wall-clock ticks backed by `tokio::time::interval`.
#[derive(Debug, Clone, Copy)]
pub struct IntervalClock {
    period: Duration,
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl IntervalClock {
    /// Creates a clock ticking every `period`.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Clock for IntervalClock {
    type Ticker = IntervalTicker;

    fn start(&self) -> IntervalTicker {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        // Late ticks are delivered one by one instead of being merged.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        IntervalTicker { interval }
    }
}

/// Tick stream of an [`IntervalClock`].
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

// ============================================================================
// ManualClock
// ============================================================================

/// Clock driven by hand, for deterministic tests.
///
/// Clones share the same underlying tick source.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    active: Arc<Mutex<Option<mpsc::UnboundedSender<()>>>>,
    starts: Arc<AtomicUsize>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one tick to the active ticker.
    ///
    /// Returns false if no ticker is currently held.
    pub fn tick(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|tx| tx.send(()).is_ok())
    }

    /// Returns true while a ticker is held by someone.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Number of times the clock has been started.
    #[must_use]
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    type Ticker = ManualTicker;

    fn start(&self) -> ManualTicker {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        self.starts.fetch_add(1, Ordering::SeqCst);
        ManualTicker { rx }
    }
}

/// Tick stream of a [`ManualClock`].
#[derive(Debug)]
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

impl Ticker for ManualTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            // Superseded by a newer ticker: never tick again.
            std::future::pending::<()>().await;
        }
    }
}

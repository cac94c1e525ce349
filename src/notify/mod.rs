//! Period-complete notifications.
//!
//! This module provides the alert side effect fired once per finished
//! period:
//!
//! - Sound playback on a background audio thread (rodio)
//! - Terminal bell fallback when no audio device exists
//! - Silent and mock notifiers
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  notify_period_complete()  ┌──────────────────┐
//! │    Scheduler     │ ─────────────────────────▶ │     Notifier     │
//! └──────────────────┘   errors logged, dropped   └────────┬─────────┘
//!                                                          │
//!                          ┌───────────────┬───────────────┼──────────────┐
//!                          ▼               ▼               ▼              ▼
//!                    SoundNotifier   BellNotifier   SilentNotifier  MockNotifier
//!                    (audio thread)  (BEL on tty)
//! ```

mod error;
mod sound;
mod source;

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

pub use error::NotifyError;
pub use sound::SoundNotifier;
pub use source::SoundSource;

/// Signals that a period has run out.
///
/// Implementations must not block for long; the scheduler calls this inline.
pub trait Notifier: Send + Sync {
    /// Fires the alert for one finished period.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be produced. Callers treat
    /// this as best-effort and never retry.
    fn notify_period_complete(&self) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify_period_complete(&self) -> Result<(), NotifyError> {
        (**self).notify_period_complete()
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify_period_complete(&self) -> Result<(), NotifyError> {
        (**self).notify_period_complete()
    }
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify_period_complete(&self) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Does nothing. Used with `--no-sound`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify_period_complete(&self) -> Result<(), NotifyError> {
        debug!("Period complete (silent)");
        Ok(())
    }
}

/// Picks the best available notifier.
///
/// `--no-sound` wins, then `--bell`; otherwise sound is tried and the bell is
/// used if no audio device can be opened.
pub fn select_notifier(no_sound: bool, bell: bool, source: SoundSource) -> Box<dyn Notifier> {
    if no_sound {
        return Box::new(SilentNotifier);
    }
    if bell {
        return Box::new(BellNotifier);
    }
    match SoundNotifier::spawn(source) {
        Ok(notifier) => Box::new(notifier),
        Err(e) => {
            warn!("Audio not available, using terminal bell: {}", e);
            Box::new(BellNotifier)
        }
    }
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of notifications attempted, failed ones included.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Notifier for MockNotifier {
    fn notify_period_complete(&self) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifyError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts_calls() {
        let mock = MockNotifier::new();
        assert_eq!(mock.call_count(), 0);

        mock.notify_period_complete().unwrap();
        mock.notify_period_complete().unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockNotifier::new();
        mock.set_should_fail(true);

        let result = mock.notify_period_complete();
        assert!(matches!(result, Err(NotifyError::PlaybackError(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_arc_and_box_delegate() {
        let mock = Arc::new(MockNotifier::new());
        let boxed: Box<dyn Notifier> = Box::new(Arc::clone(&mock));

        boxed.notify_period_complete().unwrap();
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_silent_notifier_succeeds() {
        assert!(SilentNotifier.notify_period_complete().is_ok());
    }

    #[test]
    fn test_bell_notifier_does_not_panic() {
        // stderr may be closed under some harnesses; only check it returns
        let _ = BellNotifier.notify_period_complete();
    }

    #[test]
    fn test_select_notifier_never_panics() {
        let _ = select_notifier(true, false, SoundSource::Beep);
        let _ = select_notifier(false, true, SoundSource::Beep);
        let _ = select_notifier(false, false, SoundSource::Beep);
    }
}

//! Sound notifier implementation using rodio.
//!
//! rodio's output stream is not `Send` on every platform, so it lives on a
//! dedicated audio thread. The notifier only queues requests to that thread,
//! which keeps `notify_period_complete` non-blocking.

use std::fs::File;
use std::io::BufReader;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::NotifyError;
use super::source::{SoundSource, BEEP_DURATION_MS, BEEP_FREQUENCY_HZ};
use super::Notifier;

/// Volume applied to the generated beep.
const BEEP_VOLUME: f32 = 0.25;

// ============================================================================
// RodioPlayer
// ============================================================================

/// Owns the audio output stream. Must stay on the thread that created it.
struct RodioPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioPlayer {
    fn new() -> Result<Self, NotifyError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| NotifyError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays `source`, falling back to the beep if a file cannot be played.
    fn play(&self, source: &SoundSource) -> Result<(), NotifyError> {
        match source {
            SoundSource::File(path) => {
                debug!("Playing sound file: {}", path.display());
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(
                            "Failed to play '{}': {}, falling back to beep",
                            path.display(),
                            e
                        );
                        self.play_beep()
                    }
                }
            }
            SoundSource::Beep => self.play_beep(),
        }
    }

    fn play_file(&self, path: &std::path::Path) -> Result<(), NotifyError> {
        let file = File::open(path)
            .map_err(|e| NotifyError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| NotifyError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();
        Ok(())
    }

    fn play_beep(&self) -> Result<(), NotifyError> {
        let beep = SineWave::new(BEEP_FREQUENCY_HZ)
            .take_duration(Duration::from_millis(BEEP_DURATION_MS))
            .amplify(BEEP_VOLUME);

        let sink = self.new_sink()?;
        sink.append(beep);
        // Non-blocking: the beep keeps playing after this returns
        sink.detach();
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, NotifyError> {
        Sink::try_new(&self.stream_handle).map_err(|e| NotifyError::StreamError(e.to_string()))
    }
}

// ============================================================================
// SoundNotifier
// ============================================================================

/// Plays a sound on a background audio thread when a period finishes.
#[derive(Debug)]
pub struct SoundNotifier {
    requests: Sender<SoundSource>,
    source: SoundSource,
}

impl SoundNotifier {
    /// Starts the audio thread and opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `DeviceNotAvailable` if there is no audio output device, or
    /// `Io` if the thread cannot be spawned.
    pub fn spawn(source: SoundSource) -> Result<Self, NotifyError> {
        let (requests, queue) = crossbeam_channel::unbounded();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        thread::Builder::new()
            .name("tomato-audio".to_string())
            .spawn(move || audio_loop(&queue, &ready_tx))?;

        ready_rx.recv().map_err(|_| NotifyError::Disconnected)??;

        debug!("Sound notifier ready (source: {})", source.name());
        Ok(Self { requests, source })
    }

    pub fn source(&self) -> &SoundSource {
        &self.source
    }
}

impl Notifier for SoundNotifier {
    fn notify_period_complete(&self) -> Result<(), NotifyError> {
        self.requests
            .send(self.source.clone())
            .map_err(|_| NotifyError::Disconnected)
    }
}

/// Body of the audio thread. Exits once every `SoundNotifier` is dropped.
fn audio_loop(queue: &Receiver<SoundSource>, ready: &Sender<Result<(), NotifyError>>) {
    let player = match RodioPlayer::new() {
        Ok(player) => player,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };
    if ready.send(Ok(())).is_err() {
        return;
    }

    for source in queue {
        if let Err(e) = player.play(&source) {
            warn!("Sound playback failed: {} ({})", e, e.suggestion());
        }
    }

    debug!("Audio thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests depend on audio hardware and return early without it.

    #[test]
    fn test_spawn_without_device_reports_error() {
        match SoundNotifier::spawn(SoundSource::Beep) {
            Ok(notifier) => assert!(notifier.source().is_beep()),
            Err(e) => assert!(e.is_device_error(), "unexpected error: {}", e),
        }
    }

    #[test]
    fn test_notify_queues_request() {
        let notifier = match SoundNotifier::spawn(SoundSource::Beep) {
            Ok(n) => n,
            Err(_) => return,
        };
        assert!(notifier.notify_period_complete().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_beep() {
        let player = match RodioPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };
        let source = SoundSource::File("/nonexistent/beep_short.ogg".into());
        assert!(player.play(&source).is_ok());
    }
}

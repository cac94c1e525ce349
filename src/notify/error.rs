//! Notifier error types.
//!
//! None of these ever reach the timer state: the scheduler logs them and
//! carries on.

use thiserror::Error;

/// Errors that can occur while signaling a finished period.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),

    /// The audio thread is gone.
    #[error("audio thread disconnected")]
    Disconnected,

    /// Writing the terminal bell failed.
    #[error("failed to ring terminal bell: {0}")]
    Io(#[from] std::io::Error),
}

impl NotifyError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotAvailable(_) | Self::StreamError(_) | Self::Disconnected
        )
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns a short hint for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio device or use --bell",
            Self::FileNotFound(_) => "check the --sound path; the built-in beep is used instead",
            Self::DecodeError(_) => "the sound file may be corrupt or in an unsupported format",
            Self::StreamError(_) => "check the audio settings",
            Self::PlaybackError(_) | Self::Disconnected => "restart the timer",
            Self::Io(_) => "check that the terminal is writable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotifyError::DeviceNotAvailable("no device".to_string());
        assert_eq!(err.to_string(), "audio device not available: no device");

        let err = NotifyError::FileNotFound("/path/to/beep.ogg".to_string());
        assert!(err.to_string().contains("/path/to/beep.ogg"));

        let err = NotifyError::Disconnected;
        assert_eq!(err.to_string(), "audio thread disconnected");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: NotifyError = io.into();
        assert!(matches!(err, NotifyError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_is_device_error() {
        assert!(NotifyError::DeviceNotAvailable("x".into()).is_device_error());
        assert!(NotifyError::StreamError("x".into()).is_device_error());
        assert!(NotifyError::Disconnected.is_device_error());
        assert!(!NotifyError::FileNotFound("x".into()).is_device_error());
    }

    #[test]
    fn test_is_file_error() {
        assert!(NotifyError::FileNotFound("x".into()).is_file_error());
        assert!(NotifyError::DecodeError("x".into()).is_file_error());
        assert!(!NotifyError::PlaybackError("x".into()).is_file_error());
    }

    #[test]
    fn test_suggestion() {
        assert!(NotifyError::DeviceNotAvailable("x".into())
            .suggestion()
            .contains("--bell"));
        assert!(NotifyError::FileNotFound("x".into())
            .suggestion()
            .contains("built-in beep"));
    }
}

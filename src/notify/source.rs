//! Sound source selection.
//!
//! The default alert is a short generated beep, so the timer works without
//! any sound files installed. A custom file can be supplied instead; if it
//! cannot be played the beep is used.

use std::path::{Path, PathBuf};

use super::error::NotifyError;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac"];

/// Frequency of the generated beep in Hz.
pub const BEEP_FREQUENCY_HZ: f32 = 880.0;

/// Length of the generated beep in milliseconds.
pub const BEEP_DURATION_MS: u64 = 300;

/// What to play when a period finishes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SoundSource {
    /// Short generated sine tone
    #[default]
    Beep,
    /// Audio file on disk
    File(PathBuf),
}

impl SoundSource {
    /// Creates a file source after checking the path.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path does not exist, or `DecodeError` if
    /// the extension is not a supported audio format.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, NotifyError> {
        let path = path.into();
        validate_sound_path(&path)?;
        Ok(Self::File(path))
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Beep => "beep".to_string(),
            Self::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    #[must_use]
    pub fn is_beep(&self) -> bool {
        matches!(self, Self::Beep)
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Beep => None,
        }
    }
}

fn validate_sound_path(path: &Path) -> Result<(), NotifyError> {
    if !path.is_file() {
        return Err(NotifyError::FileNotFound(path.display().to_string()));
    }

    let supported = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
    if !supported {
        return Err(NotifyError::DecodeError(format!(
            "unsupported sound format '{}' (expected one of: {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_beep() {
        let source = SoundSource::default();
        assert!(source.is_beep());
        assert_eq!(source.name(), "beep");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_file_source_missing_path() {
        let result = SoundSource::file("/nonexistent/path/to/beep_short.ogg");
        match result {
            Err(NotifyError::FileNotFound(msg)) => assert!(msg.contains("beep_short.ogg")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source_unsupported_extension() {
        // Cargo.toml always exists at the crate root when tests run
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        let result = SoundSource::file(path);
        assert!(matches!(result, Err(NotifyError::DecodeError(_))));
    }

    #[test]
    fn test_file_source_name_is_stem() {
        let source = SoundSource::File(PathBuf::from("/sounds/beep_short.ogg"));
        assert_eq!(source.name(), "beep_short");
        assert_eq!(source.path(), Some(Path::new("/sounds/beep_short.ogg")));
        assert!(!source.is_beep());
    }

    #[test]
    fn test_supported_extensions() {
        assert!(SUPPORTED_EXTENSIONS.contains(&"ogg"));
        assert!(SUPPORTED_EXTENSIONS.contains(&"wav"));
    }
}

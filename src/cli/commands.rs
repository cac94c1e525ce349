//! Command definitions for the tomato CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::notify::SoundSource;

// ============================================================================
// CLI Structure
// ============================================================================

/// Single-screen Pomodoro timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "tomato",
    version,
    about = "Single-screen Pomodoro timer for the terminal",
    long_about = "Alternates 25-minute work periods with 5-minute breaks.\n\
                  Type a key and press Enter: s = start/pause, r = reset, \
                  n = switch mode, q = quit.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer in this terminal
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Disable the period-complete alert
    #[arg(long, conflicts_with_all = ["bell", "sound"])]
    pub no_sound: bool,

    /// Use the terminal bell instead of audio playback
    #[arg(long, conflicts_with = "sound")]
    pub bell: bool,

    /// Sound file to play when a period ends (wav, ogg, mp3, flac)
    #[arg(long, value_name = "PATH", value_parser = validate_sound_file)]
    pub sound: Option<PathBuf>,

    /// Print every state change as a JSON line instead of the clock face
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Sound to play when a period ends.
    pub fn sound_source(&self) -> SoundSource {
        self.sound
            .clone()
            .map(SoundSource::File)
            .unwrap_or_default()
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the sound file argument.
fn validate_sound_file(s: &str) -> Result<PathBuf, String> {
    match SoundSource::file(s) {
        Ok(_) => Ok(PathBuf::from(s)),
        Err(e) => Err(format!("{} ({})", e, e.suggestion())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["tomato"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["tomato", "--verbose"]);
            assert!(cli.verbose);

            let cli = Cli::parse_from(["tomato", "run", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_run_defaults() {
            let cli = Cli::parse_from(["tomato", "run"]);
            match cli.command {
                Some(Commands::Run(args)) => assert_eq!(args, RunArgs::default()),
                other => panic!("Expected Run command, got {:?}", other),
            }
        }

        #[test]
        fn test_parse_run_flags() {
            let cli = Cli::parse_from(["tomato", "run", "--no-sound", "--json"]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert!(args.no_sound);
                    assert!(args.json);
                    assert!(!args.bell);
                }
                other => panic!("Expected Run command, got {:?}", other),
            }
        }

        #[test]
        fn test_no_sound_conflicts_with_bell() {
            let result = Cli::try_parse_from(["tomato", "run", "--no-sound", "--bell"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_missing_sound_file_rejected() {
            let result =
                Cli::try_parse_from(["tomato", "run", "--sound", "/nonexistent/beep.ogg"]);
            let err = result.unwrap_err().to_string();
            assert!(err.contains("sound file not found"));
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["tomato", "completions", "bash"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Bash
                })
            ));
        }

        #[test]
        fn test_duration_flags_do_not_exist() {
            assert!(Cli::try_parse_from(["tomato", "run", "--work", "30"]).is_err());
        }
    }

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_default_sound_is_beep() {
            assert!(RunArgs::default().sound_source().is_beep());
        }

        #[test]
        fn test_sound_path_becomes_file_source() {
            let args = RunArgs {
                sound: Some(PathBuf::from("/sounds/beep_short.ogg")),
                ..RunArgs::default()
            };
            assert_eq!(
                args.sound_source(),
                SoundSource::File(PathBuf::from("/sounds/beep_short.ogg"))
            );
        }
    }
}

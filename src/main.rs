//! tomato - a single-screen Pomodoro timer for the terminal
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of break
//! - a count of completed sessions

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use tomato_timer::cli::{run_view, Cli, Commands, Display, OutputFormat, RunArgs};
use tomato_timer::{select_notifier, IntervalClock, Scheduler, TimerConfig, TimerEngine};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{:#}", e));
            1
        }
    };

    // A stdin read still blocked after Ctrl-C would keep the runtime alive.
    let _ = io::Write::flush(&mut io::stdout());
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => run_timer(args).await,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(RunArgs::default()).await,
    }
}

/// Runs the timer until the user quits, stdin closes or Ctrl-C is pressed.
async fn run_timer(args: RunArgs) -> Result<()> {
    let config = TimerConfig::default();
    let engine = TimerEngine::new(config).context("Invalid timer configuration")?;
    let notifier = select_notifier(args.no_sound, args.bell, args.sound_source());

    let (scheduler, handle) = Scheduler::new(engine, IntervalClock::default(), notifier);
    let scheduler_task = tokio::spawn(scheduler.run());

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    if format == OutputFormat::Text {
        println!("Pomodoro timer (type h + Enter for keys)");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    let view_result = tokio::select! {
        result = run_view(&handle, &config, stdin, &mut stdout, format) => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            tracing::debug!("Interrupted");
            Ok(handle.state())
        }
    };

    handle.shutdown();
    scheduler_task.await.context("Timer scheduler panicked")?;

    let last = view_result?;
    if format == OutputFormat::Text {
        Display::show_summary(&last);
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["tomato"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["tomato", "run", "--bell"]);
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.bell),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}

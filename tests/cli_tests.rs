//! Tests for the `tomato` binary.
//!
//! stdin is a script of key lines; `--no-sound` keeps the tests away from
//! audio hardware.

use assert_cmd::Command;
use predicates::prelude::*;

use tomato_timer::{TimerMode, TimerState};

fn tomato() -> Command {
    Command::cargo_bin("tomato").unwrap()
}

fn json_states(stdout: &[u8]) -> Vec<TimerState> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON state"))
        .collect()
}

#[test]
fn help_lists_subcommands() {
    tomato()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn completions_are_generated() {
    tomato()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tomato"));
}

#[test]
fn conflicting_alert_flags_are_rejected() {
    tomato()
        .args(["run", "--no-sound", "--bell"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_sound_file_is_rejected() {
    tomato()
        .args(["run", "--sound", "/nonexistent/beep_short.ogg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sound file not found"));
}

#[test]
fn json_run_reports_start_and_pause() {
    let output = tomato()
        .args(["run", "--no-sound", "--json"])
        .write_stdin("s\np\nq\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let states = json_states(&output.stdout);
    assert_eq!(states.len(), 3);

    assert_eq!(states[0].mode, TimerMode::Work);
    assert_eq!(states[0].remaining_seconds, 1500);
    assert!(!states[0].is_running);

    assert!(states[1].is_running);
    assert!(!states[2].is_running);
}

#[test]
fn json_run_switches_modes() {
    let output = tomato()
        .args(["run", "--no-sound", "--json"])
        .write_stdin("n\nn\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let states = json_states(&output.stdout);
    let last = states.last().unwrap();
    assert_eq!(last.mode, TimerMode::Work);
    assert_eq!(last.remaining_seconds, 1500);
    assert_eq!(last.completed_work_sessions, 1);

    assert_eq!(states[1].mode, TimerMode::Break);
    assert_eq!(states[1].remaining_seconds, 300);
}

#[test]
fn text_run_shows_clock_and_summary() {
    tomato()
        .args(["run", "--no-sound"])
        .write_stdin("n\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("25:00"))
        .stdout(predicate::str::contains("Break Time"))
        .stdout(predicate::str::contains("Sessions completed: 1"))
        .stdout(predicate::str::contains("1 session completed"));
}

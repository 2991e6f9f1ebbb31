//! End-to-end tests of the `saga` binary
//!
//! Commands are piped through stdin the way a player's terminal session
//! would feed them. The scripted configuration turns off the intro and
//! screen clearing and fixes the random seed, so the output is stable.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn run_saga(args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_saga"))
        .args(args)
        .env("SAGA_CONFIG", data_file("scripted.toml"))
        .env("DISPLAY_MODE", "plain")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start saga");

    // saga may exit before reading everything, a broken pipe is fine here
    let mut stdin = child.stdin.take().expect("stdin is piped");
    let _ = stdin.write_all(script.as_bytes());
    drop(stdin);

    child.wait_with_output().expect("Failed to run saga")
}

#[test]
fn test_piped_playthrough() {
    let game = data_file("tiny.dat");
    let script = "get lamp
n
take gem
inventory
s
drop gem
score
";
    let output = run_saga(&[game.to_str().unwrap()], script);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "saga failed: {:?}", output);
    assert!(stdout.contains("I'm in a small hut"), "Missing starting room");
    assert!(stdout.contains("Tell me what to do"), "Missing prompt");
    assert!(stdout.contains("I'm in a forest"), "Did not move north");
    assert!(stdout.contains("*Green gem*. Lit lamp."), "Inventory is wrong");
    assert!(
        stdout.contains("I've stored 1 treasures. ON A SCALE OF 0 TO 100 THAT RATES A 50"),
        "Score is wrong"
    );
    assert!(!stdout.contains("Well done."));
}

#[test]
fn test_quit_ends_before_input_runs_out() {
    let game = data_file("tiny.dat");
    let output = run_saga(&[game.to_str().unwrap()], "quit\nn\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(!stdout.contains("I'm in a forest"));
}

#[test]
fn test_usage_without_arguments() {
    let output = run_saga(&[], "");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Usage:"));
}

#[cfg(unix)]
#[test]
fn test_usage_names_the_program() {
    use std::os::unix::process::CommandExt;

    let output = Command::new(env!("CARGO_BIN_EXE_saga"))
        .arg0("adventure-runner")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run saga");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Usage: adventure-runner <adventure.dat>"));
}

#[test]
fn test_missing_game_file() {
    let output = run_saga(&["no/such/adventure.dat"], "");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Game file not found"));
}

#[test]
fn test_malformed_game_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dat");
    std::fs::write(&path, "1000\nnot a number\n").unwrap();

    let output = run_saga(&[path.to_str().unwrap()], "");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("is not a valid adventure database"));
}

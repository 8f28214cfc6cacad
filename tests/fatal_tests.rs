//! FATAL exit behavior
//!
//! `fatal` ends the process, so each case re-runs this test binary as a child
//! restricted to one helper test. The helper only calls `fatal` when the
//! environment variable below is set; in a normal run it does nothing.

use llog::kv;
use llog::prelude::*;
use llog::FATAL_EXIT_CODE;
use std::env;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const CHILD_MODE: &str = "LLOG_FATAL_CHILD";
const CHILD_LOG: &str = "LLOG_FATAL_LOG";

fn run_child(test_name: &str, envs: &[(&str, &str)]) -> Output {
    let exe = env::current_exe().expect("Failed to locate test binary");
    let mut command = Command::new(exe);
    command
        .args(["--exact", test_name, "--nocapture", "--test-threads=1"])
        .env(CHILD_MODE, test_name);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("Failed to run child")
}

fn is_child(test_name: &str) -> bool {
    env::var(CHILD_MODE).map_or(false, |v| v == test_name)
}

#[test]
fn child_fatal_to_stdout() {
    if !is_child("child_fatal_to_stdout") {
        return;
    }
    let logger = Logger::builder().min_level(LogLevel::Error).build();
    logger.info("filtered", &[]);
    logger.fatal("cannot continue", &[kv!("reason" => "test")]);
}

#[test]
fn child_fatal_to_file() {
    if !is_child("child_fatal_to_file") {
        return;
    }
    let path = env::var(CHILD_LOG).expect("log path not set");
    let logger = Logger::builder()
        .output(FileSink::new(&path).expect("Failed to create sink"))
        .build();
    logger.warn("about to fail", &[]);
    logger.fatal("disk on fire", &[]);
}

#[test]
fn child_global_fatal() {
    if !is_child("child_global_fatal") {
        return;
    }
    llog::set_level(LogLevel::Fatal);
    llog::error("filtered", &[]);
    llog::fatal("global exit", &[kv!("code" => 1)]);
}

#[test]
fn test_fatal_exits_with_status_one() {
    let output = run_child("child_fatal_to_stdout", &[]);

    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("~ FATAL -- cannot continue -- reason=\"test\"\n"),
        "stdout: {}",
        stdout
    );
    assert!(!stdout.contains("filtered"));
}

#[test]
fn test_fatal_line_is_durable_before_exit() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fatal.log");
    let log_path = log_file.to_str().expect("non-UTF-8 temp path");

    let output = run_child("child_fatal_to_file", &[(CHILD_LOG, log_path)]);

    assert_eq!(output.status.code(), Some(1));
    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "~ WARN -- about to fail\n~ FATAL -- disk on fire\n");
}

#[test]
fn test_global_fatal_ignores_threshold() {
    let output = run_child("child_global_fatal", &[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("~ FATAL -- global exit -- code=\"1\"\n"));
    assert!(!stdout.contains("filtered"));
}

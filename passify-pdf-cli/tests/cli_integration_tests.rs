//! Integration tests for the passifypdf CLI
//!
//! Tests command-line interface functionality including:
//! - Flag parsing and validation
//! - Overwrite confirmation and --force
//! - Exit codes for success, cancellation and failure
//! - Protected output that opens with the supplied password

use anyhow::Result;
use passify_pdf::{is_protected, unlock_page_count};
use passify_pdf_test_suite::generators::{invalid_pdfs, minimal_pdfs};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary path
fn get_cli_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_passifypdf"))
}

/// Test helper to create a temporary directory
fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

/// Test helper to run CLI command and return output
fn run_cli_command(args: &[&str]) -> Result<Output> {
    run_cli_command_with_input(args, "")
}

/// Test helper to run CLI command with text piped to stdin
fn run_cli_command_with_input(args: &[&str], input: &str) -> Result<Output> {
    let mut child = Command::new(get_cli_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    Ok(child.wait_with_output()?)
}

/// Test helper to write a blank one-page input PDF
fn create_input_pdf(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("input.pdf");
    fs::write(&path, minimal_pdfs::blank_pdf(1).unwrap()).expect("Failed to write input");
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help_lists_flags() {
    let output = run_cli_command(&["--help"]).expect("CLI command should run");

    assert!(output.status.success(), "Help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--input", "--output", "--passwd", "--force", "--version"] {
        assert!(stdout.contains(flag), "Help should mention {flag}");
    }
}

#[test]
fn test_cli_version_flag() {
    for flag in ["--version", "-v"] {
        let output = run_cli_command(&[flag]).expect("CLI command should run");

        assert!(output.status.success(), "{flag} should exit 0");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("passifypdf"), "Should print the program name");
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "Should print the version");
    }
}

#[test]
fn test_cli_version_ignores_other_flags() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output_path),
        "-p",
        "secret",
        "-v",
    ])
    .expect("CLI command should run");

    assert!(output.status.success());
    assert!(!output_path.exists(), "Version must not encrypt anything");
}

#[test]
fn test_cli_version_wins_over_missing_input() {
    let temp_dir = setup_temp_dir();
    let ghost = temp_dir.path().join("ghost.pdf");
    let output_path = temp_dir.path().join("output.pdf");

    for args in [
        vec!["-i", path_str(&ghost), "-o", path_str(&output_path), "-p", "s", "-v"],
        vec!["-v", "-i", path_str(&ghost)],
        vec!["-i", path_str(&ghost), "--version"],
    ] {
        let output = run_cli_command(&args).expect("CLI command should run");

        assert_eq!(output.status.code(), Some(0), "{:?} should print the version", args);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
        assert!(!output_path.exists());
    }
}

#[test]
fn test_cli_encrypt_success() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "--input",
        path_str(&input),
        "--output",
        path_str(&output_path),
        "--passwd",
        "strongpassword",
    ])
    .expect("CLI command should run");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PDF file encrypted successfully"));
    assert!(stdout.contains(path_str(&output_path)));

    assert!(is_protected(&output_path).unwrap());
    assert_eq!(unlock_page_count(&output_path, "strongpassword").unwrap(), 1);
}

#[test]
fn test_cli_flags_are_position_independent() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "-p",
        "secret",
        "-o",
        path_str(&output_path),
        "-i",
        path_str(&input),
    ])
    .expect("CLI command should run");

    assert!(output.status.success());
    assert!(output_path.exists());
}

#[test]
fn test_cli_missing_required_options() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");

    let cases: Vec<Vec<&str>> = vec![
        vec![],
        vec!["-o", path_str(&output_path), "-p", "secret"],
        vec!["-i", path_str(&input), "-p", "secret"],
        vec!["-i", path_str(&input), "-o", path_str(&output_path)],
    ];

    for args in cases {
        let output = run_cli_command(&args).expect("CLI command should run");

        assert!(!output.status.success(), "{:?} should fail", args);
        assert_eq!(output.status.code(), Some(2), "usage errors exit 2");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage"), "Should print usage for {:?}", args);
        assert!(!output_path.exists(), "Nothing should be written");
    }
}

#[test]
fn test_cli_missing_options_touch_nothing() {
    let temp_dir = setup_temp_dir();

    let output = Command::new(get_cli_path())
        .current_dir(temp_dir.path())
        .args(["-o", "output.pdf"])
        .output()
        .expect("CLI command should run");

    assert!(!output.status.success());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cli_empty_password_rejected() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output_path),
        "-p",
        "",
    ])
    .expect("CLI command should run");

    assert_eq!(output.status.code(), Some(2));
    assert!(!output_path.exists());
}

#[test]
fn test_cli_input_file_not_found() {
    let temp_dir = setup_temp_dir();
    let ghost = temp_dir.path().join("ghost.pdf");
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "-i",
        path_str(&ghost),
        "-o",
        path_str(&output_path),
        "-p",
        "secret",
    ])
    .expect("CLI command should run");

    assert!(!output.status.success(), "Command should fail for nonexistent file");
    assert_eq!(output.status.code(), Some(2), "missing input is a usage error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
    assert!(!output_path.exists());
}

#[test]
fn test_cli_directory_input_rejected() {
    let temp_dir = setup_temp_dir();
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "-i",
        path_str(temp_dir.path()),
        "-o",
        path_str(&output_path),
        "-p",
        "secret",
    ])
    .expect("CLI command should run");

    assert!(!output.status.success());
    assert!(!output_path.exists());
}

#[test]
fn test_cli_encrypt_failure_exits_with_1() {
    let temp_dir = setup_temp_dir();
    let input = temp_dir.path().join("broken.pdf");
    fs::write(&input, invalid_pdfs::not_a_pdf()).unwrap();
    let output_path = temp_dir.path().join("output.pdf");

    let output = run_cli_command(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output_path),
        "-p",
        "secret",
        "--force",
    ])
    .expect("CLI command should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Failed to encrypt PDF"));
}

#[test]
fn test_cli_no_force_user_declines() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");
    fs::write(&output_path, b"existing").unwrap();

    let output = run_cli_command_with_input(
        &["-i", path_str(&input), "-o", path_str(&output_path), "-p", "secret"],
        "n\n",
    )
    .expect("CLI command should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already exists. Overwrite?"));
    assert!(stdout.contains("Operation cancelled."));
    assert_eq!(fs::read(&output_path).unwrap(), b"existing".to_vec());
}

#[test]
fn test_cli_no_force_closed_stdin_declines() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");
    fs::write(&output_path, b"existing").unwrap();

    let output = run_cli_command(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output_path),
        "-p",
        "secret",
    ])
    .expect("CLI command should run");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read(&output_path).unwrap(), b"existing".to_vec());
}

#[test]
fn test_cli_no_force_user_accepts() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");
    fs::write(&output_path, b"existing").unwrap();

    let output = run_cli_command_with_input(
        &["-i", path_str(&input), "-o", path_str(&output_path), "-p", "secret"],
        "y\n",
    )
    .expect("CLI command should run");

    assert_eq!(output.status.code(), Some(0));
    assert_ne!(fs::read(&output_path).unwrap(), b"existing".to_vec());
    assert!(is_protected(&output_path).unwrap());
}

#[test]
fn test_cli_force_flag_skips_prompt() {
    let temp_dir = setup_temp_dir();
    let input = create_input_pdf(&temp_dir);
    let output_path = temp_dir.path().join("output.pdf");
    fs::write(&output_path, b"existing").unwrap();

    let output = run_cli_command(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output_path),
        "-p",
        "secret",
        "-f",
    ])
    .expect("CLI command should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Overwrite?"), "Should not prompt with --force");
    assert!(is_protected(&output_path).unwrap());
}

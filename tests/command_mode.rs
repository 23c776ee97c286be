//! Integration tests for command mode (-c/--command and --render)

use std::io::Write;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sheetmind"))
        // Tests must be deterministic and not depend on a user's config.toml.
        .arg("--no-config")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "=1+2*3"]);
    assert_eq!(stdout.trim(), "7");
    assert_eq!(code, 0);
}

#[test]
fn test_literal_is_echoed() {
    let (stdout, _, code) = run_command(&["-c", "hello = world"]);
    assert_eq!(stdout.trim(), "hello = world");
    assert_eq!(code, 0);
}

#[test]
fn test_sum_with_text_cell() {
    let (stdout, _, code) = run_command(&[
        "--set", "A1=1", "--set", "A2=2", "--set", "A3=x", "-c", "=SUM(A1:A3)",
    ]);
    assert_eq!(stdout.trim(), "3");
    assert_eq!(code, 0);
}

#[test]
fn test_average() {
    let (stdout, _, code) = run_command(&["-s", "A1=4", "-s", "A2=6", "-c", "=AVERAGE(A2:A1)"]);
    assert_eq!(stdout.trim(), "5");
    assert_eq!(code, 0);
}

#[test]
fn test_division_by_zero_prints_marker() {
    let (stdout, _, code) = run_command(&["-c", "=1/0"]);
    assert_eq!(stdout.trim(), "#ERROR");
    assert_eq!(code, 0);
}

#[test]
fn test_malformed_formula_prints_marker() {
    let (stdout, _, code) = run_command(&["-s", "A1=1", "-c", "=A1+"]);
    assert_eq!(stdout.trim(), "#ERROR");
    assert_eq!(code, 0);
}

#[test]
fn test_render_circular_references() {
    let (stdout, _, code) = run_command(&[
        "-s", "A1==B1", "-s", "B1==A1", "-s", "A2=3", "-s", "B2==A2*2", "--render", "A1:B2",
    ]);
    assert_eq!(stdout, "0\t0\n3\t6\n");
    assert_eq!(code, 0);
}

#[test]
fn test_list_functions() {
    let (stdout, _, code) = run_command(&["--list-functions"]);
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split('\t').next())
        .collect();
    assert_eq!(names, vec!["SUM", "AVERAGE"]);
    assert_eq!(code, 0);
}

#[test]
fn test_edit_outside_sheet_fails() {
    let (_, stderr, code) = run_command(&["-s", "AA1=1", "-c", "=1"]);
    assert!(stderr.contains("outside the sheet"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_config_file_bounds() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "cols = 30").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let (stdout, _, code) = run_command(&["--config", &path, "-s", "AA1=2", "-c", "=AA1*2"]);
    assert_eq!(stdout.trim(), "4");
    assert_eq!(code, 0);
}

#[test]
fn test_bad_config_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rows = 0").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let (_, stderr, code) = run_command(&["--config", &path, "-c", "=1"]);
    assert!(stderr.contains("rows and cols"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_render_outside_sheet_fails() {
    let (stdout, stderr, code) = run_command(&["--render", "A1:ZZZ9999999"]);
    assert!(stdout.is_empty());
    assert!(stderr.contains("outside the sheet"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_exponent_after_trailing_point() {
    let (stdout, _, code) = run_command(&["-s", "E5=9", "-c", "=2.E5"]);
    assert_eq!(stdout.trim(), "200000");
    assert_eq!(code, 0);
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--frobnicate"]);
    assert!(stderr.contains("Unknown option: --frobnicate"));
    assert_eq!(code, 1);
}

#[test]
fn test_nothing_to_do() {
    let (_, stderr, code) = run_command(&["-s", "A1=1"]);
    assert!(stderr.contains("Nothing to do"));
    assert_eq!(code, 1);
}

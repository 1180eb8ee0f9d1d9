//! Drives the whole CLI surface with the fixture front end: argument
//! parsing, filter loading, linting, emitters, and the windowed render.

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use hoonlint::{run_with_writer, Args, ExitStatus};
use hoonlint_core::diagnostic::Diagnostic;
use hoonlint_core::testing::fixture;

/// Runs the linter over `text` with extra command-line options, returning
/// the captured stdout.
fn run_lint(dir: &TempDir, text: &str, extra: &[&str]) -> (ExitStatus, String) {
    colored::control::set_override(false);
    let source_path = dir.path().join("sieve.hoon");
    fs::write(&source_path, text).expect("write source");
    let mut argv = vec!["hoonlint"];
    argv.extend_from_slice(extra);
    let source_str = source_path.to_string_lossy().into_owned();
    argv.push(source_str.as_str());
    let args = Args::try_parse_from(argv).expect("argv parses");
    let frontend = fixture();
    let mut out = Vec::new();
    let status = run_with_writer(&args, &frontend, &mut out).expect("run succeeds");
    (status, String::from_utf8(out).expect("utf8 output"))
}

fn write_filter(dir: &TempDir, name: &str, source_path: &Path, entries: &[(usize, usize)]) -> String {
    let mut text = String::new();
    for (line, column) in entries {
        text.push_str(&format!(
            "{} {}:{} indent noted\n",
            source_path.display(),
            line,
            column
        ));
    }
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write filter file");
    path.to_string_lossy().into_owned()
}

#[test]
fn a_clean_file_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let (status, out) = run_lint(&dir, "?-  x\n  %a  1\n  %b  2\n==\n", &[]);
    assert_eq!(status, ExitStatus::Success);
    assert_eq!(out, "");
}

#[test]
fn diagnostics_are_line_oriented() {
    let dir = TempDir::new().unwrap();
    let (status, out) = run_lint(&dir, "?-  x\n %a  1\n==\n", &[]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("2:2 indent tallWuthep Jog kingside head"));
    assert!(out.contains("underindented by 1"));
}

#[test]
fn a_suppression_file_drops_its_diagnostic() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sieve.hoon");
    let filter = write_filter(&dir, "local-suppressions", &source_path, &[(2, 2)]);
    let (_, out) = run_lint(&dir, "?-  x\n %a  1\n==\n", &["-S", filter.as_str()]);
    assert_eq!(out, "");
}

#[test]
fn unused_suppressions_are_listed() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sieve.hoon");
    let filter = write_filter(&dir, "local-suppressions", &source_path, &[(9, 1)]);
    let (_, out) = run_lint(&dir, "?-  x\n %a  1\n==\n", &["-S", filter.as_str()]);
    assert!(out.contains("Jog kingside head"));
    assert!(out.contains("Unused suppression: indent 9:1"));
}

#[test]
fn an_inclusion_file_restricts_output() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sieve.hoon");
    let filter = write_filter(&dir, "inclusions", &source_path, &[(9, 9)]);
    let (_, out) = run_lint(&dir, "?-  x\n %a  1\n==\n", &["-I", filter.as_str()]);
    assert_eq!(out, "");
}

#[test]
fn census_whitespace_reports_every_construct() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_lint(&dir, "?-  x\n  %a  1\n  %b  2\n==\n", &["--census-whitespace"]);
    assert!(out.contains("census tallWuthep 1-jogging"));
    assert!(out.contains("census tallWuthep sequence"));
    assert!(out.contains("census tallWuthep jog"));
}

#[test]
fn context_renders_marked_source_windows() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_lint(&dir, "?-  x\n %a  1\n==\n", &["-C", "2"]);
    assert!(out.contains(">    1 ?-  x"));
    assert!(out.contains("!    2  %a  1"));
}

#[test]
fn json_output_serializes_diagnostics() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_lint(&dir, "?-  x\n %a  1\n==\n", &["--output-format", "json"]);
    let parsed: Vec<Diagnostic> = serde_json::from_str(&out).expect("json parses");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].name, "tallWuthep");
}

#[test]
fn an_unknown_policy_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sieve.hoon");
    fs::write(&source_path, "a\n").unwrap();
    let source_str = source_path.to_string_lossy().into_owned();
    let args =
        Args::try_parse_from(["hoonlint", "-P", "Test::Naming", source_str.as_str()]).unwrap();
    let frontend = fixture();
    let mut out = Vec::new();
    let err = run_with_writer(&args, &frontend, &mut out).unwrap_err();
    assert!(err.to_string().contains("unknown policy"));
}

#[test]
fn a_parse_failure_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sieve.hoon");
    fs::write(&source_path, "?-\n").unwrap();
    let source_str = source_path.to_string_lossy().into_owned();
    let args = Args::try_parse_from(["hoonlint", source_str.as_str()]).unwrap();
    let frontend = fixture();
    let mut out = Vec::new();
    let err = run_with_writer(&args, &frontend, &mut out).unwrap_err();
    assert!(err.to_string().contains("parse failed"));
}

#[test]
fn a_missing_input_file_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    let source_str = dir.path().join("absent.hoon").to_string_lossy().into_owned();
    let args = Args::try_parse_from(["hoonlint", source_str.as_str()]).unwrap();
    let frontend = fixture();
    let mut out = Vec::new();
    let err = run_with_writer(&args, &frontend, &mut out).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn a_malformed_suppression_file_names_the_line() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sieve.hoon");
    fs::write(&source_path, "a\n").unwrap();
    let filter_path = dir.path().join("bad-suppressions");
    fs::write(&filter_path, "first 1:1 indent\nnot a tag\n").unwrap();
    let filter_str = filter_path.to_string_lossy().into_owned();
    let source_str = source_path.to_string_lossy().into_owned();
    let args = Args::try_parse_from([
        "hoonlint",
        "-S",
        filter_str.as_str(),
        source_str.as_str(),
    ])
    .unwrap();
    let frontend = fixture();
    let mut out = Vec::new();
    let err = run_with_writer(&args, &frontend, &mut out).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bad-suppressions:2"), "got: {message}");
    assert!(message.contains("not a tag"));
}

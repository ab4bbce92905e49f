//! CLI integration tests
//!
//! These run the compiled binary and check:
//! - Command parsing and help output
//! - Output formats
//! - Exit codes for ready, blocked and failed previews

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn codepeek_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_codepeek"))
}

fn write_answer(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write answer");
    path
}

fn run(args: &[&str], input: &Path) -> Output {
    Command::new(codepeek_bin())
        .args(args)
        .arg(input)
        .env_remove("RUST_LOG")
        .env_remove("CODEPEEK_TAILWIND_URL")
        .output()
        .expect("Failed to execute codepeek")
}

const HTML_ANSWER: &str = "Here you go:\n```html\n<div class=\"flex p-4\">Hello</div>\n```\nEnjoy.";
const PYTHON_ANSWER: &str = "Run this:\n```python\nimport os\nprint(os.getcwd())\n```";

#[test]
fn test_cli_help() {
    let output = Command::new(codepeek_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute codepeek");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("codepeek"));
    assert!(stdout.contains("parse"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("preview"));
    assert!(stdout.contains("render"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(codepeek_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute codepeek");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_parse_json_output() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", HTML_ANSWER);

    let output = run(&["parse", "--format", "json"], &input);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let segments = value["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[1]["type"], "code");
    assert_eq!(segments[1]["language"], "html");
    assert_eq!(value["technologies"], serde_json::json!(["tailwind"]));
    assert_eq!(value["previewable"], true);
}

#[test]
fn test_analyze_human_output() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", PYTHON_ANSWER);

    let output = run(&["analyze"], &input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Can preview: no"));
    assert!(stdout.contains("Python code cannot be previewed in the browser."));
}

#[test]
fn test_preview_writes_document() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", HTML_ANSWER);
    let out = dir.path().join("preview.html");

    let output = Command::new(codepeek_bin())
        .args(["preview", "--dark-mode", "-o"])
        .arg(&out)
        .arg(&input)
        .env_remove("CODEPEEK_TAILWIND_URL")
        .output()
        .expect("Failed to execute codepeek");
    assert_eq!(output.status.code(), Some(0));

    let document = fs::read_to_string(&out).expect("preview file should exist");
    assert!(document.starts_with("<!DOCTYPE html>"));
    assert!(document.contains("https://cdn.tailwindcss.com"));
    assert!(document.contains("<div class=\"flex p-4\">Hello</div>"));
    assert!(document.contains("#1a1a2e"));
}

#[test]
fn test_preview_blocked_exit_code() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", PYTHON_ANSWER);

    let output = run(&["preview"], &input);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: Python code cannot be previewed"));
    assert!(stderr.contains("suggestion:"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_preview_without_previewable_blocks() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", "```js\nconsole.log(1)\n```");

    let output = run(&["preview"], &input);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_render_markup() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", "## Title\n- **one**\n```py\nx = 1\n```");

    let output = run(&["render"], &input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<h2>Title</h2>"));
    assert!(stdout.contains("<strong>one</strong>"));
    assert!(stdout.contains("language-python"));
    assert!(stdout.starts_with("<div class=\"tech-badges\">"));
    assert!(stdout.contains("Python code cannot be previewed"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.md");

    let output = run(&["parse"], &missing);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_asset_url_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", HTML_ANSWER);

    let output = Command::new(codepeek_bin())
        .arg("preview")
        .arg(&input)
        .env("CODEPEEK_TAILWIND_URL", "ftp://example.com/tw.js")
        .output()
        .expect("Failed to execute codepeek");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_log_level_env_falls_back() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", HTML_ANSWER);

    let output = Command::new(codepeek_bin())
        .arg("parse")
        .arg(&input)
        .env_remove("RUST_LOG")
        .env("CODEPEEK_LOG_LEVEL", "verbose")
        .output()
        .expect("Failed to execute codepeek");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Segments (3):"));
}

#[test]
fn test_preview_of_untagged_commands_is_refused() {
    let dir = TempDir::new().unwrap();
    let input = write_answer(&dir, "answer.md", "Steps:\n```\nnpm install\nnpm start\n```");

    let output = run(&["preview"], &input);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

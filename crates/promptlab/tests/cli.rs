//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for var in [
        "PROMPTLAB_API_KEY",
        "PROMPTLAB_PROVIDER",
        "PROMPTLAB_MODEL",
        "PROMPTLAB_MIN_SCORE",
        "PROMPTLAB_API_BASE_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// A command isolated from the user's home and any project config.
fn isolated(dir: &tempfile::TempDir) -> Command {
    std::fs::create_dir_all(dir.path().join(".git")).unwrap();
    let mut cmd = cmd();
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("XDG_DATA_HOME", dir.path().join("data"))
        .env("PROMPTLAB_LOG_DIR", dir.path().join("logs"))
        .arg("-C")
        .arg(dir.path());
    cmd
}

const BAD_PROMPT: &str = "Write me something about dogs";

const GOOD_PROMPT: &str = "You are a senior travel writer. \
    I'm building a guide for first-time visitors to Lisbon. \
    Write 5 tips for a 3-day trip, formatted as a numbered list, in under 200 words. \
    For example: \"Buy a Viva Viagem card on day 1.\"";

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Analyze: input sources
// =============================================================================

#[test]
fn analyze_positional_prompt() {
    cmd()
        .args(["--color", "never", "analyze", BAD_PROMPT])
        .assert()
        .success()
        .stdout(predicate::str::contains("PromptLab Analysis Report"))
        .stdout(predicate::str::contains(BAD_PROMPT))
        .stdout(predicate::str::contains("Overall Score:"))
        .stdout(predicate::str::contains("[HIGH] Missing Context / Background"))
        .stdout(predicate::str::contains("Suggestions for Improvement"));
}

#[test]
fn analyze_reads_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "Summarize the attached report in 3 bullet points.").unwrap();
    cmd()
        .args(["analyze", "--json", "-f", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summarize the attached report"));
}

#[test]
fn analyze_reads_stdin() {
    cmd()
        .args(["analyze", "--json"])
        .write_stdin("Fix my code")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prompt\": \"Fix my code\""));
}

#[test]
fn argument_beats_file_and_stdin() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "from the file").unwrap();
    cmd()
        .args([
            "analyze",
            "--json",
            "from the argument",
            "--file",
            tmp.path().to_str().unwrap(),
        ])
        .write_stdin("from stdin")
        .assert()
        .success()
        .stdout(predicate::str::contains("from the argument"))
        .stdout(predicate::str::contains("from the file").not());
}

#[test]
fn file_beats_stdin() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "from the file").unwrap();
    cmd()
        .args(["analyze", "--json", "--file", tmp.path().to_str().unwrap()])
        .write_stdin("from stdin")
        .assert()
        .success()
        .stdout(predicate::str::contains("from the file"))
        .stdout(predicate::str::contains("from stdin").not());
}

#[test]
fn empty_prompt_fails() {
    cmd()
        .args(["analyze", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("prompt is empty"));
}

#[test]
fn whitespace_stdin_fails() {
    cmd()
        .arg("analyze")
        .write_stdin("   \n\t ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("prompt is empty"));
}

#[test]
fn missing_file_fails() {
    cmd()
        .args(["analyze", "--file", "/nonexistent/prompt.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/prompt.txt"));
}

// =============================================================================
// Analyze: output formats
// =============================================================================

#[test]
fn analyze_json_is_valid() {
    let output = cmd()
        .args(["analyze", BAD_PROMPT, "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("analyze --json should output valid JSON");

    assert_eq!(json["prompt"], BAD_PROMPT);
    assert_eq!(json["word_count"], 5);
    assert_eq!(json["sentence_count"], 1);
    assert_eq!(json["dimensions"].as_array().map(Vec::len), Some(4));
    let score = json["overall_score"].as_f64().unwrap();
    assert!((1.0..=10.0).contains(&score));
    assert!(json.get("enhancement").is_none());
}

#[test]
fn analyze_markdown_headers() {
    cmd()
        .args(["analyze", BAD_PROMPT, "--markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# PromptLab Analysis Report"))
        .stdout(predicate::str::contains("## Prompt"))
        .stdout(predicate::str::contains("## Overall Score: "))
        .stdout(predicate::str::contains("| Dimension | Score | Rating | Details |"))
        .stdout(predicate::str::contains("## Anti-Patterns Detected"))
        .stdout(predicate::str::contains("## Suggestions"));
}

#[test]
fn json_wins_over_markdown() {
    let output = cmd()
        .args(["analyze", BAD_PROMPT, "--markdown", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn good_prompt_scores_higher_than_bad() {
    let score = |prompt: &str| {
        let output = cmd().args(["analyze", "--json", prompt]).assert().success();
        let json: serde_json::Value =
            serde_json::from_slice(&output.get_output().stdout).unwrap();
        json["overall_score"].as_f64().unwrap()
    };
    assert!(score(GOOD_PROMPT) > score(BAD_PROMPT));
}

// =============================================================================
// Analyze: quality gate and enhancement
// =============================================================================

#[test]
fn min_score_gate_fails_low_prompt() {
    cmd()
        .args(["analyze", BAD_PROMPT, "--json", "--min-score", "9"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"overall_score\""))
        .stderr(predicate::str::contains("below minimum 9.0"));
}

#[test]
fn min_score_gate_passes() {
    cmd()
        .args(["analyze", GOOD_PROMPT, "--min-score", "1"])
        .assert()
        .success();
}

#[test]
fn enhance_without_key_still_reports() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir)
        .args(["analyze", BAD_PROMPT, "--json", "--enhance"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Enhancement skipped:"))
        .stderr(predicate::str::contains("no API key found"));

    let json: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).expect("valid JSON");
    assert_eq!(json["prompt"], BAD_PROMPT);
    assert!(json.get("enhancement").is_none());
}

#[test]
fn enhance_against_dead_endpoint_still_reports() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    isolated(&dir)
        .env("PROMPTLAB_API_KEY", "test-key")
        .env("PROMPTLAB_API_BASE_URL", format!("http://127.0.0.1:{port}"))
        .env("PROMPTLAB_ENHANCE_TIMEOUT_SECS", "5")
        .args(["--color", "never", "analyze", BAD_PROMPT, "--enhance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PromptLab Analysis Report"))
        .stdout(predicate::str::contains("AI-Enhanced Prompt").not())
        .stderr(predicate::str::contains("Enhancement skipped:"));
}

#[test]
fn enhance_unknown_provider_reports() {
    let dir = tempfile::tempdir().unwrap();
    isolated(&dir)
        .env("PROMPTLAB_API_KEY", "test-key")
        .args(["analyze", BAD_PROMPT, "--enhance", "--provider", "Gemini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PromptLab Analysis Report"))
        .stderr(predicate::str::contains("unknown provider 'gemini'"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Serve Command
// =============================================================================

#[test]
fn serve_help_shows_usage() {
    cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    // The -C flag should be accepted and work without error
    // We use a path that definitely exists
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}

//! CLI integration tests
//!
//! These tests run the lintstack binary in temporary project directories:
//! - init: creates lintstack.toml, --force behavior
//! - validate: exit codes for good and bad configurations
//! - print-config: human and JSONL output, exit code for excluded files
//! - files: listing linted and excluded files
//!
//! NOTE: The in-process init test changes the current directory and uses the
//! serial_test attribute so it does not interfere with other tests.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn lintstack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lintstack").unwrap();
    cmd.current_dir(dir).env_remove("LINTSTACK_LOG");
    cmd
}

/// Small JavaScript project using the default configuration
fn setup_project(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::create_dir_all(dir.join("dist")).unwrap();
    fs::create_dir_all(dir.join("node_modules").join("pkg")).unwrap();

    fs::write(dir.join("src").join("index.ts"), "export const x = 1;\n").unwrap();
    fs::write(dir.join("src").join("index.test.ts"), "console.log(1);\n").unwrap();
    fs::write(dir.join("dist").join("index.js"), "var x = 1;\n").unwrap();
    fs::write(
        dir.join("node_modules").join("pkg").join("index.js"),
        "module.exports = {};\n",
    )
    .unwrap();
    fs::write(dir.join("README.md"), "# demo\n").unwrap();
}

fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("lintstack.toml"), content).unwrap();
}

/// Rule ids of the `rule` records a successful JSONL run prints
fn jsonl_rules(dir: &Path, args: &[&str]) -> Vec<String> {
    let output = lintstack(dir).args(args).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .filter(|r| r["type"] == "rule")
        .map(|r| r["rule"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    lintstack(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lintstack.toml"));

    let written = fs::read_to_string(temp.path().join("lintstack.toml")).unwrap();
    assert!(written.contains("extends = \"js/recommended\""));
}

#[test]
fn test_init_does_not_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "# mine\n");

    lintstack(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(temp.path().join("lintstack.toml")).unwrap(),
        "# mine\n"
    );

    lintstack(temp.path())
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrote"));
    assert_ne!(
        fs::read_to_string(temp.path().join("lintstack.toml")).unwrap(),
        "# mine\n"
    );
}

#[test]
#[serial]
fn test_run_init_in_current_directory() {
    let temp = TempDir::new().unwrap();
    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp.path()).unwrap();

    let first = lintstack::cli::init::run_init(false);
    let second = lintstack::cli::init::run_init(false);

    std::env::set_current_dir(&original_dir).unwrap();

    use lintstack::cli::init::InitOutcome;
    assert_eq!(first.unwrap(), InitOutcome::Created);
    assert_eq!(second.unwrap(), InitOutcome::Skipped);
    assert!(temp.path().join("lintstack.toml").is_file());
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_builtin_default() {
    let temp = TempDir::new().unwrap();

    lintstack(temp.path())
        .arg("validate")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("built-in default configuration"));
}

#[test]
fn test_validate_discovers_parent_config() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "[lintstack]\nversion = \"1\"\n\n[[config]]\nignores = [\"dist/**\"]\n",
    );
    let nested = temp.path().join("packages").join("app");
    fs::create_dir_all(&nested).unwrap();

    lintstack(&nested)
        .arg("validate")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("lintstack.toml"))
        .stdout(predicate::str::contains("1 global ignore"));
}

#[test]
fn test_validate_unknown_bundle() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "[lintstack]\nversion = \"1\"\n\n[[config]]\nextends = \"airbnb-base\"\n",
    );

    lintstack(temp.path())
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("airbnb-base"));
}

#[test]
fn test_validate_bad_glob() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "[lintstack]\nversion = \"1\"\n\n[[config]]\nfiles = [\"src/[oops\"]\n",
    );

    lintstack(temp.path())
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("src/[oops"));
}

#[test]
fn test_validate_missing_explicit_config() {
    let temp = TempDir::new().unwrap();

    lintstack(temp.path())
        .args(["validate", "--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// print-config
// ============================================================================

#[test]
fn test_print_config_human() {
    let temp = TempDir::new().unwrap();
    setup_project(temp.path());

    lintstack(temp.path())
        .args(["print-config", "src/index.ts", "--color", "never"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("src/index.ts"))
        .stdout(predicate::str::contains("no-console"))
        .stdout(predicate::str::contains("(custom)"))
        .stdout(predicate::str::contains("rules enabled"))
        // off rules are hidden unless asked for
        .stdout(predicate::str::contains("  off ").not());
}

#[test]
fn test_print_config_show_off() {
    let temp = TempDir::new().unwrap();

    lintstack(temp.path())
        .args(["print-config", "src/a.ts", "--show-off", "--color", "never"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("off"))
        .stdout(predicate::str::contains("indent"));
}

#[test]
fn test_print_config_jsonl() {
    let temp = TempDir::new().unwrap();

    let output = lintstack(temp.path())
        .args(["print-config", "src/a.test.ts", "--format", "jsonl", "--show-off"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let console = records
        .iter()
        .find(|r| r["type"] == "rule" && r["rule"] == "no-console")
        .unwrap();
    assert_eq!(console["severity"], "off");
    assert_eq!(console["source"]["name"], "tests");

    let last = records.last().unwrap();
    assert_eq!(last["type"], "file");
    assert_eq!(last["file"], "src/a.test.ts");
    assert_eq!(last["evaluated"], true);
}

#[test]
fn test_print_config_jsonl_hides_off_rules() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "[lintstack]\nversion = \"1\"\n\n[[config]]\n[config.rules]\nno-console = \"warn\"\nno-var = \"off\"\n",
    );

    assert_eq!(
        jsonl_rules(temp.path(), &["print-config", "a.js", "--format", "jsonl"]),
        vec!["no-console"]
    );
    assert_eq!(
        jsonl_rules(
            temp.path(),
            &["print-config", "a.js", "--format", "jsonl", "--show-off"]
        ),
        vec!["no-console", "no-var"]
    );
}

#[test]
fn test_print_config_excluded_file() {
    let temp = TempDir::new().unwrap();

    lintstack(temp.path())
        .args(["print-config", "dist/index.js", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not linted"))
        .stdout(predicate::str::contains("dist/**"));

    lintstack(temp.path())
        .args(["print-config", "README.md", "--format", "jsonl"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"reason\":\"no-target\""));
}

#[test]
fn test_print_config_path_outside_project() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    write_config(&project, "[lintstack]\nversion = \"1\"\n");

    lintstack(&project)
        .args(["print-config", "../elsewhere/a.js", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("outside the base directory"));
}

// ============================================================================
// files
// ============================================================================

#[test]
fn test_files_lists_linted_files() {
    let temp = TempDir::new().unwrap();
    setup_project(temp.path());

    lintstack(temp.path())
        .args(["files", "--color", "never"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("src/index.ts"))
        .stdout(predicate::str::contains("src/index.test.ts"))
        .stdout(predicate::str::contains("dist/index.js").not())
        .stdout(predicate::str::contains("2 files linted"));
}

#[test]
fn test_files_all_shows_exclusions() {
    let temp = TempDir::new().unwrap();
    setup_project(temp.path());

    lintstack(temp.path())
        .args(["files", "--all", "--color", "never"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("dist/index.js"))
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains("not linted"));
}

#[test]
fn test_files_jsonl_summary() {
    let temp = TempDir::new().unwrap();
    setup_project(temp.path());

    let output = lintstack(temp.path())
        .args(["files", "src", "dist", "--format", "jsonl"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: serde_json::Value =
        serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["files"], 3);
    assert_eq!(summary["evaluated"], 2);
    assert_eq!(summary["excluded"], 1);
}

#[test]
fn test_files_with_nested_config() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("packages").join("app");
    fs::create_dir_all(app.join("src")).unwrap();
    write_config(
        &app,
        "[lintstack]\nversion = \"1\"\n\n[[config]]\n[config.rules]\nno-var = \"error\"\n",
    );
    fs::write(app.join("src").join("a.js"), "let a = 1;\n").unwrap();
    fs::write(temp.path().join("root.js"), "var b = 2;\n").unwrap();

    let output = lintstack(temp.path())
        .args([
            "--config",
            "packages/app/lintstack.toml",
            "files",
            "--all",
            "--format",
            "jsonl",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let records: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let root = records.iter().find(|r| r["file"] == "root.js").unwrap();
    assert_eq!(root["evaluated"], false);
    assert_eq!(root["exclusion"]["reason"], "outside-base");

    let source = records
        .iter()
        .find(|r| r["file"] == "packages/app/src/a.js")
        .unwrap();
    assert_eq!(source["evaluated"], true);

    let summary = records.last().unwrap();
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["excluded"], 1);
}

#[test]
fn test_files_missing_path() {
    let temp = TempDir::new().unwrap();

    lintstack(temp.path())
        .args(["files", "does-not-exist"])
        .assert()
        .code(2);
}

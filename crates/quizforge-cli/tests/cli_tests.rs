//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizforge() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizforge").unwrap()
}

#[test]
fn help_output() {
    quizforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LLM multiple-choice quiz generator"));
}

#[test]
fn version_output() {
    quizforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created template.json"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("template.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_template_on_init_output() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizforge()
        .current_dir(dir.path())
        .arg("validate-template")
        .arg("--template")
        .arg("template.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("Template is valid"));
}

#[test]
fn validate_template_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "this is not json {").unwrap();

    quizforge()
        .arg("validate-template")
        .arg("--template")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_template_nonexistent_file() {
    quizforge()
        .arg("validate-template")
        .arg("--template")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn generate_nonexistent_input() {
    quizforge()
        .args(["generate", "--input", "nonexistent.txt"])
        .args(["--count", "5", "--subject", "Science"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn generate_rejects_pdf_input() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("notes.pdf");
    std::fs::write(&pdf, b"%PDF-1.4").unwrap();

    quizforge()
        .arg("generate")
        .arg("--input")
        .arg(&pdf)
        .args(["--count", "5", "--subject", "Science"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF extraction is not supported"));
}

#[test]
fn generate_count_out_of_range() {
    // Bounds come from the original form: 3..=50 questions.
    for count in ["2", "51", "0"] {
        quizforge()
            .args(["generate", "--input", "notes.txt"])
            .args(["--count", count, "--subject", "Science"])
            .assert()
            .failure();
    }
}

#[test]
fn generate_subject_too_long() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "Water boils at 100C.").unwrap();

    quizforge()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .args(["--count", "5", "--subject", "a subject that is far too long"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 20 characters"));
}

#[test]
fn list_models_without_config() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("No providers configured"));
}

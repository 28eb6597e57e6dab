//! CLI integration tests using assert_cmd.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SHEET_CSV: &str = "\
id,question,option1,option2,option3,option4,answer,creator
q-old,Capital of Korea?,Seoul,Busan,Incheon,Daegu,1,Alice
q-new,Largest planet?,Mars,Jupiter,Venus,Earth,2,
q-bad,Broken?,a,b,c,d,9,Eve
";

const LEGACY_CSV: &str = "\
question,option1,option2,option3,option4,answer
Capital of Korea?,Busan,Seoul,Incheon,Daegu,Seoul
Odd one?,a,b,c,d,z
";

fn quiz_board() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quiz-board").unwrap()
}

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn list_prints_newest_first() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);

    let output = quiz_board()
        .arg("list")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 quizzes"))
        .stdout(predicate::str::contains("Largest planet?  (by anonymous)"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let newest = stdout.find("q-bad").unwrap();
    let oldest = stdout.find("q-old").unwrap();
    assert!(newest < oldest);
}

#[test]
fn list_empty_file_prompts_creation() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "empty.csv", "");

    quiz_board()
        .args(["list", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("No quizzes yet"));
}

#[test]
fn list_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    quiz_board()
        .args(["list", "--csv"])
        .arg(dir.path().join("missing.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("question source unavailable"));
}

#[test]
fn check_correct_and_wrong() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);

    quiz_board()
        .args(["check", "--id", "q-old", "--choice", "Seoul", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! (answer: Seoul)"));

    quiz_board()
        .args(["check", "--id", "q-old", "--choice", "Seoul ", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrong. (answer: Seoul, your choice: Seoul )",
        ));
}

#[test]
fn check_legacy_question_by_listed_reference() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "legacy.csv", LEGACY_CSV);

    let output = quiz_board().arg("list").arg("--csv").arg(&csv).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout
        .lines()
        .find(|line| line.contains("Capital of Korea?"))
        .unwrap();
    let reference = line.split_whitespace().next().unwrap();
    assert_eq!(reference, "#0");

    quiz_board()
        .args(["check", "--id", reference, "--choice", "Seoul", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! (answer: Seoul)"));

    quiz_board()
        .args(["check", "--row", "0", "--choice", "Busan", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrong. (answer: Seoul, your choice: Busan)",
        ));
}

#[test]
fn check_malformed_answer_fails() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);

    quiz_board()
        .args(["check", "--id", "q-bad", "--choice", "a", "--csv"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed answer"));
}

#[test]
fn check_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);

    quiz_board()
        .args(["check", "--id", "nope", "--choice", "a", "--csv"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no quiz with id nope"));
}

#[test]
fn add_appends_row() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("new.csv");

    quiz_board()
        .args([
            "add",
            "--question",
            "Capital of Korea?",
            "--option",
            "Seoul",
            "--option",
            "Busan",
            "--option",
            "Incheon",
            "--option",
            "Daegu",
            "--answer",
            "1",
            "--creator",
            "Alice",
            "--csv",
        ])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added quiz"));

    let content = fs::read_to_string(&csv).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,question,option1,option2,option3,option4,answer,creator")
    );
    assert!(lines
        .next()
        .unwrap()
        .ends_with(",Capital of Korea?,Seoul,Busan,Incheon,Daegu,1,Alice"));
}

#[test]
fn add_rejects_blank_creator() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);

    quiz_board()
        .args([
            "add",
            "--question",
            "Q?",
            "--option",
            "a",
            "--option",
            "b",
            "--option",
            "c",
            "--option",
            "d",
            "--answer",
            "2",
            "--creator",
            " ",
            "--csv",
        ])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("please fill in: creator"));

    assert_eq!(fs::read_to_string(&csv).unwrap(), SHEET_CSV);
}

#[test]
fn add_requires_four_options() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);

    quiz_board()
        .args([
            "add", "--question", "Q?", "--option", "a", "--option", "b", "--answer", "1",
            "--creator", "Ann", "--csv",
        ])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 options, got 2"));
}

#[test]
fn migrate_rewrites_legacy_answers() {
    let dir = TempDir::new().unwrap();
    let legacy = write_csv(&dir, "legacy.csv", LEGACY_CSV);
    let output = dir.path().join("sheet.csv");

    quiz_board()
        .args(["migrate", "--output"])
        .arg(&output)
        .arg("--csv")
        .arg(&legacy)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 quizzes"))
        .stderr(predicate::str::contains("warning:"));

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "id,question,option1,option2,option3,option4,answer,creator");
    assert!(lines[1].ends_with(",Capital of Korea?,Busan,Seoul,Incheon,Daegu,2,anonymous"));
    assert!(lines[2].ends_with(",Odd one?,a,b,c,d,z,anonymous"));

    quiz_board()
        .args(["migrate", "--output"])
        .arg(&output)
        .arg("--csv")
        .arg(&legacy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_file_selects_source() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "quiz.csv", SHEET_CSV);
    let config = dir.path().join("quiz.toml");
    fs::write(
        &config,
        format!("[source]\nkind = \"csv\"\npath = {:?}\n", csv.display().to_string()),
    )
    .unwrap();

    quiz_board()
        .args(["list", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 quizzes"));
}

#[test]
fn sheet_without_token_fails() {
    quiz_board()
        .env_remove("GOOGLE_SHEETS_TOKEN")
        .args(["list", "--sheet", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("access_token is empty"));
}

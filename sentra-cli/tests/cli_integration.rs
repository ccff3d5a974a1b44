//! Integration tests for the sentra CLI
//!
//! Every test that could reach the translation service either analyzes
//! English text or points the service at a closed local port, so the suite
//! never touches the network.

use assert_cmd::Command;
use calamine::{open_workbook, Data, Reader, Xlsx};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn sentra() -> Command {
    Command::cargo_bin("sentra").unwrap()
}

fn read_sheet(path: &Path, name: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(name).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

#[test]
fn test_analyze_english_text() {
    sentra()
        .args(["analyze", "-t", "I love this!", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Language: en"))
        .stdout(predicate::str::contains("Lexicon Sentiment: Positive (62.50%)"));
}

#[test]
fn test_analyze_rule_based_text() {
    sentra()
        .args(["analyze", "-t", "I love this!", "-m", "rule-based", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule-Based Sentiment: Positive (66.96%)"))
        .stdout(predicate::str::contains("Lexicon Sentiment").not());
}

#[test]
fn test_analyze_empty_text_is_neutral() {
    sentra()
        .args(["analyze", "-t", "", "-m", "rule-based", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Language: unknown"))
        .stdout(predicate::str::contains("Neutral (0.00%)"));
}

#[test]
fn test_rule_based_scores_untranslated_input() {
    sentra()
        .args(["analyze", "-t", "Este producto es muy bueno", "-m", "rule-based", "-q"])
        .arg("-c")
        .arg(fixture_path("offline.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Language: es"))
        .stdout(predicate::str::contains("Neutral (0.00%)"));
}

#[test]
fn test_unreachable_translation_service_fails() {
    sentra()
        .args(["analyze", "-t", "Este producto es muy bueno", "-m", "lexicon", "-q"])
        .arg("-c")
        .arg(fixture_path("offline.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("translation failed"))
        .stdout(predicate::str::contains("Sentiment").not());
}

#[test]
fn test_analyze_requires_a_source() {
    sentra()
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_analyze_file_json() {
    let output = sentra()
        .args(["analyze", "-f", "json", "-q", "-i"])
        .arg(fixture_path("english-review.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["detected_language"], "en");
    assert!(records[0]["original_text"]
        .as_str()
        .unwrap()
        .starts_with("This is a wonderful product"));
    assert!(records[0]["lexicon_sentiment"]
        .as_str()
        .unwrap()
        .starts_with("Positive ("));
    assert!(records[0]["rule_based_sentiment"].is_null());
}

#[test]
fn test_analyze_glob_to_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("records.csv");

    sentra()
        .args(["analyze", "-m", "rule-based", "-f", "csv", "-q", "-i"])
        .arg(fixture_path("*-review.txt"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let contents = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "Original Text,Detected Language,Lexicon Sentiment,Rule-Based Sentiment"
    );
    // english-review.txt sorts before paged-review.txt
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0][0].starts_with("This is a wonderful product"));
    assert!(rows[1][0].starts_with("The first chapter was wonderful"));
    for row in &rows {
        assert_eq!(&row[1], "en");
        assert_eq!(&row[2], "");
        assert!(!row[3].is_empty());
    }
}

#[test]
fn test_analyze_to_xlsx_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("records.xlsx");

    sentra()
        .args(["analyze", "-t", "I love this!", "-f", "xlsx", "-q", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(fs::read(&output_path).unwrap().starts_with(b"PK\x03\x04"));
    let rows = read_sheet(&output_path, "Sentiment");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Data::String("Original Text".to_string()));
    assert_eq!(rows[1][0], Data::String("I love this!".to_string()));
    assert_eq!(rows[1][1], Data::String("en".to_string()));
    assert_eq!(rows[1][2], Data::String("Positive (62.50%)".to_string()));
}

#[test]
fn test_xlsx_requires_output_file() {
    sentra()
        .args(["analyze", "-t", "I love this!", "-f", "xlsx", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("-o FILE"));
}

#[test]
fn test_analyze_no_matching_files() {
    sentra()
        .args(["analyze", "-q", "-i", "tests/fixtures/*.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_analyze_text_file_declared_as_pdf() {
    sentra()
        .args(["analyze", "--document-format", "pdf", "-q", "-i"])
        .arg(fixture_path("english-review.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed PDF"));
}

#[test]
fn test_analyze_with_custom_valence_lexicon() {
    sentra()
        .args(["analyze", "-t", "zorp", "-m", "rule-based", "-q", "--lexicon"])
        .arg(fixture_path("tiny-valence.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected Language: unknown"))
        .stdout(predicate::str::contains("Positive (61.24%)"));
}

#[test]
fn test_trend_text_output() {
    sentra()
        .args(["trend", "-m", "lexicon", "-q", "-i"])
        .arg(fixture_path("paged-review.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1:    75.00  Positive (75.00%)"))
        .stdout(predicate::str::contains("Page 3:     0.00  Neutral (0.00%)"))
        .stdout(predicate::str::contains("Page 5").not())
        .stdout(predicate::str::contains("Mean:"));
}

#[test]
fn test_trend_json_follows_page_order() {
    let output = sentra()
        .args(["trend", "-m", "rule-based", "-f", "json", "-q", "-i"])
        .arg(fixture_path("paged-review.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let pages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pages = pages.as_array().unwrap();
    assert_eq!(pages.len(), 4);

    let numbers: Vec<u64> = pages.iter().map(|p| p["page"].as_u64().unwrap()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    let values: Vec<f64> = pages.iter().map(|p| p["value"].as_f64().unwrap()).collect();
    assert!(values[0] > 0.0);
    assert!(values[1] < 0.0);
    assert_eq!(values[2], 0.0);
    assert!(values[3] > 0.0);
    assert!(values.iter().all(|v| (-100.0..=100.0).contains(v)));
}

#[test]
fn test_trend_to_xlsx_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("trend.xlsx");

    sentra()
        .args(["trend", "-m", "lexicon", "-f", "xlsx", "-q", "-i"])
        .arg(fixture_path("paged-review.txt"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let rows = read_sheet(&output_path, "Trend");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0][1], Data::String("Value".to_string()));
    assert_eq!(rows[1][0], Data::Float(1.0));
    assert_eq!(rows[1][1], Data::Float(75.0));
    assert_eq!(rows[1][2], Data::String("Positive (75.00%)".to_string()));
    assert_eq!(rows[3][1], Data::Float(0.0));
}

#[test]
fn test_trend_modes_agree() {
    let run = |mode: &str| {
        let output = sentra()
            .args(["trend", "-m", "rule-based", "-f", "csv", "-q", "--threads", "2"])
            .args(["--mode", mode, "-i"])
            .arg(fixture_path("paged-review.txt"))
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let sequential = run("sequential");
    assert!(sequential.starts_with("Page,Value,Sentiment\n"));
    assert_eq!(sequential, run("parallel"));
    assert_eq!(sequential, run("adaptive"));
}

#[test]
fn test_trend_empty_document() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty.txt");
    fs::write(&empty, "").unwrap();

    sentra()
        .args(["trend", "-f", "json", "-q", "-i"])
        .arg(&empty)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_trend_missing_file() {
    sentra()
        .args(["trend", "-q", "-i", "tests/fixtures/missing.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_list_methods() {
    sentra()
        .args(["list", "methods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lexicon"))
        .stdout(predicate::str::contains("rule-based"));
}

#[test]
fn test_list_languages() {
    sentra()
        .args(["list", "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en"))
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("unknown"));
}

#[test]
fn test_list_formats() {
    sentra()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"))
        .stdout(predicate::str::contains("pdf"));
}

#[test]
fn test_validate_valid_lexicon() {
    sentra()
        .args(["validate", "--lexicon"])
        .arg(fixture_path("tiny-valence.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Lexicon is valid!"))
        .stdout(predicate::str::contains("Words: 1"));
}

#[test]
fn test_validate_invalid_lexicon() {
    sentra()
        .args(["validate", "--lexicon"])
        .arg(fixture_path("invalid-polarity.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Lexicon is invalid!"))
        .stdout(predicate::str::contains("polarity of 'great'"));
}

#[test]
fn test_help_and_version() {
    sentra()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("trend"));

    sentra().arg("--version").assert().success();
}

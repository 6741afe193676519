//! Command-line tests. Tests that read `tests/fixtures/order.pdf` return
//! early when poppler-utils is not installed.

use assert_cmd::Command;
use pedidos_core::extraction::pdftotext::PdftotextExtractor;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn pedidos() -> Command {
    Command::cargo_bin("pedidos").unwrap()
}

/// One page: "PÁGINA: 3" at the top, JBGF1234 at x=50 and 12 at x=420 on the same row.
fn order_pdf() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/order.pdf")
}

fn pdftotext_missing() -> bool {
    if PdftotextExtractor::is_available() {
        return false;
    }
    eprintln!("pdftotext not installed, skipping");
    true
}

#[test]
fn layout_list_shows_default_preset() {
    pedidos()
        .args(["layout", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jbgf").and(predicate::str::contains("(default)")));
}

#[test]
fn layout_show_prints_json() {
    pedidos()
        .args(["layout", "show", "jbgf"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""page_marker": "PÁGINA:""#))
        .stdout(predicate::str::contains("(400, 450)"))
        .stdout(predicate::str::contains("containing 'PÁGINA:' that has one"));
}

#[test]
fn layout_show_unknown_preset_fails() {
    pedidos()
        .args(["layout", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preset 'nope'"));
}

#[test]
fn layout_validate_rejects_overlapping_bands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{
            "name": "Bad",
            "product_band": { "min": 0, "max": 420 },
            "quantity_band": { "min": 400, "max": 450 },
            "product_pattern": "JBGF[0-9]+",
            "page_marker": "PÁGINA:",
            "row_tolerance": 10
        }"#,
    )
    .unwrap();

    pedidos()
        .args(["layout", "validate"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlaps"));
}

#[test]
fn layout_validate_accepts_good_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("good.json");
    fs::write(
        &path,
        r#"{
            "name": "Good",
            "product_band": { "min": 0, "max": 120 },
            "quantity_band": { "min": 380, "max": 460 },
            "product_pattern": "JBGF[0-9]+",
            "page_marker": "PÁGINA:",
            "row_tolerance": 8,
            "matching": "exclusive"
        }"#,
    )
    .unwrap();

    pedidos()
        .args(["layout", "validate"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout 'Good' is valid."))
        .stdout(predicate::str::contains("exclusive"));
}

#[test]
fn extract_corrupt_file_reports_error_and_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("broken.pdf");
    let xlsx = dir.path().join("out.xlsx");
    fs::write(&pdf, b"this is not a pdf").unwrap();

    pedidos()
        .arg("extract")
        .arg(&pdf)
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.pdf"))
        .stderr(predicate::str::contains("No product data could be extracted"));

    assert!(!xlsx.exists());
}

#[test]
fn extract_missing_file_is_a_per_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");
    let xlsx = dir.path().join("out.xlsx");

    pedidos()
        .args(["extract", "-o", "json"])
        .arg(&missing)
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("failed to process"))
        .stderr(predicate::str::contains("missing.pdf"));
}

#[test]
fn extract_rejects_preset_with_layout_file() {
    pedidos()
        .args(["extract", "a.pdf", "--preset", "jbgf", "--layout", "x.json"])
        .assert()
        .failure();
}

#[test]
fn extract_requires_input_files() {
    pedidos().arg("extract").assert().failure();
}

#[test]
fn extract_writes_xlsx_for_valid_pdf() {
    if pdftotext_missing() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("out.xlsx");

    pedidos()
        .args(["extract", "-o", "json"])
        .arg(order_pdf())
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""product": "JBGF1234""#))
        .stdout(predicate::str::contains(r#""quantity": 12"#))
        .stdout(predicate::str::contains(r#""index": 1"#))
        .stderr(predicate::str::contains("Extracted 1 row(s) from 1 file(s)"));

    let bytes = fs::read(&xlsx).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn extract_table_output_lists_row() {
    if pdftotext_missing() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("out.xlsx");

    pedidos()
        .arg("extract")
        .arg(order_pdf())
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains("PRODUTO"))
        .stdout(predicate::str::contains("JBGF1234"));

    assert!(xlsx.exists());
}

#[test]
fn extract_mixed_batch_keeps_good_file() {
    if pdftotext_missing() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.pdf");
    let xlsx = dir.path().join("out.xlsx");
    fs::write(&broken, b"not a pdf").unwrap();

    pedidos()
        .args(["extract", "-o", "json"])
        .arg(&broken)
        .arg(order_pdf())
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains("JBGF1234"))
        .stderr(predicate::str::contains("broken.pdf"))
        .stderr(predicate::str::contains("Extracted 1 row(s) from 1 file(s)"));

    assert!(xlsx.exists());
}

#[test]
fn blocks_marks_product_and_quantity() {
    if pdftotext_missing() {
        return;
    }
    pedidos()
        .arg("blocks")
        .arg(order_pdf())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Page 1"))
        .stdout(predicate::str::contains("product JBGF1234"))
        .stdout(predicate::str::contains("qty 12"));
}

#[test]
fn blocks_rejects_page_out_of_range() {
    if pdftotext_missing() {
        return;
    }
    pedidos()
        .args(["blocks", "--page", "5"])
        .arg(order_pdf())
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn blocks_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    pedidos()
        .arg("blocks")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;

use common::TestWorkspace;

const NESTED: &str = ",Cat1,\n,Col1,Col2\nSeg1,,\nSeg1:Row1,1.0,2.0\nSeg1:Row2,3.0,4.0\n";

fn geotable() -> Command {
    Command::cargo_bin("geotable").expect("binary exists")
}

#[test]
fn probe_writes_a_yaml_meta_file() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("nested.csv", NESTED);
    let meta = workspace.path().join("nested.meta");

    geotable()
        .args([
            "probe",
            "-i",
            input.to_str().unwrap(),
            "-m",
            meta.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&meta).expect("read meta");
    let report: serde_yaml::Value = serde_yaml::from_str(&contents).expect("parse meta YAML");
    assert_eq!(report["delimiter"].as_str(), Some("comma"));
    assert_eq!(report["column_count"].as_u64(), Some(2));
    assert_eq!(report["row_count"].as_u64(), Some(2));
    assert_eq!(report["header_depth"].as_u64(), Some(2));
    assert_eq!(report["columns"][0]["title"].as_str(), Some("Col1"));
    assert_eq!(report["columns"][0]["datatype"].as_str(), Some("number"));
}

#[test]
fn convert_rewrites_with_the_extension_delimiter() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("nested.csv", NESTED);
    let output = workspace.path().join("nested.tsv");

    geotable()
        .args([
            "convert",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(written, NESTED.replace(',', "\t"));
}

#[test]
fn convert_honors_an_explicit_output_delimiter() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("nested.csv", NESTED);
    let output = workspace.path().join("nested.txt");

    geotable()
        .args([
            "convert",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--output-delimiter",
            ";",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(written, NESTED.replace(',', ";"));
}

#[test]
fn preview_prints_headers_and_rows() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("nested.csv", NESTED);

    geotable()
        .args(["preview", "-i", input.to_str().unwrap(), "--rows", "1"])
        .assert()
        .success()
        .stdout(contains("Cat1"))
        .stdout(contains("Seg1:Row1"))
        .stdout(contains("Seg1:Row2").not());
}

#[test]
fn mislabeled_extension_still_detects_the_real_delimiter() {
    let workspace = TestWorkspace::new();
    // tab-separated content in a .csv file: content detection must win
    let input = workspace.write("mislabeled.csv", &NESTED.replace(',', "\t"));
    let meta = workspace.path().join("mislabeled.meta");

    geotable()
        .args([
            "probe",
            "-i",
            input.to_str().unwrap(),
            "-m",
            meta.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&meta).expect("read meta");
    assert!(contents.contains("delimiter: tab"));
}

#[test]
fn ragged_input_fails_with_a_parse_error() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("ragged.csv", "a,b\n1.0,2.0,3.0\n");

    geotable()
        .args(["preview", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Parsing table from"));
}

#[test]
fn single_column_file_falls_back_to_the_extension_default() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("single.csv", "value\n1.0\n2.0\n");
    let meta = workspace.path().join("single.meta");

    geotable()
        .args([
            "probe",
            "-i",
            input.to_str().unwrap(),
            "-m",
            meta.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&meta).expect("read meta");
    assert!(contents.contains("column_count: 1"));
}

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use dupview::cli::Cli;
use dupview::error::ExitCode;
use dupview::report::{parse_report, ReportEntry};
use tempfile::{tempdir, TempDir};

use super::http_stub::serve_once;

const REPORT_JSON: &str = r#"[
    {"hash": "abc123", "files": ["/a/x.txt", "/b/x.txt"]},
    {"hash": "def456", "files": ["/c/y.png", "/d/y.png"]}
]"#;

fn write_report_file(dir: &TempDir) -> String {
    let path = dir.path().join("report.json");
    fs::write(&path, REPORT_JSON).unwrap();
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> ExitCode {
    let mut argv = vec!["dupview", "-q"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    dupview::run_app(cli).unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_json_export_filters() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let out = dir.path().join("out.json");

    let code = run(&[
        "--file",
        &report,
        "--output",
        "json",
        "--filter",
        "X.TXT",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::Success);
    let exported = parse_report(&read(&out)).unwrap();
    assert_eq!(
        exported,
        vec![ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"])]
    );
}

#[test]
fn test_json_export_reads_back_through_file_source() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    run(&["--file", &report, "--output", "json", "--output-file", first.to_str().unwrap()]);
    let code = run(&[
        "--file",
        first.to_str().unwrap(),
        "--output",
        "json",
        "--output-file",
        second.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::Success);
    assert_eq!(read(&first), read(&second));
}

#[test]
fn test_csv_export() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let out = dir.path().join("out.csv");

    let code = run(&["--file", &report, "--output", "csv", "--output-file", out.to_str().unwrap()]);

    assert_eq!(code, ExitCode::Success);
    assert_eq!(
        read(&out),
        "abc123,/a/x.txt,/b/x.txt\ndef456,/c/y.png,/d/y.png\n"
    );
}

#[test]
fn test_text_export_has_no_color_in_files() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let out = dir.path().join("out.txt");

    let code = run(&[
        "--file",
        &report,
        "--output",
        "text",
        "--filter",
        "png",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::Success);
    assert_eq!(read(&out), "def456 (2 files)\n   /c/y.png\n   /d/y.png\n");
}

#[test]
fn test_html_export_contains_whole_report() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let out = dir.path().join("out.html");

    let code = run(&[
        "--file",
        &report,
        "--output",
        "html",
        "--filter",
        "png",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::Success);
    let html = read(&out);
    assert!(html.contains("abc123"));
    assert!(html.contains("def456"));
    assert!(html.contains("value=\"png\""));
}

#[test]
fn test_no_matches_exit_code() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let out = dir.path().join("out.json");

    let code = run(&[
        "--file",
        &report,
        "--output",
        "json",
        "--filter",
        "nothing-matches-this",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::NoDuplicates);
    assert!(parse_report(&read(&out)).unwrap().is_empty());
}

#[test]
fn test_missing_report_file_degrades_to_empty() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let out = dir.path().join("out.json");

    let code = run(&[
        "--file",
        missing.to_str().unwrap(),
        "--output",
        "json",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::ReportUnavailable);
    assert_eq!(read(&out).trim(), "[]");
}

#[test]
fn test_endpoint_export() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let (url, server) = serve_once(200, REPORT_JSON, Duration::ZERO);

    let code = run(&[
        "--endpoint",
        &url,
        "--output",
        "csv",
        "--filter",
        "/C/",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::Success);
    assert_eq!(read(&out), "def456,/c/y.png,/d/y.png\n");
    server.join().unwrap();
}

#[test]
fn test_endpoint_error_status_exit_code() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let (url, server) = serve_once(502, "bad gateway", Duration::ZERO);

    let code = run(&["--endpoint", &url, "--output", "csv", "--output-file", out.to_str().unwrap()]);

    assert_eq!(code, ExitCode::ReportUnavailable);
    assert_eq!(read(&out), "");
    server.join().unwrap();
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let report = write_report_file(&dir);
    let missing = dir.path().join("absent.toml");

    let cli = Cli::try_parse_from([
        "dupview",
        "-q",
        "--file",
        report.as_str(),
        "--output",
        "json",
        "--config",
        missing.to_str().unwrap(),
    ])
    .unwrap();

    let err = dupview::run_app(cli).unwrap_err();
    assert!(format!("{:#}", err).contains("config file not found"));
}

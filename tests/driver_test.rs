// Driver tests: file discovery, output naming and per-file isolation

use jack_analyzer::driver::{analyze_file, analyze_path, collect_sources, AnalyzeError, AnalyzerOptions, OutputMode};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAIN: &str = "class Main {\n  function void main() {\n    do Output.printInt(1 + 2);\n    return;\n  }\n}\n";
const BROKEN: &str = "class Broken {\n  function void main() {\n    let x 1;\n  }\n}\n";

fn write_source(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).expect("Failed to write source");
}

#[test]
fn test_single_file_written_beside_source() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "Main.jack", MAIN);

    let written = analyze_file(&dir.path().join("Main.jack"), &AnalyzerOptions::default())
        .expect("Analysis failed");

    assert_eq!(written, dir.path().join("Main.xml"));
    let xml = fs::read_to_string(written).unwrap();
    assert!(xml.starts_with("<class>\n<keyword>class</keyword>\n"));
    assert!(xml.ends_with("</class>\n"));
}

#[test]
fn test_token_mode_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    write_source(dir.path(), "Main.jack", MAIN);

    let options = AnalyzerOptions {
        mode: OutputMode::Tokens,
        out_dir: Some(out.clone()),
        ..AnalyzerOptions::default()
    };
    let written = analyze_file(&dir.path().join("Main.jack"), &options).unwrap();

    assert_eq!(written, out.join("MainT.xml"));
    let xml = fs::read_to_string(written).unwrap();
    let lines: Vec<&str> = xml.lines().collect();
    assert_eq!(lines.first(), Some(&"<tokens>"));
    assert_eq!(lines.last(), Some(&"</tokens>"));
    assert!(!xml.contains("<subroutineDec>"));
    assert!(xml.contains("<integerConstant>2</integerConstant>"));
}

#[test]
fn test_directory_isolates_failures() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "Main.jack", MAIN);
    write_source(dir.path(), "Broken.jack", BROKEN);
    write_source(dir.path(), "notes.txt", "not jack");

    let sources = collect_sources(dir.path()).unwrap();
    assert_eq!(
        sources,
        vec![dir.path().join("Broken.jack"), dir.path().join("Main.jack")]
    );

    let report = analyze_path(dir.path(), &AnalyzerOptions::default()).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.written, vec![dir.path().join("Main.xml")]);
    assert_eq!(report.failures.len(), 1);

    match &report.failures[0] {
        AnalyzeError::Parse { path, source } => {
            assert_eq!(path, &dir.path().join("Broken.jack"));
            assert_eq!(source.line(), Some(3));
        }
        other => panic!("Expected parse failure, got {:?}", other),
    }

    // The failed file keeps the prefix written before the error.
    let partial = fs::read_to_string(dir.path().join("Broken.xml")).unwrap();
    assert!(partial.ends_with("<identifier>x</identifier>\n"));
}

#[test]
fn test_empty_directory_has_no_sources() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        analyze_path(dir.path(), &AnalyzerOptions::default()),
        Err(AnalyzeError::NoSources { .. })
    ));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = analyze_file(&dir.path().join("Nope.jack"), &AnalyzerOptions::default()).unwrap_err();
    assert!(matches!(err, AnalyzeError::Read { .. }));
    assert!(err.to_string().contains("Nope.jack"));
}

//! Integration tests for loading fragments from saved extraction responses.

use std::fs;

use tempfile::TempDir;

use pdfscript::parser::ErrorMode;
use pdfscript::{
    load_file, load_file_with_options, load_from, BuildOptions, Error, Fragment, FragmentSource,
    JsonFileSource, Pdfscript,
};

const RESPONSE: &str = r#"{
    "pages": [
        {"text": "Chapter 1 Kinematics", "bbox": [72.0, 72.0, 300.0, 90.0], "page": 0},
        {"text": "An object in motion", "bbox": [72.0, 100.0, 260.0, 112.0], "page": 0},
        {"text": " ", "bbox": [260.0, 100.0, 264.0, 112.0], "page": 0},
        {"text": "stays in motion.", "bbox": [264.0, 100.0, 380.0, 112.0], "page": 0},
        {"text": "\n", "bbox": [380.0, 100.0, 380.0, 112.0], "page": 0},
        {"text": "1.1 Velocity", "bbox": [72.0, 72.0, 200.0, 86.0], "page": 1}
    ],
    "error": null
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "lecture.json", RESPONSE);

    let doc = load_file(&path).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.fragment_count(), 6);

    // The gap filler is ordinary body text inside the paragraph.
    let paragraph = &doc.pages[0].nodes[1];
    assert_eq!(paragraph.plain_text(), "An object in motion stays in motion.\n");
}

#[test]
fn test_source_with_root() {
    let dir = TempDir::new().unwrap();
    write(&dir, "lecture.json", RESPONSE);

    let source = JsonFileSource::new().with_root(dir.path());
    let fragments = source.fetch("lecture.json").unwrap();
    assert_eq!(fragments.len(), 6);
    assert_eq!(fragments[5].page, 1);
}

#[test]
fn test_missing_file_is_source_error() {
    let dir = TempDir::new().unwrap();
    let source = JsonFileSource::new().with_root(dir.path());
    let err = source.fetch("missing.json").unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_unparsable_file_is_source_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{\"pages\": [");
    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, Error::Source(_)));
}

#[test]
fn test_upstream_error_message() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "failed.json",
        r#"{"pages": [], "error": "Failed to download PDF: 404 Not Found"}"#,
    );
    let err = load_file(&path).unwrap_err();
    assert_eq!(err.to_string(), "Failed to download PDF: 404 Not Found");
}

#[test]
fn test_error_mode_controls_malformed_records() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "odd.json",
        r#"{"pages": [
            {"text": "fine", "bbox": [0, 0, 1, 1], "page": 0},
            {"text": "negative", "bbox": [0, 0, 1, 1], "page": -2}
        ]}"#,
    );

    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFragment(_)));

    let doc = load_file_with_options(&path, BuildOptions::new().lenient()).unwrap();
    assert_eq!(doc.fragment_count(), 1);
}

struct StaticSource(Vec<Fragment>);

impl FragmentSource for StaticSource {
    fn fetch(&self, _locator: &str) -> pdfscript::Result<Vec<Fragment>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_custom_source() {
    let source = StaticSource(vec![
        Fragment::new("late page", 4, [0.0; 4]),
        Fragment::new("Chapter 1 Start", 0, [0.0; 4]),
    ]);
    let doc = load_from(&source, "anything", BuildOptions::new().sequential()).unwrap();
    let pages: Vec<_> = doc.pages.iter().map(|s| s.page).collect();
    assert_eq!(pages, vec![0, 4]);
}

#[test]
fn test_builder_round_trip_to_outputs() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "lecture.json", RESPONSE);

    let transcript = Pdfscript::new().sequential().load(&path).unwrap();
    let markdown = transcript.to_markdown().unwrap();
    assert!(markdown.contains("# Chapter 1 Kinematics"));
    assert!(markdown.contains("## 1.1 Velocity"));

    let text = transcript.to_text().unwrap();
    assert!(text.starts_with("Page 1"));

    let json = transcript.to_json(pdfscript::JsonFormat::Compact).unwrap();
    let back: pdfscript::Document = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, transcript.document());

    let strict = JsonFileSource::new().with_error_mode(ErrorMode::Strict);
    assert!(strict.fetch(path.to_str().unwrap()).is_ok());
}

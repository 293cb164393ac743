use phonebank_store::autosave::AutosaveArea;
use phonebank_store::error::StoreErrorKind;
use tempfile::TempDir;

#[test]
fn save_strips_blank_lines_and_roundtrips() {
    let temp = TempDir::new().expect("temp dir");
    let area = AutosaveArea::new(temp.path());

    let written = area
        .save("session.csv", "a,b\n\n  \nc,d\n")
        .expect("save");
    assert!(written.ends_with("session.csv"));
    assert!(area.exists("session.csv"));
    assert_eq!(area.load("session.csv").expect("load"), "a,b\nc,d");
}

#[test]
fn save_creates_intermediate_directories() {
    let temp = TempDir::new().expect("temp dir");
    let area = AutosaveArea::new(temp.path());

    let written = area
        .save("/2026/march/session.csv", "a,b")
        .expect("save");
    assert!(written.starts_with(temp.path()));
    assert!(written.ends_with("2026/march/session.csv"));
}

#[test]
fn paths_escaping_the_area_are_rejected() {
    let temp = TempDir::new().expect("temp dir");
    let area = AutosaveArea::new(temp.path().join("autosave"));

    let err = area.save("../outside.csv", "a,b").expect_err("rejected");
    assert_eq!(err.kind(), StoreErrorKind::InvalidDataPath);
    let err = area.save("", "a,b").expect_err("rejected");
    assert_eq!(err.kind(), StoreErrorKind::InvalidDataPath);
}

#[test]
fn loading_a_missing_file_is_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let area = AutosaveArea::new(temp.path());

    let err = area.load("missing.csv").expect_err("missing");
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

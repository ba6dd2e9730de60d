//! Directory scanning and completeness tests

mod common;

use common::{touch, MockToolkit};
use std::fs;
use tempfile::tempdir;
use tubeprep::scanner::{
    classify, import_problems, partition, validate_media, Completeness, FileGrouper,
};
use tubeprep_common::CategoryTable;

fn grouper() -> FileGrouper {
    FileGrouper::new(CategoryTable::default())
}

#[test]
fn test_grouping_is_idempotent() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Show [abcdefghij1].mkv");
    touch(dir.path(), "Show [abcdefghij1].info.json");
    touch(dir.path(), "Show [abcdefghij1].webp");
    touch(dir.path(), "Show [abcdefghij1].en.vtt");
    touch(dir.path(), "Show [abcdefghij1].de.vtt");
    touch(dir.path(), "Show [abcdefghij1].description");
    fs::create_dir(dir.path().join("season 2")).unwrap();
    touch(&dir.path().join("season 2"), "Next [abcdefghij2].webm");

    let first = grouper().scan_directory(dir.path()).unwrap();
    let second = grouper().scan_directory(dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].subtitle_paths.len(), 2);
    assert!(first[0].description_path.is_some());
    assert!(first[1].root_dir.ends_with("season 2"));
}

#[test]
fn test_files_without_token_are_ignored() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Show.mkv");
    touch(dir.path(), "Show [short].mkv");
    touch(dir.path(), "Show [abcdefghij1] extra.txt");

    let items = grouper().scan_directory(dir.path()).unwrap();
    assert!(items.is_empty());
}

#[test]
fn test_thumbnail_only_is_orphan() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Clip [klmnopqrst1].jpg");

    let items = grouper().scan_directory(dir.path()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(classify(&items[0]), Completeness::Orphan);

    let split = partition(items);
    assert!(split.usable.is_empty());
    assert_eq!(split.orphans.len(), 1);
}

#[test]
fn test_subtitle_only_is_orphan_and_metadata_only_is_missing() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "A [abcdefghij1].en.vtt");
    touch(dir.path(), "B [abcdefghij2].info.json");

    let split = partition(grouper().scan_directory(dir.path()).unwrap());
    assert_eq!(split.orphans.len(), 1);
    assert_eq!(split.orphans[0].id.as_str(), "abcdefghij1");
    assert_eq!(split.missing.len(), 1);
    assert_eq!(split.missing[0].id.as_str(), "abcdefghij2");
}

#[test]
fn test_custom_extension_table() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Show [abcdefghij1].avi");
    touch(dir.path(), "Show [abcdefghij1].mkv");

    let table = CategoryTable {
        media: vec![".avi".to_string()],
        ..CategoryTable::default()
    };
    let items = FileGrouper::new(table).scan_directory(dir.path()).unwrap();

    let media = items[0].media_path.as_ref().unwrap();
    assert!(media.ends_with("Show [abcdefghij1].avi"));
}

#[test]
fn test_import_problems_report() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Done [abcdefghij1].mp4");
    touch(dir.path(), "Done [abcdefghij1].info.json");
    touch(dir.path(), "NoMeta [abcdefghij2].mp4");
    touch(dir.path(), "Clip [klmnopqrst1].jpg");

    let items = grouper().scan_directory(dir.path()).unwrap();
    let problems = import_problems(&items);

    let ids: Vec<_> = problems.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["abcdefghij2", "klmnopqrst1"]);
    assert!(problems[0].missing_metadata && !problems[0].missing_media);
    assert!(problems[1].orphan);
}

#[test]
fn test_validate_media_reports_invalid_and_missing() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "Good [abcdefghij1].mp4");
    touch(dir.path(), "Bad [abcdefghij2].mkv");
    touch(dir.path(), "Meta [abcdefghij3].info.json");

    let items = grouper().scan_directory(dir.path()).unwrap();
    let toolkit = MockToolkit::new().invalid_media("Bad [abcdefghij2].mkv");
    let report = validate_media(&toolkit, &items);

    assert_eq!(report.valid.len(), 1);
    assert_eq!(report.invalid.len(), 1);
    assert!(report.invalid[0].ends_with("Bad [abcdefghij2].mkv"));
    assert_eq!(report.no_media.len(), 1);
    assert!(!report.is_clean());
}

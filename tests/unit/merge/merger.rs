//! Unit tests for multi-source merge

use crate::common_fixtures::write_file;
use std::path::PathBuf;
use tempfile::TempDir;
use walletpoints::merge::Merger;
use walletpoints::models::PointRow;
use walletpoints::PipelineError;

#[test]
fn test_skips_source_missing_point_column() {
    let dir = TempDir::new().unwrap();
    let good = write_file(
        dir.path(),
        "a.csv",
        "wallet_address,point\nA,10\nB,20\nC,30\n",
    );
    let bad = write_file(dir.path(), "b.csv", "wallet_address,score\nD,40\n");

    let outcome = Merger::default().merge(&[good.clone(), bad.clone()]);
    assert_eq!(outcome.dataset.len(), 3);
    assert_eq!(outcome.merged, vec![(good, 3)]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, bad);
    assert!(outcome.skipped[0].reason.contains("point"));
}

#[test]
fn test_concatenates_in_file_order_with_duplicates() {
    let dir = TempDir::new().unwrap();
    let first = write_file(
        dir.path(),
        "first.csv",
        "extra,wallet_address,point\nx,A,1\ny,B,2\n",
    );
    let second = write_file(dir.path(), "second.csv", "point,wallet_address\n5,A\n");

    let outcome = Merger::default().merge(&[first, second]);
    assert_eq!(
        outcome.dataset.rows(),
        &[
            PointRow::new("A", "1"),
            PointRow::new("B", "2"),
            PointRow::new("A", "5"),
        ]
    );
}

#[test]
fn test_unreadable_and_missing_sources_are_skipped() {
    let dir = TempDir::new().unwrap();
    let good = write_file(dir.path(), "good.csv", "wallet_address,point\nA,1\n");
    let missing = dir.path().join("gone.csv");
    let corrupt = dir.path().join("corrupt.csv");
    std::fs::write(&corrupt, b"wallet_address,point\n\xff\xfe,1\n").unwrap();

    let outcome = Merger::default().merge(&[missing, corrupt, good]);
    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.skipped.len(), 2);
}

#[test]
fn test_discover_is_sorted_and_filters_extension() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.csv", "wallet_address,point\n");
    write_file(dir.path(), "a.CSV", "wallet_address,point\n");
    write_file(dir.path(), "notes.txt", "ignore me");
    std::fs::create_dir(dir.path().join("sub.csv")).unwrap();

    let files = Merger::discover(dir.path(), "csv", None).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.CSV", "b.csv"]);
}

#[test]
fn test_discover_excludes_previous_output() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.csv", "wallet_address,point\nA,1\n");
    let output = write_file(dir.path(), "merged.csv", "wallet_address,point\nA,1\n");

    let files = Merger::discover(dir.path(), ".csv", Some(&output)).unwrap();
    assert_eq!(files, vec![dir.path().join("a.csv")]);
}

#[test]
fn test_discover_errors() {
    let dir = TempDir::new().unwrap();

    let err = Merger::discover(&dir.path().join("absent"), "csv", None).unwrap_err();
    assert!(matches!(err, PipelineError::DirectoryNotFound(_)));

    let err = Merger::discover(dir.path(), "csv", None).unwrap_err();
    assert!(matches!(err, PipelineError::NoSourceFiles { .. }));
    assert_eq!(err.exit_code(), 5);

    let none: Vec<PathBuf> = Vec::new();
    assert!(Merger::default().merge(&none).dataset.is_empty());
}

#[test]
fn test_custom_source_columns_map_to_canonical_rows() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "gmgn.csv", "address,score\nA,7\nB,8\n");
    let canonical = write_file(dir.path(), "photon.csv", "wallet_address,point\nC,9\n");

    let outcome = Merger::new("address", "score").merge(&[source.clone(), canonical.clone()]);
    assert_eq!(
        outcome.dataset.rows(),
        &[PointRow::new("A", "7"), PointRow::new("B", "8")]
    );
    assert_eq!(outcome.merged, vec![(source, 2)]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, canonical);
}

//! Unit tests for the score file writer

use std::fs;
use tempfile::TempDir;
use walletpoints::models::{PointRow, ScoredWallet};
use walletpoints::sources::{write_rows, Table};
use walletpoints::PipelineError;

#[test]
fn test_writes_header_and_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/out/scores.csv");
    let rows = vec![
        ScoredWallet {
            wallet: "A".to_string(),
            point: 3229.5,
        },
        ScoredWallet {
            wallet: "钱包".to_string(),
            point: 10.0,
        },
    ];

    write_rows(&path, &rows, false).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "wallet_address,point\nA,3229.5\n钱包,10.0\n");
}

#[test]
fn test_bom_prefix() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("merged.csv");
    write_rows(&path, &[PointRow::new("A", "1")], true).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBFwallet_address,point\n"));
}

#[test]
fn test_unsupported_output_extension_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.xls");
    let err = write_rows(&path, &[PointRow::new("A", "1")], false).unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn test_workbook_scores_read_back_exactly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("output/photon_point.xlsx");
    let rows = vec![
        ScoredWallet {
            wallet: "A".to_string(),
            point: 3256.7219910027993,
        },
        ScoredWallet {
            wallet: "钱包".to_string(),
            point: 10.0,
        },
    ];

    write_rows(&path, &rows, true).unwrap();
    let table = Table::load(&path).unwrap();
    assert_eq!(table.headers(), &["wallet_address", "point"]);
    assert_eq!(table.len(), 2);

    let read: Vec<(String, f64)> = table
        .rows()
        .map(|r| (r[0].to_string(), r[1].parse::<f64>().unwrap()))
        .collect();
    assert_eq!(
        read,
        vec![
            ("A".to_string(), 3256.7219910027993),
            ("钱包".to_string(), 10.0),
        ]
    );
}

#[test]
fn test_workbook_point_rows_keep_invalid_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("merged.xlsx");
    let rows = vec![
        PointRow::new("A", "1.5"),
        PointRow::new("B", "n/a"),
        PointRow::new("C", ""),
    ];

    write_rows(&path, &rows, false).unwrap();
    let table = Table::load(&path).unwrap();
    let cells: Vec<(String, String)> = table
        .rows()
        .map(|r| (r[0].to_string(), r.get(1).unwrap_or("").to_string()))
        .collect();
    assert_eq!(
        cells,
        vec![
            ("A".to_string(), "1.5".to_string()),
            ("B".to_string(), "n/a".to_string()),
            ("C".to_string(), "".to_string()),
        ]
    );
}

//! Unit tests for format detection

use std::path::Path;
use walletpoints::sources::TableFormat;
use walletpoints::PipelineError;

#[test]
fn test_detects_csv_and_tsv_case_insensitively() {
    assert_eq!(
        TableFormat::from_path(Path::new("data/photon.csv")).unwrap(),
        TableFormat::Csv
    );
    assert_eq!(
        TableFormat::from_path(Path::new("DATA.CSV")).unwrap(),
        TableFormat::Csv
    );
    assert_eq!(
        TableFormat::from_path(Path::new("export.tsv")).unwrap(),
        TableFormat::Tsv
    );
}

#[test]
fn test_detects_xlsx_workbooks() {
    let format = TableFormat::from_path(Path::new("output/photon_point.XLSX")).unwrap();
    assert_eq!(format, TableFormat::Xlsx);
    assert_eq!(format.delimiter(), None);
    assert_eq!(TableFormat::Csv.delimiter(), Some(b','));
    assert_eq!(TableFormat::Tsv.delimiter(), Some(b'\t'));
}

#[test]
fn test_rejects_legacy_workbooks_and_missing_extension() {
    for name in ["legacy.xls", "sheet.ods", "noext"] {
        let err = TableFormat::from_path(Path::new(name)).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)), "{}", name);
        assert_eq!(err.exit_code(), 3);
    }
}

//! Unit tests for raw trade export loading

use crate::common_fixtures::{trade_export, write_file};
use tempfile::TempDir;
use walletpoints::config::ColumnMapping;
use walletpoints::models::TradeRecord;
use walletpoints::sources::load_trades;
use walletpoints::PipelineError;

#[test]
fn test_drops_and_counts_malformed_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "photon.csv",
        &trade_export(&[
            ("A", "500", "-20"),
            ("B", "abc", "10"),
            ("C", "300", ""),
            ("", "900", "1"),
            ("D", "150.5", "7"),
        ]),
    );

    let load = load_trades(&path, &ColumnMapping::default()).unwrap();
    assert_eq!(load.rows_read, 5);
    assert_eq!(load.dropped_non_numeric, 2);
    assert_eq!(load.dropped_empty_wallet, 1);
    assert_eq!(load.dropped(), 3);
    assert_eq!(
        load.records,
        vec![
            TradeRecord::new("A", 500.0, -20.0),
            TradeRecord::new("D", 150.5, 7.0),
        ]
    );
}

#[test]
fn test_custom_column_mapping_ignores_extra_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "gmgn.csv",
        "address,chain,vol,pnl\n0xabc,sol,1000,-5\n",
    );
    let columns = ColumnMapping {
        wallet: "address".to_string(),
        volume: "vol".to_string(),
        pnl: "pnl".to_string(),
    };

    let load = load_trades(&path, &columns).unwrap();
    assert_eq!(load.records, vec![TradeRecord::new("0xabc", 1000.0, -5.0)]);
}

#[test]
fn test_missing_columns_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "photon.csv", "user,totalVolumeUSD\nA,500\n");

    let err = load_trades(&path, &ColumnMapping::default()).unwrap_err();
    match err {
        PipelineError::Schema { ref missing, .. } => {
            assert_eq!(missing, &vec!["netPnLUSD".to_string()]);
        }
        ref other => panic!("expected schema error, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 4);
}

//! Shared helpers for writing input files into temporary directories

use std::fs;
use std::path::{Path, PathBuf};

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

pub fn trade_export(rows: &[(&str, &str, &str)]) -> String {
    let mut out = String::from("user,totalVolumeUSD,netPnLUSD\n");
    for (wallet, volume, pnl) in rows {
        out.push_str(&format!("{},{},{}\n", wallet, volume, pnl));
    }
    out
}

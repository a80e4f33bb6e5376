//! Reading and writing tabular files.

pub mod format;
pub mod parser;
pub mod sink;
pub mod table;
pub mod trades;

pub use format::TableFormat;
pub use parser::{parse_f64, parse_optional_f64};
pub use sink::{check_output_path, write_rows, SheetCell, SheetRow};
pub use table::Table;
pub use trades::{load_trades, TradeLoad};

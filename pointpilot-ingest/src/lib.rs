//! pointpilot-ingest: flat-file adapters for transactions and reports.

pub mod amex;
pub mod amount;
pub mod reader;
pub mod writer;

pub use amex::read_amex_csv;
pub use reader::{ReaderOptions, read_transactions, read_transactions_csv};
pub use writer::{ScoredRow, write_csv, write_json, write_scored_csv};

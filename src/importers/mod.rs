// Import module - trade ledger readers

pub mod ledger_csv;

pub use ledger_csv::{parse_ledger_csv, parse_ledger_reader};

/// One ledger row as text, before any date or amount parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    /// Line number in the source file (header is line 1)
    pub row: usize,
    pub stock_name: String,
    pub quantity: String,
    pub buy_date: String,
    pub buy_price: String,
    pub buy_value: String,
    pub sell_date: String,
    pub sell_price: String,
    pub sell_value: String,
    pub realised_pnl: String,
}

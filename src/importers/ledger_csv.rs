use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::LedgerRow;
use crate::error::LedgerError;

/// Parse a broker P&L export (one row per closed or open lot)
pub fn parse_ledger_csv<P: AsRef<Path>>(file_path: P, delimiter: u8) -> Result<Vec<LedgerRow>> {
    let path = file_path.as_ref();
    info!("Parsing ledger CSV file: {:?}", path);

    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    parse_ledger_reader(file, delimiter)
}

/// Parse ledger rows from any reader
pub fn parse_ledger_reader<R: Read>(source: R, delimiter: u8) -> Result<Vec<LedgerRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true) // Allow variable number of columns
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(LedgerError::from)
        .context("Failed to read CSV headers")?
        .clone();

    debug!("CSV headers: {:?}", headers);

    let mapping = find_columns(&headers)?;
    debug!("Column mapping: {:?}", mapping);

    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(LedgerError::from)
            .context("Failed to read CSV record")?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        rows.push(mapping.row(&record, line));
    }

    info!("Read {} ledger rows", rows.len());
    Ok(rows)
}

#[derive(Debug)]
struct ColumnMapping {
    stock_name: usize,
    quantity: usize,
    buy_date: usize,
    buy_price: usize,
    buy_value: usize,
    sell_date: usize,
    sell_price: usize,
    sell_value: usize,
    realised_pnl: usize,
}

impl ColumnMapping {
    fn row(&self, record: &StringRecord, line: usize) -> LedgerRow {
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

        LedgerRow {
            row: line,
            stock_name: field(self.stock_name),
            quantity: field(self.quantity),
            buy_date: field(self.buy_date),
            buy_price: field(self.buy_price),
            buy_value: field(self.buy_value),
            sell_date: field(self.sell_date),
            sell_price: field(self.sell_price),
            sell_value: field(self.sell_value),
            realised_pnl: field(self.realised_pnl),
        }
    }
}

/// Lowercase, drop a BOM and collapse inner whitespace
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn find_column(headers: &[String], name: &str, aliases: &[&str]) -> Result<usize> {
    let wanted = normalize_header(name);
    headers
        .iter()
        .position(|h| *h == wanted || aliases.contains(&h.as_str()))
        .ok_or_else(|| LedgerError::MissingColumn(name.to_string()).into())
}

fn find_columns(headers: &StringRecord) -> Result<ColumnMapping> {
    let headers: Vec<String> = headers.iter().map(normalize_header).collect();

    Ok(ColumnMapping {
        stock_name: find_column(&headers, "Stock name", &["symbol", "scrip", "stock"])?,
        quantity: find_column(&headers, "Quantity", &["qty"])?,
        buy_date: find_column(&headers, "Buy date", &[])?,
        buy_price: find_column(&headers, "Buy price", &[])?,
        buy_value: find_column(&headers, "Buy value", &[])?,
        sell_date: find_column(&headers, "Sell date", &[])?,
        sell_price: find_column(&headers, "Sell price", &[])?,
        sell_value: find_column(&headers, "Sell value", &[])?,
        realised_pnl: find_column(
            &headers,
            "Realised P&L",
            &["realized p&l", "realised pnl", "realized pnl", "p&l"],
        )?,
    })
}

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::importers::LedgerRow;

/// Day-first date shapes, tried in order
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d-%B-%Y", "%d %B %Y", "%Y-%m-%d", "%d/%m/%y",
    "%d-%m-%y", "%d-%B-%y",
];

/// Same shapes with a trailing time component
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A sold position with parsed dates and amounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedTrade {
    /// Line number in the source file (header is line 1)
    pub row: usize,
    pub stock_name: String,
    pub quantity: Option<Decimal>,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub buy_value: Decimal,
    pub sell_value: Decimal,
    pub realised_pnl: Decimal,
}

impl CompletedTrade {
    pub fn holding_days(&self) -> i64 {
        (self.sell_date - self.buy_date).num_days()
    }
}

/// What was wrong with a row that had to be left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyKind {
    UnparseableSellDate { value: String },
    UnparseableBuyDate { value: String },
    SellBeforeBuy { buy_date: NaiveDate, sell_date: NaiveDate },
    InvalidAmount { column: &'static str, value: String },
}

/// A row excluded from aggregation because of a data-quality problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub row: usize,
    pub stock_name: String,
    #[serde(flatten)]
    pub kind: AnomalyKind,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} ({}): ", self.row, self.stock_name)?;
        match &self.kind {
            AnomalyKind::UnparseableSellDate { value } => {
                write!(f, "sell date '{}' could not be parsed", value)
            }
            AnomalyKind::UnparseableBuyDate { value } if value.is_empty() => {
                write!(f, "buy date is missing on a sold trade")
            }
            AnomalyKind::UnparseableBuyDate { value } => {
                write!(f, "buy date '{}' could not be parsed", value)
            }
            AnomalyKind::SellBeforeBuy {
                buy_date,
                sell_date,
            } => write!(f, "sold on {} before it was bought on {}", sell_date, buy_date),
            AnomalyKind::InvalidAmount { column, value } => {
                write!(f, "{} '{}' is not a number", column, value)
            }
        }
    }
}

/// Output of the normalizer: the working set plus everything left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedLedger {
    pub trades: Vec<CompletedTrade>,
    pub anomalies: Vec<Anomaly>,
    /// Rows without a sell date
    pub open_positions: usize,
}

enum RowOutcome {
    Completed(CompletedTrade),
    Open,
    Rejected(AnomalyKind),
}

/// Parse a day-first date; `None` when the text is empty or not a date.
pub fn parse_day_first(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // %Y happily reads "24" as year 24, so anything before 1900 is a miss
    let plausible = |d: &NaiveDate| d.year() >= 1900;

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            if plausible(&date) {
                return Some(date);
            }
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            if plausible(&dt.date()) {
                return Some(dt.date());
            }
        }
    }

    None
}

/// Parse a monetary cell. Blank cells (and a lone "-") count as zero.
///
/// Thousands separators, rupee marks and whitespace are ignored; accounting
/// parentheses mean a negative amount.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(Decimal::ZERO);
    }

    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .replace("INR", "")
        .replace("Rs.", "")
        .replace('₹', "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .with_context(|| format!("invalid amount: {}", text))?;

    Ok(if negative { -value } else { value })
}

/// Parse dates and amounts, dropping open positions and anomalous rows.
pub fn normalize(rows: &[LedgerRow]) -> NormalizedLedger {
    let mut ledger = NormalizedLedger::default();

    for row in rows {
        match normalize_row(row) {
            RowOutcome::Completed(trade) => ledger.trades.push(trade),
            RowOutcome::Open => {
                debug!("Row {} ({}) is an open position", row.row, row.stock_name);
                ledger.open_positions += 1;
            }
            RowOutcome::Rejected(kind) => {
                let anomaly = Anomaly {
                    row: row.row,
                    stock_name: row.stock_name.clone(),
                    kind,
                };
                warn!("Excluding {}", anomaly);
                ledger.anomalies.push(anomaly);
            }
        }
    }

    ledger
}

fn normalize_row(row: &LedgerRow) -> RowOutcome {
    if row.sell_date.trim().is_empty() {
        return RowOutcome::Open;
    }

    let Some(sell_date) = parse_day_first(&row.sell_date) else {
        return RowOutcome::Rejected(AnomalyKind::UnparseableSellDate {
            value: row.sell_date.trim().to_string(),
        });
    };

    let Some(buy_date) = parse_day_first(&row.buy_date) else {
        return RowOutcome::Rejected(AnomalyKind::UnparseableBuyDate {
            value: row.buy_date.trim().to_string(),
        });
    };

    if sell_date < buy_date {
        return RowOutcome::Rejected(AnomalyKind::SellBeforeBuy {
            buy_date,
            sell_date,
        });
    }

    let amount = |column: &'static str, value: &str| {
        parse_amount(value).map_err(|_| AnomalyKind::InvalidAmount {
            column,
            value: value.trim().to_string(),
        })
    };

    let amounts = amount("Buy value", &row.buy_value).and_then(|buy| {
        let sell = amount("Sell value", &row.sell_value)?;
        let pnl = amount("Realised P&L", &row.realised_pnl)?;
        Ok((buy, sell, pnl))
    });

    let (buy_value, sell_value, realised_pnl) = match amounts {
        Ok(values) => values,
        Err(kind) => return RowOutcome::Rejected(kind),
    };

    let quantity = match row.quantity.trim() {
        "" => None,
        text => parse_amount(text).ok(),
    };

    RowOutcome::Completed(CompletedTrade {
        row: row.row,
        stock_name: row.stock_name.clone(),
        quantity,
        buy_date,
        sell_date,
        buy_value,
        sell_value,
        realised_pnl,
    })
}

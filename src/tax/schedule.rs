use serde::Serialize;
use tracing::{info, warn};

use super::aggregate::{aggregate, CapitalGainsSummary, GainTotals, QuarterTable};
use super::classify::{classify_all, RatePeriod};
use super::normalize::{normalize, Anomaly};
use super::tax_year::{fy_label, start_year_of, TaxYear};
use crate::importers::LedgerRow;

/// Everything one run over a ledger produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub tax_year: TaxYear,
    pub summary: CapitalGainsSummary,
    /// Table F, short-term gains sold before the rate cutoff
    pub quarters_before_cutoff: QuarterTable,
    /// Table F, short-term gains sold on or after the rate cutoff
    pub quarters_after_cutoff: QuarterTable,
    pub totals: GainTotals,
    pub anomalies: Vec<Anomaly>,
    pub open_positions: usize,
    pub trades_classified: usize,
    /// Sales dated outside the financial year (still aggregated)
    pub out_of_year_sales: usize,
}

impl ScheduleReport {
    pub fn quarter_table(&self, period: RatePeriod) -> &QuarterTable {
        match period {
            RatePeriod::BeforeCutoff => &self.quarters_before_cutoff,
            RatePeriod::AfterCutoff => &self.quarters_after_cutoff,
        }
    }
}

/// Run the ledger rows through normalize, classify and aggregate.
pub fn build_schedule(rows: &[LedgerRow], tax_year: &TaxYear) -> ScheduleReport {
    info!(
        "Building capital gains schedule for {} from {} rows",
        tax_year.label(),
        rows.len()
    );

    let ledger = normalize(rows);

    let out_of_year_sales = ledger
        .trades
        .iter()
        .filter(|t| !tax_year.contains(t.sell_date))
        .inspect(|t| {
            warn!(
                "Row {} ({}) was sold on {}, which belongs to {} not {}",
                t.row,
                t.stock_name,
                t.sell_date,
                fy_label(start_year_of(t.sell_date)),
                tax_year.label()
            )
        })
        .count();

    let classified = classify_all(ledger.trades, tax_year);
    let trades_classified = classified.len();
    let aggregated = aggregate(&classified);
    let totals = aggregated.totals();

    info!(
        "Classified {} trades ({} open, {} excluded)",
        trades_classified,
        ledger.open_positions,
        ledger.anomalies.len()
    );

    ScheduleReport {
        tax_year: *tax_year,
        summary: aggregated.summary,
        quarters_before_cutoff: aggregated.quarters_before_cutoff,
        quarters_after_cutoff: aggregated.quarters_after_cutoff,
        totals,
        anomalies: ledger.anomalies,
        open_positions: ledger.open_positions,
        trades_classified,
        out_of_year_sales,
    }
}

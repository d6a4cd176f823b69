use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::classify::{ClassifiedTrade, GainType, RatePeriod, TaxQuarter};

/// Sums over a subset of trades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryBucket {
    pub total_sell_value: Decimal,
    pub total_buy_value: Decimal,
    pub total_gain: Decimal,
}

impl SummaryBucket {
    fn add(&mut self, trade: &ClassifiedTrade) {
        self.total_sell_value += trade.trade.sell_value;
        self.total_buy_value += trade.trade.buy_value;
        self.total_gain += trade.trade.realised_pnl;
    }
}

/// Key of a row in the capital gains summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SummaryKey {
    #[serde(rename = "STCG_Before_Cutoff")]
    StcgBeforeCutoff,
    #[serde(rename = "STCG_After_Cutoff")]
    StcgAfterCutoff,
    #[serde(rename = "LTCG")]
    Ltcg,
}

impl SummaryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKey::StcgBeforeCutoff => "STCG_Before_Cutoff",
            SummaryKey::StcgAfterCutoff => "STCG_After_Cutoff",
            SummaryKey::Ltcg => "LTCG",
        }
    }
}

impl fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three summary buckets. Always present, zero when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CapitalGainsSummary {
    #[serde(rename = "STCG_Before_Cutoff")]
    pub stcg_before_cutoff: SummaryBucket,
    #[serde(rename = "STCG_After_Cutoff")]
    pub stcg_after_cutoff: SummaryBucket,
    #[serde(rename = "LTCG")]
    pub ltcg: SummaryBucket,
}

impl CapitalGainsSummary {
    /// Buckets in return order
    pub fn buckets(&self) -> [(SummaryKey, &SummaryBucket); 3] {
        [
            (SummaryKey::StcgBeforeCutoff, &self.stcg_before_cutoff),
            (SummaryKey::StcgAfterCutoff, &self.stcg_after_cutoff),
            (SummaryKey::Ltcg, &self.ltcg),
        ]
    }
}

/// Realised P&L per advance-tax quarter; only quarters with trades appear
pub type QuarterTable = BTreeMap<TaxQuarter, Decimal>;

/// Raw gain totals handed to the caller for the BFLA cross-check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GainTotals {
    pub stcg_before_cutoff: Decimal,
    pub stcg_after_cutoff: Decimal,
    pub ltcg: Decimal,
}

impl GainTotals {
    pub fn combined(&self) -> Decimal {
        self.stcg_before_cutoff + self.stcg_after_cutoff + self.ltcg
    }
}

/// Aggregated schedule: summary buckets and one quarter table per rate period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub summary: CapitalGainsSummary,
    pub quarters_before_cutoff: QuarterTable,
    pub quarters_after_cutoff: QuarterTable,
}

impl ScheduleSummary {
    pub fn totals(&self) -> GainTotals {
        GainTotals {
            stcg_before_cutoff: self.summary.stcg_before_cutoff.total_gain,
            stcg_after_cutoff: self.summary.stcg_after_cutoff.total_gain,
            ltcg: self.summary.ltcg.total_gain,
        }
    }
}

/// Fold classified trades into the summary and quarter tables in one pass.
pub fn aggregate(trades: &[ClassifiedTrade]) -> ScheduleSummary {
    trades
        .iter()
        .fold(ScheduleSummary::default(), |mut acc, trade| {
            let tags = &trade.classification;

            match (tags.gain_type, tags.rate_period) {
                (GainType::Ltcg, _) => acc.summary.ltcg.add(trade),
                (GainType::Stcg, Some(RatePeriod::BeforeCutoff)) => {
                    acc.summary.stcg_before_cutoff.add(trade);
                    *acc.quarters_before_cutoff
                        .entry(tags.tax_quarter)
                        .or_insert(Decimal::ZERO) += trade.trade.realised_pnl;
                }
                (GainType::Stcg, Some(RatePeriod::AfterCutoff)) => {
                    acc.summary.stcg_after_cutoff.add(trade);
                    *acc.quarters_after_cutoff
                        .entry(tags.tax_quarter)
                        .or_insert(Decimal::ZERO) += trade.trade.realised_pnl;
                }
                // classify never leaves a short-term trade without a period
                (GainType::Stcg, None) => {}
            }

            acc
        })
}

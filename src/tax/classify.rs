use serde::Serialize;
use std::fmt;

use super::normalize::CompletedTrade;
use super::tax_year::TaxYear;

/// Capital gain category by holding period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GainType {
    #[serde(rename = "STCG")]
    Stcg,
    #[serde(rename = "LTCG")]
    Ltcg,
}

impl GainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GainType::Stcg => "STCG",
            GainType::Ltcg => "LTCG",
        }
    }
}

impl fmt::Display for GainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-term sub-period relative to the rate cutoff date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatePeriod {
    #[serde(rename = "Before_Cutoff")]
    BeforeCutoff,
    #[serde(rename = "After_Cutoff")]
    AfterCutoff,
}

impl RatePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatePeriod::BeforeCutoff => "Before_Cutoff",
            RatePeriod::AfterCutoff => "After_Cutoff",
        }
    }
}

impl fmt::Display for RatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advance-tax period of the financial year, in chronological order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TaxQuarter {
    #[serde(rename = "Upto 15/6")]
    UptoJun15,
    #[serde(rename = "16/6-15/9")]
    Jun16ToSep15,
    #[serde(rename = "16/9-15/12")]
    Sep16ToDec15,
    #[serde(rename = "16/12-15/3")]
    Dec16ToMar15,
    #[serde(rename = "16/3-31/3")]
    Mar16ToMar31,
}

impl TaxQuarter {
    pub const ALL: [TaxQuarter; 5] = [
        TaxQuarter::UptoJun15,
        TaxQuarter::Jun16ToSep15,
        TaxQuarter::Sep16ToDec15,
        TaxQuarter::Dec16ToMar15,
        TaxQuarter::Mar16ToMar31,
    ];

    /// Column label as printed on the return
    pub fn label(&self) -> &'static str {
        match self {
            TaxQuarter::UptoJun15 => "Upto 15/6",
            TaxQuarter::Jun16ToSep15 => "16/6-15/9",
            TaxQuarter::Sep16ToDec15 => "16/9-15/12",
            TaxQuarter::Dec16ToMar15 => "16/12-15/3",
            TaxQuarter::Mar16ToMar31 => "16/3-31/3",
        }
    }
}

impl fmt::Display for TaxQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tags derived for one completed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub gain_type: GainType,
    /// Only set for short-term gains
    pub rate_period: Option<RatePeriod>,
    pub tax_quarter: TaxQuarter,
}

/// A completed trade together with its tags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTrade {
    pub trade: CompletedTrade,
    pub classification: Classification,
}

/// Classify a completed trade by holding period, rate period and quarter.
pub fn classify(trade: &CompletedTrade, tax_year: &TaxYear) -> Classification {
    let gain_type = if trade.holding_days() < tax_year.long_term_days() {
        GainType::Stcg
    } else {
        GainType::Ltcg
    };

    let rate_period = match gain_type {
        GainType::Stcg if trade.sell_date < tax_year.rate_cutoff() => Some(RatePeriod::BeforeCutoff),
        GainType::Stcg => Some(RatePeriod::AfterCutoff),
        GainType::Ltcg => None,
    };

    Classification {
        gain_type,
        rate_period,
        tax_quarter: tax_year.quarter_for(trade.sell_date),
    }
}

/// Classify every trade, keeping input order
pub fn classify_all(trades: Vec<CompletedTrade>, tax_year: &TaxYear) -> Vec<ClassifiedTrade> {
    trades
        .into_iter()
        .map(|trade| {
            let classification = classify(&trade, tax_year);
            ClassifiedTrade {
                trade,
                classification,
            }
        })
        .collect()
}

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::classify::TaxQuarter;
use crate::error::LedgerError;

/// Holding period (in days) at which a gain becomes long term
pub const DEFAULT_LONG_TERM_DAYS: i64 = 365;

/// Day of July on which the short-term rate changed (Finance Act 2024)
const RATE_CUTOFF_DAY_OF_JULY: u32 = 23;

/// Indian financial year (1 April to 31 March) with its classification dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxYear {
    start_year: i32,
    rate_cutoff: NaiveDate,
    long_term_days: i64,
    /// Last day of the first four advance-tax quarters (inclusive)
    #[serde(skip)]
    quarter_ends: [NaiveDate; 4],
    #[serde(skip)]
    start: NaiveDate,
    #[serde(skip)]
    end: NaiveDate,
}

impl TaxYear {
    /// Build a financial year starting on 1 April of `start_year`.
    ///
    /// The rate cutoff has to fall inside the year and the long-term
    /// threshold has to be positive.
    pub fn new(start_year: i32, rate_cutoff: NaiveDate, long_term_days: i64) -> Result<Self> {
        let start = ymd(start_year, 4, 1)?;
        let end = ymd(start_year + 1, 3, 31)?;

        if rate_cutoff < start || rate_cutoff > end {
            return Err(LedgerError::Config(format!(
                "rate cutoff {} is outside {} ({} to {})",
                rate_cutoff,
                fy_label(start_year),
                start,
                end
            ))
            .into());
        }

        if long_term_days <= 0 {
            return Err(LedgerError::Config(format!(
                "long_term_days must be positive, got {}",
                long_term_days
            ))
            .into());
        }

        let quarter_ends = [
            ymd(start_year, 6, 15)?,
            ymd(start_year, 9, 15)?,
            ymd(start_year, 12, 15)?,
            ymd(start_year + 1, 3, 15)?,
        ];

        Ok(Self {
            start_year,
            rate_cutoff,
            long_term_days,
            quarter_ends,
            start,
            end,
        })
    }

    /// Financial year with the default cutoff (23 July) and 365-day threshold
    pub fn for_start_year(start_year: i32) -> Result<Self> {
        let cutoff = ymd(start_year, 7, RATE_CUTOFF_DAY_OF_JULY)?;
        Self::new(start_year, cutoff, DEFAULT_LONG_TERM_DAYS)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn rate_cutoff(&self) -> NaiveDate {
        self.rate_cutoff
    }

    pub fn long_term_days(&self) -> i64 {
        self.long_term_days
    }

    /// First day of the year (1 April)
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the year (31 March)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// "FY 2024-25"
    pub fn label(&self) -> String {
        fy_label(self.start_year)
    }

    /// Advance-tax quarter of a sale date.
    ///
    /// Each boundary is inclusive to the earlier quarter; anything after
    /// 15 March lands in the final catch-all quarter.
    pub fn quarter_for(&self, sell_date: NaiveDate) -> TaxQuarter {
        let [q1, q2, q3, q4] = self.quarter_ends;
        if sell_date <= q1 {
            TaxQuarter::UptoJun15
        } else if sell_date <= q2 {
            TaxQuarter::Jun16ToSep15
        } else if sell_date <= q3 {
            TaxQuarter::Sep16ToDec15
        } else if sell_date <= q4 {
            TaxQuarter::Dec16ToMar15
        } else {
            TaxQuarter::Mar16ToMar31
        }
    }
}

/// "FY 2024-25" for a start year
pub fn fy_label(start_year: i32) -> String {
    format!("FY {}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        LedgerError::Config(format!("invalid date {:04}-{:02}-{:02}", year, month, day)).into()
    })
}

/// Financial year a date belongs to, as its start year
pub fn start_year_of(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_cutoff_is_23_july() {
        let fy = TaxYear::for_start_year(2024).unwrap();
        assert_eq!(fy.rate_cutoff(), date(2024, 7, 23));
        assert_eq!(fy.long_term_days(), 365);
        assert_eq!(fy.start(), date(2024, 4, 1));
        assert_eq!(fy.end(), date(2025, 3, 31));
        assert_eq!(fy.label(), "FY 2024-25");
    }

    #[test]
    fn test_label_wraps_century() {
        let fy = TaxYear::for_start_year(2099).unwrap();
        assert_eq!(fy.label(), "FY 2099-00");
    }

    #[test]
    fn test_quarter_boundaries_are_inclusive_to_earlier_quarter() {
        let fy = TaxYear::for_start_year(2024).unwrap();
        assert_eq!(fy.quarter_for(date(2024, 6, 15)), TaxQuarter::UptoJun15);
        assert_eq!(fy.quarter_for(date(2024, 6, 16)), TaxQuarter::Jun16ToSep15);
        assert_eq!(fy.quarter_for(date(2024, 9, 15)), TaxQuarter::Jun16ToSep15);
        assert_eq!(fy.quarter_for(date(2024, 9, 16)), TaxQuarter::Sep16ToDec15);
        assert_eq!(fy.quarter_for(date(2024, 12, 15)), TaxQuarter::Sep16ToDec15);
        assert_eq!(fy.quarter_for(date(2024, 12, 16)), TaxQuarter::Dec16ToMar15);
        assert_eq!(fy.quarter_for(date(2025, 3, 15)), TaxQuarter::Dec16ToMar15);
        assert_eq!(fy.quarter_for(date(2025, 3, 16)), TaxQuarter::Mar16ToMar31);
        assert_eq!(fy.quarter_for(date(2025, 3, 31)), TaxQuarter::Mar16ToMar31);
    }

    #[test]
    fn test_out_of_year_dates_fall_into_edge_quarters() {
        let fy = TaxYear::for_start_year(2024).unwrap();
        assert_eq!(fy.quarter_for(date(2024, 1, 10)), TaxQuarter::UptoJun15);
        assert_eq!(fy.quarter_for(date(2025, 5, 2)), TaxQuarter::Mar16ToMar31);
        assert!(!fy.contains(date(2025, 5, 2)));
        assert!(fy.contains(date(2025, 3, 31)));
    }

    #[test]
    fn test_cutoff_outside_year_is_rejected() {
        let err = TaxYear::new(2024, date(2025, 7, 23), 365).unwrap_err();
        assert!(err.to_string().contains("outside FY 2024-25"));
    }

    #[test]
    fn test_non_positive_threshold_is_rejected() {
        assert!(TaxYear::new(2024, date(2024, 7, 23), 0).is_err());
    }

    #[test]
    fn test_start_year_of() {
        assert_eq!(start_year_of(date(2024, 4, 1)), 2024);
        assert_eq!(start_year_of(date(2025, 3, 31)), 2024);
    }
}

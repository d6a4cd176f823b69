// Tax module - capital gains classification and schedule aggregation

pub mod aggregate;
pub mod classify;
pub mod normalize;
pub mod schedule;
pub mod tax_year;

pub use aggregate::{
    aggregate, CapitalGainsSummary, GainTotals, QuarterTable, ScheduleSummary, SummaryBucket,
    SummaryKey,
};
pub use classify::{classify, classify_all, Classification, ClassifiedTrade, GainType, RatePeriod, TaxQuarter};
pub use normalize::{normalize, parse_amount, parse_day_first, Anomaly, AnomalyKind, CompletedTrade, NormalizedLedger};
pub use schedule::{build_schedule, ScheduleReport};
pub use tax_year::TaxYear;

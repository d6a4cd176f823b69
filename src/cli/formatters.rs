//! Output formatting module for CLI display
//!
//! Keeps presentation apart from the schedule calculation: the tax module
//! hands over a `ScheduleReport`, these functions turn it into text.

use capgains::config::RateLabels;
use capgains::tax::{QuarterTable, RatePeriod, ScheduleReport};
use capgains::utils::{format_amount, format_currency};
use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

/// Format a schedule report for JSON output
pub fn format_schedule_json(report: &ScheduleReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

fn colored_gain(value: Decimal) -> String {
    let text = format_amount(value);
    if value >= Decimal::ZERO {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format a schedule report for terminal output
pub fn format_schedule_table(report: &ScheduleReport, rates: &RateLabels) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} Capital Gains Schedule - {} (rate cutoff {})\n\n",
        "📊".cyan().bold(),
        report.tax_year.label(),
        report.tax_year.rate_cutoff().format("%d/%m/%Y")
    ));

    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "Bucket")]
        bucket: String,
        #[tabled(rename = "Sell Value")]
        sell_value: String,
        #[tabled(rename = "Buy Value")]
        buy_value: String,
        #[tabled(rename = "Gain")]
        gain: String,
    }

    let rows: Vec<SummaryRow> = report
        .summary
        .buckets()
        .iter()
        .map(|(key, bucket)| SummaryRow {
            bucket: key.to_string(),
            sell_value: format_amount(bucket.total_sell_value),
            buy_value: format_amount(bucket.total_buy_value),
            gain: colored_gain(bucket.total_gain),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());

    for (period, rate) in [
        (RatePeriod::BeforeCutoff, &rates.before_cutoff),
        (RatePeriod::AfterCutoff, &rates.after_cutoff),
    ] {
        output.push_str(&format!("\n\n{} Table F ({}%)\n", "▸".cyan(), rate));
        output.push_str(&format_quarter_table(report.quarter_table(period)));
    }

    output.push_str(&format!("\n\n{} Totals for BFLA", "━".repeat(60).bright_black()));
    output.push_str(&format!(
        "\n{:<22} {}",
        format!("{}% Gain Total:", rates.before_cutoff).bold(),
        format_currency(report.totals.stcg_before_cutoff)
    ));
    output.push_str(&format!(
        "\n{:<22} {}",
        format!("{}% Gain Total:", rates.after_cutoff).bold(),
        format_currency(report.totals.stcg_after_cutoff)
    ));
    output.push_str(&format!(
        "\n{:<22} {}\n",
        "LTCG Total:".bold(),
        format_currency(report.totals.ltcg)
    ));

    output.push_str(&format!(
        "\nTrades: {} classified, {} open\n",
        report.trades_classified, report.open_positions
    ));

    if report.out_of_year_sales > 0 {
        output.push_str(&format!(
            "{} {} sale(s) fall outside {}\n",
            "⚠".yellow().bold(),
            report.out_of_year_sales,
            report.tax_year.label()
        ));
    }

    if !report.anomalies.is_empty() {
        output.push_str(&format!(
            "\n{} {} row(s) excluded:\n",
            "⚠".yellow().bold(),
            report.anomalies.len()
        ));
        for anomaly in &report.anomalies {
            output.push_str(&format!("  - {}\n", anomaly));
        }
    }

    output
}

/// Quarter -> gain table, or a note when the table is empty
pub fn format_quarter_table(quarters: &QuarterTable) -> String {
    if quarters.is_empty() {
        return "No short-term sales in this period".to_string();
    }

    #[derive(Tabled)]
    struct QuarterRow {
        #[tabled(rename = "Quarter")]
        quarter: String,
        #[tabled(rename = "Gain")]
        gain: String,
    }

    let rows: Vec<QuarterRow> = quarters
        .iter()
        .map(|(quarter, gain)| QuarterRow {
            quarter: quarter.label().to_string(),
            gain: colored_gain(*gain),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

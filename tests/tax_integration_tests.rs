use anyhow::Result;
use capgains::importers::{parse_ledger_csv, parse_ledger_reader};
use capgains::tax::{
    build_schedule, AnomalyKind, QuarterTable, SummaryBucket, TaxQuarter, TaxYear,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const HEADER: &str =
    "Stock name,Quantity,Buy date,Buy price,Buy value,Sell date,Sell price,Sell value,Realised P&L";

fn fy_2024() -> TaxYear {
    TaxYear::for_start_year(2024).expect("valid tax year")
}

fn schedule_for(rows: &[&str]) -> Result<capgains::tax::ScheduleReport> {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    let ledger = parse_ledger_reader(csv.as_bytes(), b',')?;
    Ok(build_schedule(&ledger, &fy_2024()))
}

#[test]
fn test_stcg_sold_before_cutoff() -> Result<()> {
    let report = schedule_for(&["INFY,10,10/04/2024,100,1000,01/07/2024,120,1200,200"])?;

    assert_eq!(
        report.summary.stcg_before_cutoff,
        SummaryBucket {
            total_sell_value: dec!(1200),
            total_buy_value: dec!(1000),
            total_gain: dec!(200),
        }
    );
    assert_eq!(
        report.quarters_before_cutoff,
        QuarterTable::from([(TaxQuarter::Jun16ToSep15, dec!(200))])
    );
    Ok(())
}

#[test]
fn test_stcg_loss_sold_after_cutoff() -> Result<()> {
    let report = schedule_for(&["TCS,5,02/05/2024,100,500,01/08/2024,90,450,-50"])?;

    assert_eq!(report.summary.stcg_after_cutoff.total_gain, dec!(-50));
    assert_eq!(report.summary.ltcg, SummaryBucket::default());
    assert_eq!(report.totals.stcg_after_cutoff, dec!(-50));
    Ok(())
}

#[test]
fn test_holding_period_boundary() -> Result<()> {
    let report = schedule_for(&[
        // 365 days
        "SBIN,10,24/07/2023,100,1000,23/07/2024,110,1100,100",
        // 364 days
        "AXISBANK,20,25/07/2023,100,2000,23/07/2024,107.5,2150,150",
    ])?;

    assert_eq!(report.totals.ltcg, dec!(100));
    assert_eq!(report.totals.stcg_after_cutoff, dec!(150));
    assert_eq!(report.totals.stcg_before_cutoff, Decimal::ZERO);
    Ok(())
}

#[test]
fn test_sale_on_quarter_boundary_goes_to_earlier_quarter() -> Result<()> {
    let report = schedule_for(&["WIPRO,1,01/05/2024,10,10,15/06/2024,12,12,2"])?;

    assert_eq!(
        report.quarters_before_cutoff,
        QuarterTable::from([(TaxQuarter::UptoJun15, dec!(2))])
    );
    Ok(())
}

#[test]
fn test_gain_is_conserved() -> Result<()> {
    let rows = parse_ledger_csv("tests/data/sample_ledger.csv", b',')?;
    let report = build_schedule(&rows, &fy_2024());

    // Realised P&L of every row that made it through normalisation
    let expected = dec!(200) - dec!(50) + dec!(300) + dec!(100) + dec!(150) + dec!(250);
    let bucket_total: Decimal = report
        .summary
        .buckets()
        .iter()
        .map(|(_, bucket)| bucket.total_gain)
        .sum();

    assert_eq!(bucket_total, expected);
    assert_eq!(report.totals.combined(), expected);
    assert_eq!(report.trades_classified, 6);
    Ok(())
}

#[test]
fn test_bad_buy_date_is_flagged_not_summed() -> Result<()> {
    let report = schedule_for(&[
        "RELIANCE,2,??,10,20,01/09/2024,15,30,10",
        "INFY,10,10/04/2024,100,1000,01/07/2024,120,1200,200",
    ])?;

    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].stock_name, "RELIANCE");
    assert_eq!(
        report.anomalies[0].kind,
        AnomalyKind::UnparseableBuyDate {
            value: "??".to_string()
        }
    );
    assert_eq!(report.totals.combined(), dec!(200));
    Ok(())
}

#[test]
fn test_only_open_positions() -> Result<()> {
    let report = schedule_for(&["ITC,20,15/05/2024,35,700,,,,"])?;

    for (_, bucket) in report.summary.buckets() {
        assert_eq!(*bucket, SummaryBucket::default());
    }
    assert!(report.quarters_before_cutoff.is_empty());
    assert!(report.quarters_after_cutoff.is_empty());
    assert_eq!(report.open_positions, 1);
    Ok(())
}

#[test]
fn test_same_input_same_output() -> Result<()> {
    let rows = parse_ledger_csv("tests/data/sample_ledger.csv", b',')?;
    let first = build_schedule(&rows, &fy_2024());
    let second = build_schedule(&rows, &fy_2024());
    assert_eq!(first, second);
    Ok(())
}

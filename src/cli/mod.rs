use clap::Parser;
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "capgains")]
#[command(
    version,
    about = "Capital gains schedule (STCG/LTCG and advance-tax quarters) from a trade ledger"
)]
#[command(
    long_about = "Reads a broker P&L CSV export, classifies every sold lot as short or long term, splits short-term gains at the rate cutoff and sums them per advance-tax quarter, ready for Schedule CG, Table F and the BFLA cross-check."
)]
pub struct Cli {
    /// Path to the ledger CSV (Stock name, Quantity, Buy date, ... Realised P&L)
    pub file: PathBuf,

    /// Config file (defaults to <config dir>/capgains/config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Financial year by its starting year (e.g., 2024 for FY 2024-25)
    #[arg(long = "fy")]
    pub fy: Option<i32>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::try_parse_from([
            "capgains",
            "--fy",
            "2025",
            "--json",
            "--no-color",
            "-c",
            "my.toml",
            "trades.csv",
        ])
        .unwrap();

        assert_eq!(cli.file, PathBuf::from("trades.csv"));
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert_eq!(cli.fy, Some(2025));
        assert!(cli.json);
        assert!(cli.no_color);
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["capgains", "--json"]).is_err());
    }
}

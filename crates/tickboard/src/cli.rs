use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tickboard_core::TimeWindow;
use tickboard_warehouse::Lookback;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, value_enum, default_value_t = TraceLevel::Info, ignore_case = true, global = true)]
    pub trace: TraceLevel,

    /// JSON catalog of ticker symbols & descriptions (overrides TICKBOARD_CATALOG).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Workbook the fetched prices are exported to (overrides TICKBOARD_EXPORT).
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Skip the workbook export.
    #[arg(long, global = true, conflicts_with = "export")]
    pub no_export: bool,

    /// History requested per ticker: 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max.
    #[arg(long, global = true)]
    pub lookback: Option<Lookback>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the dashboard for the given tickers in the terminal.
    Show {
        /// Ticker symbols, e.g. AAPL MSFT.
        tickers: Vec<String>,

        /// Time window the prices are filtered to.
        #[arg(long, short, value_enum, default_value_t = WindowArg::Month)]
        window: WindowArg,

        /// Also chart revenue (close x volume) per ticker.
        #[arg(long)]
        volume: bool,

        /// Most recent rows shown in the price & revenue tables.
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },

    /// Fetch every catalog ticker and write the workbook export.
    Fetch,

    /// List the ticker catalog.
    Catalog,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowArg {
    Month,
    Year,
    FiveYears,
    All,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Month => TimeWindow::LastMonth,
            WindowArg::Year => TimeWindow::LastYear,
            WindowArg::FiveYears => TimeWindow::LastFiveYears,
            WindowArg::All => TimeWindow::All,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<TraceLevel> for Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Debug => Level::DEBUG,
            TraceLevel::Info => Level::INFO,
            TraceLevel::Warn => Level::WARN,
            TraceLevel::Error => Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from([
            "tickboard", "show", "AAPL", "MSFT", "--window", "five-years", "--volume", "--trace", "DEBUG",
        ]);
        assert_eq!(cli.trace, TraceLevel::Debug);
        match cli.command {
            Commands::Show {
                tickers,
                window,
                volume,
                rows,
            } => {
                assert_eq!(tickers, ["AAPL", "MSFT"]);
                assert_eq!(TimeWindow::from(window), TimeWindow::LastFiveYears);
                assert!(volume);
                assert_eq!(rows, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["tickboard", "fetch", "--lookback", "1y", "--no-export"]);
        assert_eq!(cli.lookback, Some(Lookback::OneYear));
        assert!(cli.no_export);

        assert!(Cli::try_parse_from(["tickboard", "fetch", "--lookback", "1w"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

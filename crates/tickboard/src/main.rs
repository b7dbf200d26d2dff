use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*};
use dotenv::dotenv;
use tickboard_core::Selection;
use tickboard_warehouse::{
    acquire, config::load_catalog, run_cycle, tui::fetch_pb, AcquisitionCache, Cycle, Settings,
    YahooFinance, SELECTION_PROMPT,
};
use tracing::{debug, info, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod render;

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    if subscriber::set_global_default(my_subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

/// Environment settings with the command line flags on top.
fn settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::from_env()?;
    if let Some(path) = &cli.catalog {
        settings.catalog = load_catalog(path)?;
    }
    if let Some(path) = &cli.export {
        settings.export = Some(path.clone());
    }
    if cli.no_export {
        settings.export = None;
    }
    if let Some(lookback) = cli.lookback {
        settings.lookback = lookback;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.trace.into());
    trace!("Command line input recorded: {cli:#?}");

    let settings = settings(&cli)?;

    // cli framework:
    // "> tickboard <COMMAND>"
    match &cli.command {
        // "> tickboard show AAPL MSFT --window year --volume"
        // one dashboard cycle, rendered to the terminal
        Show {
            tickers,
            window,
            volume,
            rows,
        } => {
            let selection = Selection::new(tickers, (*window).into(), *volume);
            let source = YahooFinance::new(&settings.user_agent)?;
            let mut cache = AcquisitionCache::new();
            let pb = fetch_pb(settings.catalog.len());

            match run_cycle(&source, &mut cache, &settings.acquire_key(), &selection, &pb).await {
                Cycle::AwaitingSelection => print!("{}", render::prompt(SELECTION_PROMPT)),
                Cycle::Ready(view) => {
                    debug!("rendering {} tickers", view.series.len());
                    print!("{}", render::dashboard(&view, *rows));
                }
            }
        }

        // "> tickboard fetch"
        // acquire the whole catalog & write the workbook
        Fetch => {
            let source = YahooFinance::new(&settings.user_agent)?;
            let pb = fetch_pb(settings.catalog.len());
            let data = acquire(
                &source,
                &settings.catalog,
                settings.export.as_deref(),
                settings.lookback,
                &pb,
            )
            .await;
            pb.finish_with_message("done");
            info!(
                "{} of {} tickers fetched over {}",
                data.len(),
                settings.catalog.len(),
                settings.lookback
            );
        }

        // "> tickboard catalog"
        Catalog => print!("{}", render::catalog(&settings.catalog)),
    }

    Ok(())
}

use crate::export::write_workbook;
use crate::lookback::Lookback;
use crate::yahoo::PriceSource;
use indicatif::ProgressBar;
use std::path::Path;
use tickboard_core::{Catalog, SeriesSet};
use tokio_stream::{self as stream, StreamExt};
use tracing::{debug, error, info, warn};

/// Fetch every catalog symbol's history over `lookback`, in catalog order.
///
/// Symbols the source has no data for (or fails on) are logged and left out;
/// the rest of the batch carries on. When `export` is given, everything fetched
/// is written to that workbook in one pass.
pub async fn acquire<S: PriceSource>(
    source: &S,
    catalog: &Catalog,
    export: Option<&Path>,
    lookback: Lookback,
    pb: &ProgressBar,
) -> SeriesSet {
    let mut all_data = SeriesSet::new();

    let mut stream = stream::iter(catalog.entries());
    while let Some(entry) = stream.next().await {
        let (ticker, title) = (&entry.symbol, &entry.description);
        debug!("Loading data for [{ticker}] {title} ...");
        pb.set_message(ticker.clone());

        match source.history(ticker, lookback).await {
            Ok(Some(series)) if !series.is_empty() => {
                debug!("[{ticker}] {title} added ({} rows)", series.len());
                all_data.insert(ticker.clone(), series);
            }
            Ok(_) => info!("No data found for [{ticker}] {title}"),
            Err(e) => warn!("[{ticker}] {title} skipped, fetch failed: {e}"),
        }
        pb.inc(1);
    }

    if let Some(path) = export {
        match write_workbook(path, &all_data) {
            Ok(_) => info!("All data was saved to '{}'", path.display()),
            Err(e) => error!("Export to '{}' failed: {e}", path.display()),
        }
    }

    all_data
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tickboard_core::{Field, Series};

    /// In-memory source counting every request.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub(crate) data: HashMap<String, Series>,
        pub(crate) failing: Vec<String>,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn with(tickers: &[&str]) -> Self {
            let day = NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let data = tickers
                .iter()
                .map(|ticker| {
                    let series = Series::new(vec![day])
                        .unwrap()
                        .with_column(Field::Close, vec![Some(10.0)])
                        .unwrap()
                        .with_column(Field::Volume, vec![Some(5.0)])
                        .unwrap();
                    (ticker.to_string(), series)
                })
                .collect();
            Self {
                data,
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PriceSource for FakeSource {
        async fn history(&self, ticker: &str, _lookback: Lookback) -> Result<Option<Series>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|t| t == ticker) {
                anyhow::bail!("connection reset");
            }
            Ok(self.data.get(ticker).cloned())
        }
    }

    pub(crate) fn catalog(symbols: &[&str]) -> Catalog {
        symbols
            .iter()
            .map(|s| (s.to_string(), format!("{s} Corp.")))
            .collect()
    }

    #[tokio::test]
    async fn test_acquire_skips_missing_and_failing() {
        let mut source = FakeSource::with(&["AAPL", "MSFT", "NVDA"]);
        source.failing.push("MSFT".to_string());

        let data = acquire(
            &source,
            &catalog(&["NVDA", "DELISTED", "MSFT", "AAPL"]),
            None,
            Lookback::OneYear,
            &ProgressBar::hidden(),
        )
        .await;

        assert_eq!(data.tickers().collect::<Vec<_>>(), ["NVDA", "AAPL"]);
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_acquire_writes_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.xlsx");
        let source = FakeSource::with(&["AAPL"]);

        let data = acquire(
            &source,
            &catalog(&["AAPL", "TSLA"]),
            Some(&path),
            Lookback::default(),
            &ProgressBar::hidden(),
        )
        .await;

        assert_eq!(data.len(), 1);
        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let mut workbook = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("xl/workbook.xml").unwrap(), &mut workbook)
            .unwrap();
        assert!(workbook.contains(r#"name="AAPL""#));
        assert!(!workbook.contains(r#"name="TSLA""#));
    }
}

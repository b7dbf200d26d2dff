use crate::filter::filter_by_window_at;
use crate::kpi::{calculate_kpis, KpiTable};
use crate::matrix::{extract_price_matrix, PriceMatrix};
use crate::revenue::derive_revenue;
use crate::selection::Selection;
use crate::series::SeriesSet;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

/// Conditions surfaced to the user next to the charts; none of them stop a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Rows removed from a ticker for a missing `Close` or `Volume`.
    RowsDropped { ticker: String, count: usize },
    /// A selected ticker the data source returned nothing for.
    NoData { ticker: String },
}

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selection: Selection,
    pub kpis: KpiTable,
    pub prices: PriceMatrix,
    /// Filtered per-ticker series carrying a `Revenue` column.
    pub series: SeriesSet,
    pub notices: Vec<Notice>,
}

/// Run the transformation stages over already acquired data, relative to the
/// local wall clock.
pub fn build_view(acquired: &SeriesSet, selection: &Selection) -> DashboardView {
    build_view_at(acquired, selection, Local::now().naive_local())
}

/// Select -> filter per ticker -> KPIs -> price matrix -> revenue.
///
/// Selected tickers missing from `acquired` are omitted and reported.
pub fn build_view_at(acquired: &SeriesSet, selection: &Selection, now: NaiveDateTime) -> DashboardView {
    let mut notices = Vec::new();

    // 1. keep the selected tickers that returned data
    for ticker in &selection.tickers {
        if !acquired.contains(ticker) {
            info!("[{ticker}] no data available; omitted from the dashboard");
            notices.push(Notice::NoData {
                ticker: ticker.clone(),
            });
        }
    }
    let selected = acquired.select(&selection.tickers);

    // 2. time window & missing values
    let filtered = selected.map(|ticker, series| {
        let out = filter_by_window_at(&series, selection.window, now);
        if out.dropped_missing > 0 {
            notices.push(Notice::RowsDropped {
                ticker: ticker.to_string(),
                count: out.dropped_missing,
            });
        }
        debug!("[{ticker}] {} rows within {}", out.series.len(), selection.window);
        out.series
    });

    // 3. statistics
    let kpis = calculate_kpis(&filtered);

    // 4. closing prices on one timeline
    let prices = extract_price_matrix(&filtered);

    // 5. revenue for the volume charts
    let series = filtered.map(|_, series| derive_revenue(series));

    DashboardView {
        selection: selection.clone(),
        kpis,
        prices,
        series,
        notices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::{closes, day};
    use crate::series::Field;
    use crate::window::TimeWindow;

    #[test]
    fn test_view_reports_missing_tickers_and_drops() {
        let acquired: SeriesSet = [
            ("AAPL".to_string(), closes(&[Some(1.0), None, Some(3.0)])),
            ("MSFT".to_string(), closes(&[Some(2.0)])),
        ]
        .into_iter()
        .collect();
        let selection = Selection::new(["MSFT", "TSLA", "AAPL"], TimeWindow::All, true);
        let view = build_view_at(&acquired, &selection, day(2024, 6, 1));

        assert_eq!(view.series.tickers().collect::<Vec<_>>(), ["MSFT", "AAPL"]);
        assert_eq!(view.prices.labels().collect::<Vec<_>>(), ["MSFT", "AAPL"]);
        assert_eq!(view.kpis.tickers().collect::<Vec<_>>(), ["MSFT", "AAPL"]);
        assert_eq!(
            view.notices,
            [
                Notice::NoData {
                    ticker: "TSLA".to_string()
                },
                Notice::RowsDropped {
                    ticker: "AAPL".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            view.series.get("AAPL").unwrap().column(Field::Revenue).unwrap(),
            &[Some(1_000.0), Some(3_000.0)]
        );
    }

    #[test]
    fn test_view_with_nothing_acquired() {
        let selection = Selection::new(["AAPL"], TimeWindow::LastYear, false);
        let view = build_view_at(&SeriesSet::new(), &selection, day(2024, 6, 1));
        assert!(view.prices.is_empty());
        assert!(view.kpis.is_empty());
        assert_eq!(view.notices.len(), 1);
    }
}

use super::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tickboard_core::{DashboardView, Field, Kpi, Notice, Selection, TimeWindow};
use tickboard_warehouse::{run_cycle, Cycle, SELECTION_PROMPT};

const PAGE: &str = include_str!("../../static/index.html");

#[get("/")]
async fn page() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(PAGE)
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Selection sent by the dashboard controls.
#[derive(Deserialize, Debug, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Comma separated ticker symbols or selection labels, e.g. `AAPL,MSFT`.
    tickers: Option<String>,
    /// `last-month`, `last-year`, `last-five-years`; anything else keeps every row.
    window: Option<String>,
    /// Include revenue (close x volume) series.
    volume: Option<bool>,
}

impl DashboardQuery {
    pub fn selection(&self) -> Selection {
        let labels: Vec<&str> = self
            .tickers
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .collect();
        let window = self
            .window
            .as_deref()
            .map(TimeWindow::from_label)
            .unwrap_or_default();
        Selection::from_labels(&labels, window, self.volume.unwrap_or(false))
    }
}

/// One dashboard cycle
///
/// ```json
/// { "status": "awaiting_selection", "message": "Please select at least one ticker ..." }
/// ```
/// or
/// ```json
/// {
///     "status": "ready",
///     "selection": { ... },
///     "kpis": { "rows": ["Max", "Min", "Mean", "Volatility"], "columns": ["AAPL"], "values": [[...]] },
///     "prices": { "index": ["2024-01-02", ...], "columns": ["Close"], "values": [[...]] },
///     "revenue": [ { "ticker": "AAPL", "index": [...], "values": [...] } ],
///     "notices": [ ... ]
/// }
/// ```
#[derive(Serialize, utoipa::ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardResponse {
    AwaitingSelection {
        message: String,
    },
    Ready {
        selection: SelectionBody,
        kpis: KpiBody,
        prices: PriceBody,
        revenue: Vec<RevenueBody>,
        notices: Vec<NoticeBody>,
    },
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SelectionBody {
    tickers: Vec<String>,
    window: String,
    show_volume: bool,
    summary: Vec<SummaryLine>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SummaryLine {
    label: String,
    value: String,
}

/// `values[row][column]`; undefined statistics are `null`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct KpiBody {
    rows: Vec<String>,
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

/// `values[column][row]`; `null` where a ticker has no price on that date.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PriceBody {
    index: Vec<String>,
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RevenueBody {
    ticker: String,
    index: Vec<String>,
    values: Vec<Option<f64>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NoticeBody {
    kind: String,
    ticker: String,
    message: String,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl From<Cycle> for DashboardResponse {
    fn from(cycle: Cycle) -> Self {
        match cycle {
            Cycle::AwaitingSelection => DashboardResponse::AwaitingSelection {
                message: SELECTION_PROMPT.to_string(),
            },
            Cycle::Ready(view) => DashboardResponse::from(view),
        }
    }
}

impl From<DashboardView> for DashboardResponse {
    fn from(view: DashboardView) -> Self {
        let selection = SelectionBody {
            tickers: view.selection.tickers.clone(),
            window: view.selection.window.label().to_string(),
            show_volume: view.selection.show_volume,
            summary: view
                .selection
                .summary()
                .into_iter()
                .map(|(label, value)| SummaryLine {
                    label: label.to_string(),
                    value,
                })
                .collect(),
        };

        let kpis = KpiBody {
            rows: Kpi::ROWS.iter().map(|kpi| kpi.label().to_string()).collect(),
            columns: view.kpis.tickers().map(str::to_string).collect(),
            values: Kpi::ROWS
                .iter()
                .map(|kpi| view.kpis.row(*kpi).into_iter().map(finite).collect())
                .collect(),
        };

        let prices = PriceBody {
            index: view
                .prices
                .index()
                .iter()
                .map(|time| time.format("%Y-%m-%d").to_string())
                .collect(),
            columns: view.prices.labels().map(str::to_string).collect(),
            values: view
                .prices
                .columns()
                .map(|(_, column)| column.to_vec())
                .collect(),
        };

        let revenue = if view.selection.show_volume {
            view.series
                .iter()
                .filter_map(|(ticker, series)| {
                    series.column(Field::Revenue).map(|values| RevenueBody {
                        ticker: ticker.to_string(),
                        index: series
                            .index()
                            .iter()
                            .map(|time| time.format("%Y-%m-%d").to_string())
                            .collect(),
                        values: values.to_vec(),
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let notices = view
            .notices
            .iter()
            .map(|notice| match notice {
                Notice::RowsDropped { ticker, count } => NoticeBody {
                    kind: "rows_dropped".to_string(),
                    ticker: ticker.clone(),
                    message: format!("{count} rows with missing values were removed."),
                },
                Notice::NoData { ticker } => NoticeBody {
                    kind: "no_data".to_string(),
                    ticker: ticker.clone(),
                    message: "No data found.".to_string(),
                },
            })
            .collect();

        DashboardResponse::Ready {
            selection,
            kpis,
            prices,
            revenue,
            notices,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (
            status = 200, description = "KPI table, price matrix and revenue series for the selected tickers, or a prompt when nothing is selected",
            body = DashboardResponse, content_type = "application/json",
            example = json!({
                "status": "awaiting_selection",
                "message": "Please select at least one ticker to start the analysis."
            })
        )
    )
)]
#[get("/api/dashboard")]
async fn dashboard(query: web::Query<DashboardQuery>, state: web::Data<AppState>) -> impl Responder {
    let selection = query.selection();
    log::debug!("dashboard cycle requested: {selection:?}");

    // one cycle at a time
    let mut cache = state.cache.lock().await;
    let cycle = run_cycle(
        &state.source,
        &mut cache,
        &state.settings.acquire_key(),
        &selection,
        &ProgressBar::hidden(),
    )
    .await;

    HttpResponse::Ok().json(DashboardResponse::from(cycle))
}

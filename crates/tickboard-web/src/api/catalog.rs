use super::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tickboard_core::{glyph, TimeWindow};

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Selection choices for the dashboard controls
///
/// ```json
/// {
///     "tickers": [
///         { "symbol": "AAPL", "description": "Apple Inc.", "label": "AAPL (Apple Inc.)" },
///         ...
///     ],
///     "windows": [
///         { "value": "last-month", "label": "last month" },
///         ...
///     ],
///     "glyphs": { "check": "✓", "cross": "✗", ... }
/// }
/// ```
#[derive(Serialize, utoipa::ToSchema)]
pub struct CatalogResponse {
    tickers: Vec<CatalogItem>,
    windows: Vec<WindowItem>,
    glyphs: Glyphs,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CatalogItem {
    symbol: String,
    description: String,
    label: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WindowItem {
    value: String,
    label: String,
}

/// Heading glyphs, shared with the terminal renderer.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Glyphs {
    check: &'static str,
    cross: &'static str,
    curve_up: &'static str,
    clock: &'static str,
    money: &'static str,
    bar_chart: &'static str,
    settings: &'static str,
}

impl Glyphs {
    const ALL: Glyphs = Glyphs {
        check: glyph::CHECK,
        cross: glyph::CROSS,
        curve_up: glyph::CURVE_UP,
        clock: glyph::CLOCK,
        money: glyph::MONEY,
        bar_chart: glyph::BAR_CHART,
        settings: glyph::SETTINGS,
    };
}

pub(crate) fn window_value(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::LastMonth => "last-month",
        TimeWindow::LastYear => "last-year",
        TimeWindow::LastFiveYears => "last-five-years",
        TimeWindow::All => "all",
    }
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (
            status = 200, description = "Ticker symbols offered for selection and the available time windows",
            body = CatalogResponse, content_type = "application/json",
            example = json!({
                "tickers": [
                    {
                        "symbol": "AAPL",
                        "description": "Apple Inc.",
                        "label": "AAPL (Apple Inc.)"
                    }
                ],
                "windows": [
                    { "value": "last-month", "label": "last month" }
                ],
                "glyphs": {
                    "check": "\u{2713}",
                    "cross": "\u{2717}",
                    "curve_up": "\u{25B2}",
                    "clock": "\u{231A}",
                    "money": "$",
                    "bar_chart": "\u{25A0}",
                    "settings": "\u{2699}"
                }
            })
        )
    )
)]
#[get("/api/catalog")]
async fn catalog(state: web::Data<AppState>) -> impl Responder {
    let catalog = &state.settings.catalog;
    let tickers = catalog
        .entries()
        .iter()
        .zip(catalog.option_labels())
        .map(|(entry, label)| CatalogItem {
            symbol: entry.symbol.clone(),
            description: entry.description.clone(),
            label,
        })
        .collect();
    let windows = TimeWindow::CHOICES
        .iter()
        .map(|window| WindowItem {
            value: window_value(*window).to_string(),
            label: window.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(CatalogResponse {
        tickers,
        windows,
        glyphs: Glyphs::ALL,
    })
}

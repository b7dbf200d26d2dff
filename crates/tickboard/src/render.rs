use colored::Colorize;
use std::fmt::Write;
use tickboard_core::{
    glyph, Catalog, DashboardView, Field, Kpi, KpiTable, Notice, PriceMatrix, Selection, Series,
};

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;
const BAR_WIDTH: usize = 40;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Sections
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// The whole dashboard for one cycle, `rows` most recent rows per table.
pub fn dashboard(view: &DashboardView, rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&selection(&view.selection));
    out.push_str(&notices(&view.notices));

    out.push_str(&heading(glyph::BAR_CHART, "Key figures of the selected stocks"));
    out.push_str(&kpi_table(&view.kpis));

    out.push_str(&heading(glyph::CURVE_UP, "Stock prices"));
    out.push_str(&price_chart(&view.prices, rows));

    if view.selection.show_volume {
        out.push_str(&heading(glyph::MONEY, "Revenue"));
        for (ticker, series) in view.series.iter() {
            let _ = writeln!(out, "{}", format!("{ticker} - Revenue").bold());
            out.push_str(&revenue_bars(series, rows));
        }
    }
    out
}

pub fn prompt(message: &str) -> String {
    format!("{} {}\n", glyph::CROSS.yellow(), message.yellow())
}

pub fn catalog(catalog: &Catalog) -> String {
    let mut out = heading(glyph::SETTINGS, "Ticker catalog");
    for label in catalog.option_labels() {
        let _ = writeln!(out, "  {label}");
    }
    out
}

pub fn selection(selection: &Selection) -> String {
    let mut out = String::new();
    for (label, value) in selection.summary() {
        let glyph = if label == "Window" { glyph::CLOCK } else { glyph::SETTINGS };
        let _ = writeln!(out, "{glyph} {}: {value}", label.bold());
    }
    out.push_str(&"-".repeat(40));
    out.push('\n');
    out
}

pub fn notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let line = match notice {
            Notice::RowsDropped { ticker, count } => format!(
                "{} [{ticker}] {count} rows with missing values were removed.",
                glyph::CHECK.cyan()
            ),
            Notice::NoData { ticker } => {
                format!("{} [{ticker}] no data found.", glyph::CROSS.red())
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn heading(glyph: &str, title: &str) -> String {
    format!("\n{} {}\n", glyph, title.bold().underline())
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Tables & charts
//
////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn kpi_table(kpis: &KpiTable) -> String {
    if kpis.is_empty() {
        return "  (no data)\n".to_string();
    }

    let mut out = format!("{:<12}", "");
    for ticker in kpis.tickers() {
        let _ = write!(out, "{:>14}", ticker);
    }
    out.push('\n');

    for kpi in Kpi::ROWS {
        let _ = write!(out, "{:<12}", kpi.label());
        for value in kpis.row(kpi) {
            let _ = write!(out, "{:>14}", number(value));
        }
        out.push('\n');
    }
    out
}

/// One sparkline per column over the full index, then the last `rows` rows.
pub fn price_chart(prices: &PriceMatrix, rows: usize) -> String {
    if prices.is_empty() {
        return "  (no data)\n".to_string();
    }

    let mut out = String::new();
    let label_width = prices.labels().map(str::len).max().unwrap_or(0).max(5);
    for (label, column) in prices.columns() {
        let _ = writeln!(
            out,
            "{:<label_width$} {}",
            label,
            sparkline(column, SPARK_WIDTH).green()
        );
    }
    out.push('\n');

    let _ = write!(out, "{:<12}", "Date");
    for label in prices.labels() {
        let _ = write!(out, "{:>14}", label);
    }
    out.push('\n');

    let start = prices.len().saturating_sub(rows);
    for (row, time) in prices.index().iter().enumerate().skip(start) {
        let _ = write!(out, "{:<12}", time.format("%Y-%m-%d"));
        for (_, column) in prices.columns() {
            let cell = column[row].map(number).unwrap_or_else(|| "-".to_string());
            let _ = write!(out, "{:>14}", cell);
        }
        out.push('\n');
    }
    out
}

/// Horizontal bars of the last `rows` revenue values, scaled to the largest.
pub fn revenue_bars(series: &Series, rows: usize) -> String {
    let revenue = match series.column(Field::Revenue) {
        Some(revenue) if !revenue.is_empty() => revenue,
        _ => return "  (no data)\n".to_string(),
    };

    let start = revenue.len().saturating_sub(rows);
    let max = revenue[start..]
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (row, value) in revenue.iter().enumerate().skip(start) {
        let time = series.index()[row].format("%Y-%m-%d");
        let (bar, text) = match value {
            Some(v) if max > 0.0 => {
                let len = ((v / max) * BAR_WIDTH as f64).round() as usize;
                (glyph::BAR_CHART.repeat(len), compact(*v))
            }
            Some(v) => (String::new(), compact(*v)),
            None => (String::new(), "-".to_string()),
        };
        let _ = writeln!(out, "{time} {:<BAR_WIDTH$} {text}", bar.blue());
    }
    out
}

/// Unicode sparkline of `values` squeezed into at most `width` characters.
///
/// Each character averages a bucket of present values; buckets with none stay blank.
pub fn sparkline(values: &[Option<f64>], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let buckets: Vec<Option<f64>> = if values.len() <= width {
        values.to_vec()
    } else {
        (0..width)
            .map(|i| {
                let lo = i * values.len() / width;
                let hi = ((i + 1) * values.len() / width).max(lo + 1);
                let present: Vec<f64> = values[lo..hi].iter().flatten().copied().collect();
                if present.is_empty() {
                    None
                } else {
                    Some(present.iter().sum::<f64>() / present.len() as f64)
                }
            })
            .collect()
    };

    let present = buckets.iter().flatten().copied();
    let min = present.clone().fold(f64::INFINITY, f64::min);
    let max = present.fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    buckets
        .iter()
        .map(|bucket| match bucket {
            Some(v) if span > 0.0 => {
                let level = ((v - min) / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[level.min(SPARKS.len() - 1)]
            }
            Some(_) => SPARKS[SPARKS.len() / 2],
            None => ' ',
        })
        .collect()
}

fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// `1234567.0` -> `1.23M`
fn compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, "T")
    } else if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("{scaled:.2}{suffix}")
}

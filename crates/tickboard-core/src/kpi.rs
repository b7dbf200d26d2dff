use crate::series::{Field, SeriesSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistics reported per ticker, in row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kpi {
    Max,
    Min,
    Mean,
    /// Sample standard deviation of closing price levels.
    Volatility,
}

impl Kpi {
    pub const ROWS: [Kpi; 4] = [Kpi::Max, Kpi::Min, Kpi::Mean, Kpi::Volatility];

    pub fn label(&self) -> &'static str {
        match self {
            Kpi::Max => "Max",
            Kpi::Min => "Min",
            Kpi::Mean => "Mean",
            Kpi::Volatility => "Volatility",
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Max, min, mean and volatility of one set of closing prices.
///
/// Undefined statistics are `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub volatility: f64,
}

impl Summary {
    /// Summarise the present, non-NaN values of `cells`.
    pub fn of(cells: &[Option<f64>]) -> Summary {
        let values: Vec<f64> = cells.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
        let n = values.len();
        if n == 0 {
            return Summary {
                max: f64::NAN,
                min: f64::NAN,
                mean: f64::NAN,
                volatility: f64::NAN,
            };
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / n as f64;
        let volatility = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        Summary {
            max,
            min,
            mean,
            volatility,
        }
    }

    pub fn get(&self, kpi: Kpi) -> f64 {
        match kpi {
            Kpi::Max => self.max,
            Kpi::Min => self.min,
            Kpi::Mean => self.mean,
            Kpi::Volatility => self.volatility,
        }
    }
}

/// Four fixed rows ([`Kpi::ROWS`]) by one column per ticker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpiTable {
    columns: Vec<(String, Summary)>,
}

impl KpiTable {
    pub fn tickers(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(ticker, _)| ticker.as_str())
    }

    pub fn summary(&self, ticker: &str) -> Option<&Summary> {
        self.columns
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, summary)| summary)
    }

    pub fn get(&self, kpi: Kpi, ticker: &str) -> Option<f64> {
        self.summary(ticker).map(|summary| summary.get(kpi))
    }

    /// One statistic across every ticker, in column order.
    pub fn row(&self, kpi: Kpi) -> Vec<f64> {
        self.columns
            .iter()
            .map(|(_, summary)| summary.get(kpi))
            .collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Summarise each ticker's `Close` column.
///
/// Tickers with no `Close` column, or an empty one, are omitted.
pub fn calculate_kpis(set: &SeriesSet) -> KpiTable {
    let columns = set
        .iter()
        .filter_map(|(ticker, series)| match series.column(Field::Close) {
            Some(close) if !close.is_empty() => Some((ticker.to_string(), Summary::of(close))),
            _ => None,
        })
        .collect();
    KpiTable { columns }
}

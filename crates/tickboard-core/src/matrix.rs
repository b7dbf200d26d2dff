use crate::series::{Column, Field, SeriesSet};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Column label used when a single ticker is charted.
pub const SINGLE_SERIES_LABEL: &str = "Close";

/// Closing prices of several tickers on one timeline.
///
/// The index is the sorted union of every input index; a ticker without a row
/// on a given timestamp holds `None` there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceMatrix {
    index: Vec<NaiveDateTime>,
    columns: Vec<(String, Column)>,
}

impl PriceMatrix {
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(label, _)| label.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> + '_ {
        self.columns
            .iter()
            .map(|(label, column)| (label.as_str(), column.as_slice()))
    }

    pub fn column(&self, label: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, column)| column.as_slice())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }
}

/// Outer-join every ticker's `Close` column into one matrix, one column per
/// ticker in `set` order.
///
/// With exactly one ticker the column is labelled [`SINGLE_SERIES_LABEL`].
/// Series without a `Close` column are left out.
pub fn extract_price_matrix(set: &SeriesSet) -> PriceMatrix {
    let priced: Vec<_> = set
        .iter()
        .filter_map(|(ticker, series)| {
            series
                .column(Field::Close)
                .map(|close| (ticker, series.index(), close))
        })
        .collect();

    let index: Vec<NaiveDateTime> = priced
        .iter()
        .flat_map(|(_, times, _)| times.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let single = priced.len() == 1;
    let columns = priced
        .into_iter()
        .map(|(ticker, times, close)| {
            let column: Column = index
                .iter()
                .map(|time| times.binary_search(time).ok().and_then(|row| close[row]))
                .collect();
            let label = if single {
                SINGLE_SERIES_LABEL.to_string()
            } else {
                ticker.to_string()
            };
            (label, column)
        })
        .collect();

    PriceMatrix { index, columns }
}

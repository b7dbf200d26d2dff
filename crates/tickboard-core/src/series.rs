use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single numeric column; `None` marks a missing value.
pub type Column = Vec<Option<f64>>;

/// Column labels a price series can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
    Dividends,
    #[serde(rename = "Stock Splits")]
    StockSplits,
    Revenue,
}

impl Field {
    /// Columns every provider series starts with.
    pub const OHLCV: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
            Field::Dividends => "Dividends",
            Field::StockSplits => "Stock Splits",
            Field::Revenue => "Revenue",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("index is not strictly increasing at row {0}")]
    UnorderedIndex(usize),

    #[error("column {field} has {found} values but the index has {expected}")]
    LengthMismatch {
        field: Field,
        expected: usize,
        found: usize,
    },
}

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// Series: one ticker's time-indexed table
//
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Time-indexed table of a single ticker.
///
/// The index is strictly increasing (chronological and unique) and every column
/// holds exactly one cell per index entry.
///
/// ```rust
/// use chrono::NaiveDate;
/// use tickboard_core::{Field, Series};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let series = Series::new(vec![day])?
///     .with_column(Field::Close, vec![Some(185.6)])?
///     .with_column(Field::Volume, vec![Some(82_488_700.0)])?;
/// assert_eq!(series.len(), 1);
/// # Ok::<(), tickboard_core::SeriesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    index: Vec<NaiveDateTime>,
    columns: Vec<(Field, Column)>,
}

impl Series {
    pub fn new(index: Vec<NaiveDateTime>) -> Result<Self, SeriesError> {
        if let Some(pos) = index.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(SeriesError::UnorderedIndex(pos + 1));
        }
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    pub fn with_column(mut self, field: Field, values: Column) -> Result<Self, SeriesError> {
        self.set_column(field, values)?;
        Ok(self)
    }

    /// Insert `values` as `field`, replacing an existing column in place.
    pub fn set_column(&mut self, field: Field, values: Column) -> Result<(), SeriesError> {
        if values.len() != self.index.len() {
            return Err(SeriesError::LengthMismatch {
                field,
                expected: self.index.len(),
                found: values.len(),
            });
        }
        self.put_column(field, values);
        Ok(())
    }

    // caller guarantees `values.len() == self.len()`
    pub(crate) fn put_column(&mut self, field: Field, values: Column) {
        match self.columns.iter_mut().find(|(f, _)| *f == field) {
            Some((_, column)) => *column = values,
            None => self.columns.push((field, values)),
        }
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn column(&self, field: Field) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, column)| column.as_slice())
    }

    pub fn has_column(&self, field: Field) -> bool {
        self.column(field).is_some()
    }

    /// Column labels in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.columns.iter().map(|(field, _)| *field)
    }

    pub fn value(&self, field: Field, row: usize) -> Option<f64> {
        self.column(field).and_then(|column| column.get(row).copied().flatten())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.index.first().copied()
    }

    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.index.last().copied()
    }

    /// New series holding only `rows` (ascending positions), all columns kept.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Series {
        Series {
            index: rows.iter().map(|&row| self.index[row]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(field, column)| (*field, rows.iter().map(|&row| column[row]).collect()))
                .collect(),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// SeriesSet: ticker -> series, in insertion order
//
///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSet {
    entries: Vec<(String, Series)>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a ticker's series; an existing ticker keeps its position.
    pub fn insert(&mut self, ticker: impl Into<String>, series: Series) -> Option<Series> {
        let ticker = ticker.into();
        match self.entries.iter_mut().find(|(t, _)| *t == ticker) {
            Some((_, slot)) => Some(std::mem::replace(slot, series)),
            None => {
                self.entries.push((ticker, series));
                None
            }
        }
    }

    pub fn get(&self, ticker: &str) -> Option<&Series> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, series)| series)
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.get(ticker).is_some()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(ticker, _)| ticker.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> + '_ {
        self.entries
            .iter()
            .map(|(ticker, series)| (ticker.as_str(), series))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy out `tickers` in the order given; tickers without a series are skipped.
    pub fn select<S: AsRef<str>>(&self, tickers: &[S]) -> SeriesSet {
        tickers
            .iter()
            .filter_map(|ticker| {
                let ticker = ticker.as_ref();
                self.get(ticker)
                    .map(|series| (ticker.to_string(), series.clone()))
            })
            .collect()
    }

    /// Apply `f` to every series, keeping ticker order.
    pub fn map<F>(self, mut f: F) -> SeriesSet
    where
        F: FnMut(&str, Series) -> Series,
    {
        SeriesSet {
            entries: self
                .entries
                .into_iter()
                .map(|(ticker, series)| {
                    let series = f(&ticker, series);
                    (ticker, series)
                })
                .collect(),
        }
    }
}

impl FromIterator<(String, Series)> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = (String, Series)>>(iter: I) -> Self {
        let mut set = SeriesSet::new();
        for (ticker, series) in iter {
            set.insert(ticker, series);
        }
        set
    }
}

impl IntoIterator for SeriesSet {
    type Item = (String, Series);
    type IntoIter = std::vec::IntoIter<(String, Series)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

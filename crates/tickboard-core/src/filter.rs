use crate::series::{Field, Series};
use crate::window::TimeWindow;
use chrono::{Local, NaiveDateTime};
use tracing::{info, trace};

/// Outcome of [`filter_by_window`].
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    pub series: Series,
    /// Rows dropped for a missing `Close` or `Volume`; rows outside the window
    /// are not counted.
    pub dropped_missing: usize,
}

/// Filter `series` to `window` relative to the local wall clock.
pub fn filter_by_window(series: &Series, window: TimeWindow) -> Filtered {
    filter_by_window_at(series, window, Local::now().naive_local())
}

/// Filter `series` to the rows at or after `window`'s cutoff from `now`, then
/// drop rows missing `Close` or `Volume`.
///
/// A series without one of those columns counts every in-window row as missing.
pub fn filter_by_window_at(series: &Series, window: TimeWindow, now: NaiveDateTime) -> Filtered {
    let cutoff = match window.cutoff(now).or(series.first_time()) {
        Some(cutoff) => cutoff,
        None => {
            return Filtered {
                series: series.clone(),
                dropped_missing: 0,
            }
        }
    };
    trace!("filtering {} rows to >= {cutoff} ({window})", series.len());

    let in_window: Vec<usize> = series
        .index()
        .iter()
        .enumerate()
        .filter(|(_, time)| **time >= cutoff)
        .map(|(row, _)| row)
        .collect();

    let complete: Vec<usize> = match (series.column(Field::Close), series.column(Field::Volume)) {
        (Some(close), Some(volume)) => in_window
            .iter()
            .copied()
            .filter(|&row| is_present(close[row]) && is_present(volume[row]))
            .collect(),
        _ => Vec::new(),
    };

    let dropped_missing = in_window.len() - complete.len();
    if dropped_missing > 0 {
        info!("{dropped_missing} rows with missing values were removed");
    }

    Filtered {
        series: series.select_rows(&complete),
        dropped_missing,
    }
}

fn is_present(cell: Option<f64>) -> bool {
    matches!(cell, Some(v) if !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::{closes, day};

    fn mixed() -> Series {
        Series::new(vec![
            day(2023, 1, 10),
            day(2024, 5, 20),
            day(2024, 6, 3),
            day(2024, 6, 10),
            day(2024, 6, 14),
        ])
        .unwrap()
        .with_column(
            Field::Close,
            vec![Some(1.0), None, Some(3.0), Some(4.0), Some(f64::NAN)],
        )
        .unwrap()
        .with_column(
            Field::Volume,
            vec![None, Some(10.0), None, Some(40.0), Some(50.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_filter_last_month_counts_only_missing_drops() {
        let now = day(2024, 6, 15);
        let out = filter_by_window_at(&mixed(), TimeWindow::LastMonth, now);

        // 2024-05-20 .. 2024-06-14 are in the window; three of them are incomplete
        assert_eq!(out.series.index(), &[day(2024, 6, 10)]);
        assert_eq!(out.series.column(Field::Close).unwrap(), &[Some(4.0)]);
        assert_eq!(out.dropped_missing, 3);
    }

    #[test]
    fn test_filter_keeps_rows_at_cutoff() {
        let series = closes(&[Some(1.0), Some(2.0), Some(3.0)]);
        let out = filter_by_window_at(&series, TimeWindow::LastMonth, day(2024, 2, 2));
        assert_eq!(out.series.index(), &[day(2024, 1, 2), day(2024, 1, 3)]);
        assert_eq!(out.dropped_missing, 0);
    }

    #[test]
    fn test_unrecognized_window_keeps_everything_complete() {
        let window = TimeWindow::from_label("since forever");
        let out = filter_by_window_at(&mixed(), window, day(2024, 6, 15));
        assert_eq!(out.series.index(), &[day(2024, 6, 10)]);
        assert_eq!(out.dropped_missing, 4);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let now = day(2024, 6, 15);
        for window in [TimeWindow::LastMonth, TimeWindow::LastYear, TimeWindow::All] {
            let once = filter_by_window_at(&mixed(), window, now);
            let twice = filter_by_window_at(&once.series, window, now);
            assert_eq!(once.series, twice.series);
            assert_eq!(twice.dropped_missing, 0);
        }
    }

    #[test]
    fn test_filter_never_mutates_input() {
        let input = closes(&[Some(1.0), None, Some(3.0)]);
        let before = input.clone();
        let out = filter_by_window_at(&input, TimeWindow::All, day(2024, 6, 15));
        assert_eq!(out.dropped_missing, 1);
        assert_eq!(input, before);
    }

    #[test]
    fn test_filter_empty_and_out_of_window() {
        let empty = Series::new(vec![]).unwrap();
        let out = filter_by_window_at(&empty, TimeWindow::LastYear, day(2024, 6, 15));
        assert!(out.series.is_empty());

        let old = closes(&[Some(1.0), Some(2.0)]);
        let out = filter_by_window_at(&old, TimeWindow::LastMonth, day(2030, 1, 1));
        assert!(out.series.is_empty());
        assert_eq!(out.dropped_missing, 0);
    }

    #[test]
    fn test_series_without_volume_loses_every_row() {
        let series = Series::new(vec![day(2024, 1, 1), day(2024, 1, 2)])
            .unwrap()
            .with_column(Field::Close, vec![Some(1.0), Some(2.0)])
            .unwrap();
        let out = filter_by_window_at(&series, TimeWindow::All, day(2024, 6, 15));
        assert!(out.series.is_empty());
        assert_eq!(out.dropped_missing, 2);
    }
}

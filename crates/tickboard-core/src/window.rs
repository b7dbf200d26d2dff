use chrono::{Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window a dashboard cycle is filtered to.
///
/// Labels outside the fixed choices parse to [`TimeWindow::All`], which keeps
/// every row instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeWindow {
    #[default]
    LastMonth,
    LastYear,
    LastFiveYears,
    All,
}

impl TimeWindow {
    /// Choices offered by the selection controls.
    pub const CHOICES: [TimeWindow; 3] = [
        TimeWindow::LastMonth,
        TimeWindow::LastYear,
        TimeWindow::LastFiveYears,
    ];

    pub fn from_label(label: &str) -> TimeWindow {
        match label.trim().to_lowercase().as_str() {
            "last month" | "last-month" | "month" | "1mo" | "monat" => TimeWindow::LastMonth,
            "last year" | "last-year" | "year" | "1y" | "1 jahr" => TimeWindow::LastYear,
            "last 5 years" | "last-five-years" | "five-years" | "5y" | "5 jahre" => {
                TimeWindow::LastFiveYears
            }
            _ => TimeWindow::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::LastMonth => "last month",
            TimeWindow::LastYear => "last year",
            TimeWindow::LastFiveYears => "last 5 years",
            TimeWindow::All => "all",
        }
    }

    /// Calendar offset in months, `None` for [`TimeWindow::All`].
    pub fn months(&self) -> Option<u32> {
        match self {
            TimeWindow::LastMonth => Some(1),
            TimeWindow::LastYear => Some(12),
            TimeWindow::LastFiveYears => Some(60),
            TimeWindow::All => None,
        }
    }

    /// Earliest timestamp kept relative to `now`.
    ///
    /// Month arithmetic clamps to the last day of the target month
    /// (31 March minus one month is 29 February in a leap year). `None` means
    /// no lower bound.
    pub fn cutoff(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.months()
            .map(|months| now.checked_sub_months(Months::new(months)).unwrap_or(NaiveDateTime::MIN))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use crate::catalog::symbol_from_label;
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};

/// What the user picked for one dashboard cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub tickers: Vec<String>,
    pub window: TimeWindow,
    pub show_volume: bool,
}

impl Selection {
    /// Tickers are uppercased and deduplicated, first occurrence wins.
    pub fn new<I, S>(tickers: I, window: TimeWindow, show_volume: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for ticker in tickers {
            let ticker = ticker.as_ref().trim().to_uppercase();
            if !ticker.is_empty() && !unique.contains(&ticker) {
                unique.push(ticker);
            }
        }
        Self {
            tickers: unique,
            window,
            show_volume,
        }
    }

    /// Build from selection labels such as `"AAPL (Apple Inc.)"`.
    pub fn from_labels<S: AsRef<str>>(labels: &[S], window: TimeWindow, show_volume: bool) -> Self {
        Self::new(
            labels
                .iter()
                .filter_map(|label| symbol_from_label(label.as_ref())),
            window,
            show_volume,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Label/value lines echoing the selection back to the user.
    pub fn summary(&self) -> [(&'static str, String); 3] {
        [
            ("Tickers", self.tickers.join(", ")),
            ("Window", self.window.label().to_string()),
            (
                "Show volume",
                if self.show_volume { "yes" } else { "no" }.to_string(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_and_dedups() {
        let selection = Selection::new(["aapl", " MSFT ", "AAPL", ""], TimeWindow::LastYear, false);
        assert_eq!(selection.tickers, ["AAPL", "MSFT"]);
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_from_labels() {
        let selection = Selection::from_labels(
            &["AAPL (Apple Inc.)", "SIE.DE (Siemens AG)"],
            TimeWindow::LastMonth,
            true,
        );
        assert_eq!(selection.tickers, ["AAPL", "SIE.DE"]);
        assert_eq!(selection.summary()[0].1, "AAPL, SIE.DE");
        assert_eq!(selection.summary()[2].1, "yes");
    }

    #[test]
    fn test_empty_selection() {
        let selection = Selection::new(Vec::<String>::new(), TimeWindow::All, false);
        assert!(selection.is_empty());
    }
}

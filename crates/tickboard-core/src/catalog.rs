use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Statically defined ticker choices.
    ///
    /// This is currently maintained manually.
    pub static ref DEFAULT_TICKERS: Vec<(&'static str, &'static str)> = vec![
        ("AAPL", "Apple Inc."),
        ("MSFT", "Microsoft Corporation"),
        ("GOOGL", "Alphabet Inc."),
        ("AMZN", "Amazon.com, Inc."),
        ("NVDA", "NVIDIA Corporation"),
        ("META", "Meta Platforms, Inc."),
        ("TSLA", "Tesla, Inc."),
        ("SAP", "SAP SE"),
        ("SIE.DE", "Siemens AG"),
        ("ALV.DE", "Allianz SE"),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub symbol: String,
    pub description: String,
}

/// Ordered ticker symbol -> description mapping offered for selection.
///
/// Loaded from JSON as a list of entries:
/// ```json
/// [
///     { "symbol": "AAPL", "description": "Apple Inc." },
///     { "symbol": "MSFT", "description": "Microsoft Corporation" }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        DEFAULT_TICKERS
            .iter()
            .map(|(symbol, description)| (symbol.to_string(), description.to_string()))
            .collect()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(raw
            .into_iter()
            .map(|entry| (entry.symbol, entry.description))
            .collect())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.symbol.as_str())
    }

    pub fn description(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.symbol == symbol)
            .map(|entry| entry.description.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.description(symbol).is_some()
    }

    /// Selection labels, e.g. `"AAPL (Apple Inc.)"`.
    pub fn option_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{} ({})", entry.symbol, entry.description))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Symbols are normalised to uppercase; a repeated symbol keeps its first
/// position and takes the later description.
impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for (symbol, description) in iter {
            let symbol = symbol.trim().to_uppercase();
            match entries.iter_mut().find(|entry| entry.symbol == symbol) {
                Some(entry) => entry.description = description,
                None => entries.push(CatalogEntry {
                    symbol,
                    description,
                }),
            }
        }
        Catalog { entries }
    }
}

/// Recover the ticker symbol from a selection label (its first word).
pub fn symbol_from_label(label: &str) -> Option<&str> {
    label.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), DEFAULT_TICKERS.len());
        assert_eq!(catalog.description("AAPL"), Some("Apple Inc."));
        assert_eq!(catalog.symbols().next(), Some("AAPL"));
    }

    #[test]
    fn test_from_json_keeps_file_order() {
        let catalog = Catalog::from_json(
            r#"[
                {"symbol": "msft", "description": "Microsoft"},
                {"symbol": "AAPL", "description": "Apple"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.symbols().collect::<Vec<_>>(), ["MSFT", "AAPL"]);
        assert!(Catalog::from_json("{\"AAPL\": 1}").is_err());
    }

    #[test]
    fn test_option_labels_round_trip() {
        let catalog: Catalog = [("SIE.DE".to_string(), "Siemens AG".to_string())]
            .into_iter()
            .collect();
        let labels = catalog.option_labels();
        assert_eq!(labels, ["SIE.DE (Siemens AG)"]);
        assert_eq!(symbol_from_label(&labels[0]), Some("SIE.DE"));
        assert_eq!(symbol_from_label("   "), None);
    }
}

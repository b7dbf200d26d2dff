mod schema;

pub use schema::PriceHistory;

use crate::lookback::Lookback;
use anyhow::Result;
use reqwest::Client;
use std::future::Future;
use tickboard_core::Series;
use tracing::{error, trace};

/// Something that can produce a ticker's price history.
///
/// `Ok(None)` means the source answered but holds no rows for the ticker.
pub trait PriceSource {
    fn history(
        &self,
        ticker: &str,
        lookback: Lookback,
    ) -> impl Future<Output = Result<Option<Series>>> + Send;
}

/// Daily bars from the Yahoo Finance chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooFinance {
    client: Client,
}

impl YahooFinance {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::ClientBuilder::new().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn url(ticker: &str, interval: &str, range: &str) -> String {
    let tckr = ticker.to_uppercase();
    format!(
        "https://query1.finance.yahoo.com/v8/finance/chart/{tckr}?symbol={tckr}&interval={interval}&range={range}&events=div|split",
    )
}

impl PriceSource for YahooFinance {
    async fn history(&self, ticker: &str, lookback: Lookback) -> Result<Option<Series>> {
        let url = url(ticker, "1d", lookback.as_range());
        trace!("Fetching price data for [{ticker}] from Yahoo Finance");

        // unknown symbols answer 404 with a JSON body, so the status is not checked
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                error!("[{ticker}] price fetching error: {e}\nURL: {url}");
                e
            })?
            .bytes()
            .await
            .map_err(|e| {
                error!("[{ticker}] byte transformation error: {e}\nURL: {url}");
                e
            })?;

        // error check the deserialization
        trace!("Deserializing price data for [{ticker}]");
        let de = match serde_json::from_slice::<PriceHistory>(&response) {
            Ok(data) => data,
            Err(e) => {
                error!("[{ticker}] deserialization error: {e}\nURL: {url}");
                return Err(e.into());
            }
        };

        if let Some(err) = &de.chart.error {
            trace!(
                "[{ticker}] Yahoo Finance reported {}: {}",
                err.code,
                err.description.as_deref().unwrap_or_default()
            );
        }

        let series = de.into_series()?;
        trace!("Price data transformed for [{ticker}]");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        assert_eq!(
            url("aapl", "1d", "5y"),
            "https://query1.finance.yahoo.com/v8/finance/chart/AAPL?symbol=AAPL&interval=1d&range=5y&events=div|split"
        );
    }
}

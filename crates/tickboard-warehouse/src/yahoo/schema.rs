use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashMap;
use tickboard_core::{Column, Field, Series, SeriesError};
use tracing::warn;

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
///////////////////////////////////////////////////////////////////////////////////////////////////

// Input: Yahoo Finance
#[derive(Deserialize, Debug)]
pub struct PriceHistory {
    pub chart: PriceResponse,
}

#[derive(Deserialize, Debug)]
pub struct PriceResponse {
    pub result: Option<Vec<PriceCategories>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PriceCategories {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub events: Events,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    /// Seconds east of UTC for the listing exchange.
    #[serde(default)]
    pub gmtoffset: i64,
    #[serde(rename = "exchangeTimezoneName")]
    pub exchange_timezone: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Events {
    #[serde(default)]
    pub dividends: HashMap<String, Dividend>,
    #[serde(default)]
    pub splits: HashMap<String, Split>,
}

#[derive(Deserialize, Debug)]
pub struct Dividend {
    pub amount: f64,
    pub date: i64,
}

#[derive(Deserialize, Debug)]
pub struct Split {
    pub date: i64,
    pub numerator: f64,
    pub denominator: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Cells are `null` on days the exchange reported nothing.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// Transformation
//
///////////////////////////////////////////////////////////////////////////////////////////////////

impl PriceHistory {
    /// The first chart result as a daily series; `None` when Yahoo has no rows.
    pub fn into_series(self) -> Result<Option<Series>, SeriesError> {
        match self.chart.result.and_then(|results| results.into_iter().next()) {
            Some(categories) if !categories.timestamp.is_empty() => categories.into_series().map(Some),
            _ => Ok(None),
        }
    }
}

impl PriceCategories {
    /// Daily bars keyed by exchange-local date at midnight, timezone dropped.
    ///
    /// Yahoo occasionally repeats the trading day in progress; the later bar wins.
    pub fn into_series(self) -> Result<Series, SeriesError> {
        let zone = self.meta.zone();
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        // (local time, source position), sorted with later duplicates last
        let mut rows: Vec<(NaiveDateTime, usize)> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(pos, ts)| match local_day(*ts, zone) {
                Some(day) => Some((day, pos)),
                None => {
                    warn!("skipping out-of-range timestamp {ts}");
                    None
                }
            })
            .collect();
        rows.sort_by_key(|(day, pos)| (*day, *pos));
        rows.reverse();
        rows.dedup_by_key(|(day, _)| *day);
        rows.reverse();

        let pick = |values: &[Option<f64>]| -> Column {
            rows.iter()
                .map(|(_, pos)| values.get(*pos).copied().flatten())
                .collect()
        };

        let dividends = event_totals(
            self.events
                .dividends
                .values()
                .map(|d| (d.date, d.amount)),
            zone,
        );
        let splits = event_totals(
            self.events
                .splits
                .values()
                .filter(|s| s.denominator != 0.0)
                .map(|s| (s.date, s.numerator / s.denominator)),
            zone,
        );
        let on_day = |events: &HashMap<NaiveDate, f64>| -> Column {
            rows.iter()
                .map(|(day, _)| Some(events.get(&day.date()).copied().unwrap_or(0.0)))
                .collect()
        };

        Series::new(rows.iter().map(|(day, _)| *day).collect())?
            .with_column(Field::Open, pick(&quote.open))?
            .with_column(Field::High, pick(&quote.high))?
            .with_column(Field::Low, pick(&quote.low))?
            .with_column(Field::Close, pick(&quote.close))?
            .with_column(Field::Volume, pick(&quote.volume))?
            .with_column(Field::Dividends, on_day(&dividends))?
            .with_column(Field::StockSplits, on_day(&splits))
    }
}

/// How exchange-local time is derived from a UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    /// IANA zone; the offset follows daylight saving per timestamp.
    Named(Tz),
    /// `gmtoffset` seconds, as of the request.
    Fixed(i64),
}

impl Meta {
    pub fn zone(&self) -> Zone {
        match self.exchange_timezone.as_deref().map(str::parse::<Tz>) {
            Some(Ok(tz)) => Zone::Named(tz),
            Some(Err(_)) => {
                warn!(
                    "unknown exchange timezone {:?}; using gmtoffset {}",
                    self.exchange_timezone, self.gmtoffset
                );
                Zone::Fixed(self.gmtoffset)
            }
            None => Zone::Fixed(self.gmtoffset),
        }
    }
}

fn local_day(timestamp: i64, zone: Zone) -> Option<NaiveDateTime> {
    let date = match zone {
        Zone::Named(tz) => DateTime::from_timestamp(timestamp, 0)?
            .with_timezone(&tz)
            .date_naive(),
        Zone::Fixed(offset) => DateTime::from_timestamp(timestamp.checked_add(offset)?, 0)?
            .naive_utc()
            .date(),
    };
    date.and_hms_opt(0, 0, 0)
}

fn event_totals(events: impl Iterator<Item = (i64, f64)>, zone: Zone) -> HashMap<NaiveDate, f64> {
    let mut totals = HashMap::new();
    for (timestamp, value) in events {
        if let Some(day) = local_day(timestamp, zone) {
            *totals.entry(day.date()).or_insert(0.0) += value;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-04 .. 2024-03-06 14:30 UTC (09:30 New York, gmtoffset -18000)
    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "USD",
                    "symbol": "AAPL",
                    "gmtoffset": -18000,
                    "exchangeTimezoneName": "America/New_York"
                },
                "timestamp": [1709562600, 1709649000, 1709735400, 1709735460],
                "events": {
                    "dividends": { "1709649000": { "amount": 0.24, "date": 1709649000 } }
                },
                "indicators": {
                    "quote": [{
                        "open": [176.15, 170.76, 171.06, 171.1],
                        "high": [176.9, 172.04, 171.24, 171.3],
                        "low": [173.79, 169.62, 168.68, 168.7],
                        "close": [175.1, null, 169.12, 169.5],
                        "volume": [81510100, 95132400, 68587700, 68600000]
                    }],
                    "adjclose": [{ "adjclose": [174.4, 169.4, 168.4, 168.8] }]
                }
            }],
            "error": null
        }
    }"#;

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_chart_into_series() {
        let history: PriceHistory = serde_json::from_str(CHART).unwrap();
        let series = history.into_series().unwrap().unwrap();

        assert_eq!(series.index(), &[at(4), at(5), at(6)]);
        assert_eq!(
            series.column(Field::Close).unwrap(),
            &[Some(175.1), None, Some(169.5)]
        );
        assert_eq!(series.value(Field::Volume, 2), Some(68_600_000.0));
        assert_eq!(
            series.column(Field::Dividends).unwrap(),
            &[Some(0.0), Some(0.24), Some(0.0)]
        );
        assert_eq!(series.value(Field::StockSplits, 0), Some(0.0));
    }

    #[test]
    fn test_not_found_is_no_data() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let history: PriceHistory = serde_json::from_str(body).unwrap();
        assert!(history.chart.error.is_some());
        assert!(history.into_series().unwrap().is_none());
    }

    #[test]
    fn test_empty_range_is_no_data() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let history: PriceHistory = serde_json::from_str(body).unwrap();
        assert!(history.into_series().unwrap().is_none());
    }

    // winter gmtoffset, bars at local midnight on both sides of the March switch
    const BERLIN: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "gmtoffset": 3600, "exchangeTimezoneName": "Europe/Berlin" },
                "timestamp": [1704063600, 1719784800],
                "events": { "dividends": { "1719784800": { "amount": 1.5, "date": 1719784800 } } },
                "indicators": { "quote": [{ "close": [100.0, 110.0], "volume": [10, 20] }] }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_summer_bar_keeps_its_local_date() {
        let history: PriceHistory = serde_json::from_str(BERLIN).unwrap();
        let series = history.into_series().unwrap().unwrap();

        let day = |m, d| {
            NaiveDate::from_ymd_opt(2024, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        assert_eq!(series.index(), &[day(1, 1), day(7, 1)]);
        assert_eq!(
            series.column(Field::Dividends).unwrap(),
            &[Some(0.0), Some(1.5)]
        );
    }

    #[test]
    fn test_zone_falls_back_to_gmtoffset() {
        let named: Meta = serde_json::from_str(r#"{"gmtoffset": 3600, "exchangeTimezoneName": "Europe/Berlin"}"#).unwrap();
        assert_eq!(named.zone(), Zone::Named(chrono_tz::Europe::Berlin));

        let unknown: Meta = serde_json::from_str(r#"{"gmtoffset": 3600, "exchangeTimezoneName": "Mars/Olympus"}"#).unwrap();
        assert_eq!(unknown.zone(), Zone::Fixed(3600));

        let missing: Meta = serde_json::from_str(r#"{"gmtoffset": -18000}"#).unwrap();
        assert_eq!(missing.zone(), Zone::Fixed(-18000));

        // 2024-07-01 00:00 CEST is still June 30 at the winter offset
        assert_eq!(
            local_day(1719784800, Zone::Fixed(3600)).unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
    }
}

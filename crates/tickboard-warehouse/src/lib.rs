//! Data acquisition for the dashboard: Yahoo Finance price history, the
//! memoized acquisition batch, the workbook export and the per-selection cycle.

pub mod acquire;
pub mod cache;
pub mod config;
pub mod cycle;
pub mod export;
pub mod lookback;
pub mod tui;
pub mod yahoo;

pub use acquire::acquire;
pub use cache::{AcquireKey, AcquisitionCache};
pub use config::Settings;
pub use cycle::{run_cycle, Cycle, SELECTION_PROMPT};
pub use lookback::Lookback;
pub use yahoo::{PriceSource, YahooFinance};

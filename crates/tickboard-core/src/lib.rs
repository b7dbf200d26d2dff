//! Price series model and the transformations between data acquisition and
//! rendering: window filtering, revenue derivation, price matrix realignment
//! and KPI aggregation.

pub mod catalog;
pub mod dashboard;
pub mod filter;
pub mod glyph;
pub mod kpi;
pub mod matrix;
pub mod revenue;
pub mod selection;
pub mod series;
pub mod window;

pub use catalog::{symbol_from_label, Catalog, CatalogEntry};
pub use dashboard::{build_view, build_view_at, DashboardView, Notice};
pub use filter::{filter_by_window, filter_by_window_at, Filtered};
pub use kpi::{calculate_kpis, Kpi, KpiTable, Summary};
pub use matrix::{extract_price_matrix, PriceMatrix, SINGLE_SERIES_LABEL};
pub use revenue::derive_revenue;
pub use selection::Selection;
pub use series::{Column, Field, Series, SeriesError, SeriesSet};
pub use window::TimeWindow;

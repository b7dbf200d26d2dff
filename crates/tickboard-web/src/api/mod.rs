use actix_web::web;
use tickboard_warehouse::{AcquisitionCache, Settings, YahooFinance};
use tokio::sync::Mutex;

pub mod catalog;
pub mod dashboard;

/// Shared across workers; the cache lock keeps dashboard cycles one at a time.
pub struct AppState {
    pub settings: Settings,
    pub source: YahooFinance,
    pub cache: Mutex<AcquisitionCache>,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let source = YahooFinance::new(&settings.user_agent)?;
        Ok(Self {
            settings,
            source,
            cache: Mutex::new(AcquisitionCache::new()),
        })
    }
}

/// API endpoints & the dashboard page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard::page)
        .service(catalog::catalog)
        .service(dashboard::dashboard);
}

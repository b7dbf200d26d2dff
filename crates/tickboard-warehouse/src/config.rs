use crate::cache::AcquireKey;
use crate::lookback::Lookback;
use anyhow::{Context, Result};
use dotenv::var;
use std::path::{Path, PathBuf};
use tickboard_core::Catalog;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const DEFAULT_EXPORT: &str = "tickboard-export.xlsx";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Startup configuration shared by the CLI and the web server.
///
/// Read from the environment (and `.env`, once the host has loaded it):
///
/// | variable              | default                  |
/// |-----------------------|--------------------------|
/// | `USER_AGENT`          | a desktop browser string |
/// | `TICKBOARD_CATALOG`   | built-in catalog         |
/// | `TICKBOARD_EXPORT`    | `tickboard-export.xlsx`; `none` disables |
/// | `TICKBOARD_LOOKBACK`  | `5y`                     |
/// | `TICKBOARD_ADDR`      | `127.0.0.1:8080`         |
#[derive(Debug, Clone)]
pub struct Settings {
    pub user_agent: String,
    pub catalog: Catalog,
    pub export: Option<PathBuf>,
    pub lookback: Lookback,
    pub addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            catalog: Catalog::builtin(),
            export: Some(PathBuf::from(DEFAULT_EXPORT)),
            lookback: Lookback::default(),
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let mut settings = Settings::default();

        if let Ok(user_agent) = var("USER_AGENT") {
            settings.user_agent = user_agent;
        }
        if let Ok(path) = var("TICKBOARD_CATALOG") {
            settings.catalog = load_catalog(Path::new(&path))?;
        }
        if let Ok(export) = var("TICKBOARD_EXPORT") {
            settings.export = parse_export(&export);
        }
        if let Ok(lookback) = var("TICKBOARD_LOOKBACK") {
            settings.lookback = lookback
                .parse()
                .context("failed to read TICKBOARD_LOOKBACK")?;
        }
        if let Ok(addr) = var("TICKBOARD_ADDR") {
            settings.addr = addr;
        }

        debug!("settings loaded: {settings:?}");
        Ok(settings)
    }

    /// Memoization key of this configuration's acquisition.
    pub fn acquire_key(&self) -> AcquireKey {
        AcquireKey {
            catalog: self.catalog.clone(),
            export: self.export.clone(),
            lookback: self.lookback,
        }
    }
}

/// `""` and `"none"` switch the export off.
pub fn parse_export(value: &str) -> Option<PathBuf> {
    match value.trim() {
        "" => None,
        v if v.eq_ignore_ascii_case("none") => None,
        v => Some(PathBuf::from(v)),
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    debug!("{} catalog entries read from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_export() {
        assert_eq!(parse_export(""), None);
        assert_eq!(parse_export("None"), None);
        assert_eq!(parse_export("out/prices.xlsx"), Some(PathBuf::from("out/prices.xlsx")));
    }

    #[test]
    fn test_load_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"symbol": "SAP", "description": "SAP SE"}}]"#).unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.description("SAP"), Some("SAP SE"));

        assert!(load_catalog(Path::new("/definitely/not/here.json")).is_err());
    }

    #[test]
    fn test_acquire_key_follows_settings() {
        let mut settings = Settings::default();
        let before = settings.acquire_key();
        settings.lookback = Lookback::OneYear;
        assert_ne!(before, settings.acquire_key());
    }
}

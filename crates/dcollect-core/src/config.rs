use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Transport settings loaded from `~/.config/dcollect/config.toml`.
///
/// Every limit is optional; `None` leaves the libcurl default in place
/// (no overall timeout, curl's own redirect cap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// `User-Agent` sent with every network request.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Connect timeout in seconds.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum number of redirects followed.
    #[serde(default)]
    pub max_redirects: Option<u32>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(format!("dcollect/{}", env!("CARGO_PKG_VERSION"))),
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirects: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dcollect")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CollectorConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CollectorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CollectorConfig = toml::from_str(&data)?;
    Ok(cfg)
}

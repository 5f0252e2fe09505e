// ⚙️ Configuration - Optional JSON file with defaults
//
// Lookup order: explicit --config path, then the platform config dir
// (~/.config/skill-tracker/config.json on Linux). A missing file means
// defaults; a malformed one is an error.

use crate::error::{Result, TrackerError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the placeholder server binds to
    pub server_addr: String,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,

    /// Where the TUI writes its log file
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            log_dir: std::env::temp_dir(),
        }
    }
}

impl AppConfig {
    /// Default config file location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "skill-tracker").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when `path` is None
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load config from file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parsed server address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.server_addr
            .parse()
            .map_err(|e| TrackerError::Config(format!("server_addr {:?}: {}", self.server_addr, e)))
    }

    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.log_level.trim().is_empty() {
            return Err(TrackerError::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }
}

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "STORE_DATA_DIR";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub naming: NamingConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), naming: NamingConfig::default() }
    }
}

/// File name prefixes per store type, joined to a suffix by `separator`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NamingConfig {
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_storage_prefix")]
    pub storage: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self { separator: default_separator(), storage: default_storage_prefix() }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_separator() -> String { "-".into() }
fn default_storage_prefix() -> String { "storage".into() }

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let path = Path::new(&path);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(path)
}

pub fn load_from_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.naming.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if self.data_dir.as_os_str().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}

impl NamingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(anyhow!("storage.naming.separator must not be empty"));
        }
        if self.storage.trim().is_empty() {
            return Err(anyhow!("storage.naming.storage must not be empty"));
        }
        for (field, value) in [("separator", &self.separator), ("storage", &self.storage)] {
            if value.contains(['/', '\\']) {
                return Err(anyhow!("storage.naming.{field} must not contain path separators"));
            }
        }
        Ok(())
    }
}

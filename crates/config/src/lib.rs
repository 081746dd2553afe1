use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const APP_NAME: &str = "invoice-form";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the sled database holding the saved form.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_db_path() -> String {
    ".invoice_form".to_string()
}

fn default_export_dir() -> String {
    ".".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

pub fn load() -> Result<AppConfig> {
    let cfg: AppConfig = confy::load(APP_NAME, None).context("Failed to load app config")?;
    Ok(cfg)
}

pub fn store(cfg: &AppConfig) -> Result<()> {
    confy::store(APP_NAME, None, cfg).context("Failed to store app config")?;
    Ok(())
}

/// Where `load`/`store` keep the configuration file.
pub fn config_path() -> Result<std::path::PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).context("Failed to locate app config")
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    confy::load_path(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

pub fn store_to(path: &Path, cfg: &AppConfig) -> Result<()> {
    confy::store_path(path, cfg)
        .with_context(|| format!("Failed to store config to {}", path.display()))
}

impl AppConfig {
    /// Apply command-line overrides; returns whether anything changed.
    pub fn apply_overrides(
        &mut self,
        db_path: Option<String>,
        export_dir: Option<String>,
        log_filter: Option<String>,
    ) -> bool {
        let mut changed = false;
        if let Some(db_path) = db_path {
            changed |= self.storage.db_path != db_path;
            self.storage.db_path = db_path;
        }
        if let Some(dir) = export_dir {
            changed |= self.export.directory != dir;
            self.export.directory = dir;
        }
        if let Some(filter) = log_filter {
            changed |= self.logging.filter != filter;
            self.logging.filter = filter;
        }
        changed
    }
}

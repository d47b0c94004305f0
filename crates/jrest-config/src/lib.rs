//! Inventory loading for jrest tools.
//!
//! Reads the YAML device inventory, validates it into a
//! `jrest_api::Registry`, and resolves the default file location.
//! Loading happens exactly once at process start; the registry is then
//! passed by reference into the action layer. A missing file or failed
//! validation is fatal.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Yaml},
};
use serde::Deserialize;
use thiserror::Error;

use jrest_api::{DeviceSpec, Registry};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no inventory file found (expected at {path})")]
    NotFound { path: String },

    #[error("inventory loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error(transparent)]
    Invalid(#[from] jrest_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Inventory file shape ────────────────────────────────────────────

/// Top-level structure of the inventory file.
#[derive(Debug, Deserialize)]
struct InventoryFile {
    devices: Vec<DeviceSpec>,
}

// ── Path resolution ─────────────────────────────────────────────────

/// The default inventory path: `<config dir>/jrest/inventory.yaml`,
/// with an `inventory.yml` fallback.
pub fn default_inventory_path() -> PathBuf {
    let dir = ProjectDirs::from("", "", "jrest")
        .map_or_else(|| PathBuf::from("."), |dirs| dirs.config_dir().to_path_buf());

    let yaml = dir.join("inventory.yaml");
    if yaml.exists() {
        return yaml;
    }
    let yml = dir.join("inventory.yml");
    if yml.exists() {
        return yml;
    }
    yaml
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load and validate the inventory.
///
/// `path` overrides the default location (`--inventory` flag or
/// `JREST_INVENTORY` env var at the CLI layer).
pub fn load(path: Option<&Path>) -> Result<Registry, ConfigError> {
    let path = path.map_or_else(default_inventory_path, Path::to_path_buf);

    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    tracing::debug!(path = %path.display(), "loading inventory");

    let inventory: InventoryFile = Figment::from(Yaml::file(&path)).extract()?;
    let registry = Registry::from_entries(inventory.devices)?;

    tracing::debug!(devices = registry.len(), "inventory loaded");
    Ok(registry)
}

use crate::format::DisplayFormat;
use crate::location::{FixedLocation, Permission};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocmemoConfig {
    pub database: Option<String>,
    /// Answer given to foreground location access requests
    #[serde(default)]
    pub permission: Permission,
    pub location: Option<LocationConfig>,
    #[serde(default)]
    pub display: DisplayFormat,
}

/// Position reported when no coordinates are given on the command line
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocmemoConfig {
    pub fn location_provider(&self) -> FixedLocation {
        match self.location {
            Some(loc) => FixedLocation::new(loc.latitude, loc.longitude),
            None => FixedLocation::unavailable(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("locmemo.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".locmemo").join("locmemo.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<LocmemoConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LocmemoConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &LocmemoConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

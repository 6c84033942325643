use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeptaConfig {
    /// Base URL of the Hepta-Conexiones server, e.g. "http://localhost:5000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Theme applied at startup ("dark" or "light"); toggling in the UI
    /// persists the choice server-side and here.
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for HeptaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: default_theme(),
        }
    }
}

impl HeptaConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("hepta-tui")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: HeptaConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.theme, "dark");

        let config: HeptaConfig =
            toml::from_str("api_url = \"https://conexiones.example\"").unwrap();
        assert_eq!(config.api_url, "https://conexiones.example");
        assert_eq!(config.theme, "dark");
    }
}

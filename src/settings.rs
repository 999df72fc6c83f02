use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LensError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub export_dir: String,
    #[serde(default = "default_chart")]
    pub default_chart: String,
}

fn default_chart() -> String {
    "bar".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir().to_string_lossy().to_string(),
            default_chart: default_chart(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("sheetlens")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_export_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("sheetlens")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| LensError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_export_dir() -> PathBuf {
    PathBuf::from(&load_settings().export_dir)
}

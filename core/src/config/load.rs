use std::path::{Path, PathBuf};

use super::types::AppConfig;

pub const API_URL_ENV: &str = "FINORA_API_URL";

/// Get the default finora data directory: ~/.finora
pub fn get_finora_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".finora"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.finora/config.toml
    let finora_dir = get_finora_data_dir()?;
    let finora_config = finora_dir.join("config.toml");

    // Priority 2: ./config.toml
    let local_config = Path::new("config.toml");

    let cfg = if finora_config.exists() {
        load_from_path(&finora_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    Ok(finalize(
        cfg,
        &finora_dir,
        std::env::var(API_URL_ENV).ok().as_deref(),
    ))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

fn is_unset(dir: &Option<String>) -> bool {
    dir.as_ref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// Fill directories under `data_dir` and apply the API URL override.
pub(crate) fn finalize(
    mut cfg: AppConfig,
    data_dir: &Path,
    api_url_override: Option<&str>,
) -> AppConfig {
    if is_unset(&cfg.session.directory) {
        cfg.session.directory = Some(data_dir.join("session").to_string_lossy().to_string());
    }
    if is_unset(&cfg.logging.directory) {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    if let Some(v) = api_url_override {
        if !v.trim().is_empty() {
            cfg.api.base_url = v.trim().to_string();
        }
    }

    cfg
}

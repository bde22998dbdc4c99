// ~/privshield/src/config.rs

use serde::{Deserialize, Serialize};
use std::{
    path::PathBuf,
    sync::{OnceLock, RwLock},
};
use crate::{info, warn, error};
use crate::paths::{app_root_dir, default_scripts_dir};

/// Persisted in privshield.yaml next to the executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Categories (`Privacy`) or single settings (`Cortana/Disable Bing in Windows Search`)
    /// checked when no explicit selection is given.
    #[serde(default = "default_preselect")]
    pub preselect: Vec<String>,

    /// Community scripts folder; defaults to `scripts` next to the executable.
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    /// Ask before reverting.
    #[serde(default = "default_true")]
    pub confirm_revert: bool,

    /// Write info-level lines to privshield.log.
    #[serde(default)]
    pub debug_log: bool,
}

fn default_preselect() -> Vec<String> {
    vec!["Privacy".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preselect: default_preselect(),
            scripts_dir: None,
            confirm_revert: true,
            debug_log: false,
        }
    }
}

impl AppConfig {
    pub fn scripts_dir(&self) -> PathBuf {
        self.scripts_dir.clone().unwrap_or_else(default_scripts_dir)
    }
}

static CONFIG: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn global_config() -> &'static RwLock<AppConfig> {
    CONFIG.get_or_init(|| RwLock::new(AppConfig::default()))
}

fn config_path() -> PathBuf {
    app_root_dir().join("privshield.yaml")
}

pub fn parse_config(text: &str) -> Result<AppConfig, serde_yaml::Error> {
    serde_yaml::from_str::<AppConfig>(text)
}

/// Load privshield.yaml from disk (or create defaults). Call once at startup.
pub fn load_config() -> AppConfig {
    let path = config_path();

    let cfg = if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(text) => match parse_config(&text) {
                Ok(c) => {
                    info!("Loaded config from {}", path.display());
                    c
                }
                Err(e) => {
                    warn!("Failed to parse privshield.yaml, using defaults: {e}");
                    AppConfig::default()
                }
            },
            Err(e) => {
                warn!("Failed to read privshield.yaml, using defaults: {e}");
                AppConfig::default()
            }
        }
    } else {
        info!("No privshield.yaml found, creating defaults at {}", path.display());
        let defaults = AppConfig::default();
        save_config_to_disk(&defaults);
        defaults
    };

    *global_config().write().unwrap_or_else(|e| e.into_inner()) = cfg.clone();
    cfg
}

/// Snapshot of the in-memory config.
pub fn current_config() -> AppConfig {
    global_config().read().unwrap_or_else(|e| e.into_inner()).clone()
}

fn save_config_to_disk(cfg: &AppConfig) {
    let path = config_path();
    match serde_yaml::to_string(cfg) {
        Ok(text) => {
            if let Err(e) = std::fs::write(&path, text) {
                error!("Failed to write privshield.yaml: {e}");
            }
        }
        Err(e) => error!("Failed to serialize config: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.preselect, ["Privacy"]);
        assert!(cfg.confirm_revert);
        assert!(!cfg.debug_log);
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = parse_config(
            "preselect:\n  - Cortana\n  - Security/Disable password reveal button\n\
             scripts_dir: C:/Tools/scripts\nconfirm_revert: false\ndebug_log: true\n",
        )
        .unwrap();
        assert_eq!(cfg.preselect, ["Cortana", "Security/Disable password reveal button"]);
        assert_eq!(cfg.scripts_dir(), PathBuf::from("C:/Tools/scripts"));
        assert!(!cfg.confirm_revert);
        assert!(cfg.debug_log);
    }

    #[test]
    fn scripts_dir_falls_back_next_to_exe() {
        assert_eq!(AppConfig::default().scripts_dir(), default_scripts_dir());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_config("preselect: [unterminated").is_err());
    }
}

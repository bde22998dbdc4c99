// ~/privshield/src/paths.rs

use std::path::{Path, PathBuf};
use crate::{info, warn};

/// Directory holding the executable; config, log and scripts live next to it.
pub fn app_root_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(path) => {
            if let Some(parent) = path.parent() {
                parent.to_path_buf()
            } else {
                warn!("Current executable has no parent, using current directory as app root");
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
        Err(e) => {
            warn!("Failed to get current executable path: {e}, using current directory as app root");
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

pub fn default_scripts_dir() -> PathBuf {
    app_root_dir().join("scripts")
}

/// Resolve a user supplied file for import.
///
/// Existing paths are taken as-is. A bare file name that does not exist in the
/// working directory is looked up on the user's Desktop, which is where the
/// import picker always started.
pub fn resolve_import_source(raw: &Path) -> PathBuf {
    if raw.exists() || raw.components().count() > 1 {
        return raw.to_path_buf();
    }

    match dirs_next::desktop_dir() {
        Some(desktop) => {
            let candidate = desktop.join(raw);
            if candidate.exists() {
                info!("Resolved '{}' on Desktop: {}", raw.display(), candidate.display());
                candidate
            } else {
                raw.to_path_buf()
            }
        }
        None => {
            warn!("Could not resolve Desktop directory");
            raw.to_path_buf()
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration resolution: explicit file, then the per-user default, then
// built-in defaults.

use std::path::{Path, PathBuf};

use pagewerk_core::config::AppConfig;
use pagewerk_core::error::Result;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.json";

/// Load the configuration for this run.
///
/// An explicit path must exist and parse. Without one, the per-user file is
/// used when present and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "Loading configuration");
        return AppConfig::load(path);
    }

    match user_config_path() {
        Some(path) if path.is_file() => {
            info!(path = %path.display(), "Loading user configuration");
            AppConfig::load(&path)
        }
        _ => {
            debug!("No configuration file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// `$XDG_CONFIG_HOME/pagewerk/config.json`, else `~/.config/pagewerk/config.json`.
fn user_config_path() -> Option<PathBuf> {
    config_dir_from(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
    .map(|dir| dir.join("pagewerk").join(CONFIG_FILE))
}

fn config_dir_from(xdg: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg.filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".config")))
}

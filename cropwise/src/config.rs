//! Configuration loading and model directory resolution
//!
//! Resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CROPWISE_MODEL_DIR`)
//! 3. TOML config file (`cropwise.toml` in the working directory, then
//!    the platform config directory)
//! 4. Compiled default (fallback)

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Fallback model directory when nothing else is configured.
pub const DEFAULT_MODEL_DIR: &str = "./model";

/// Environment variable naming the model directory.
pub const MODEL_DIR_ENV: &str = "CROPWISE_MODEL_DIR";

/// Fixed bind address; orchestration relies on the port being stable.
pub const BIND_ADDR: &str = "127.0.0.1:5740";

/// TOML configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub model_dir: Option<PathBuf>,
}

/// Resolve the model directory following the priority order above.
pub fn resolve_model_dir(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: environment variable
    if let Ok(path) = std::env::var(MODEL_DIR_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(config) = load_toml_config() {
        if let Some(path) = config.model_dir {
            return path;
        }
    }

    // Priority 4: compiled default
    PathBuf::from(DEFAULT_MODEL_DIR)
}

/// Find and parse the first config file that exists and parses.
///
/// A present-but-invalid file is skipped with a warning rather than
/// failing startup; the model directory default still applies.
fn load_toml_config() -> Option<TomlConfig> {
    for path in candidate_config_paths() {
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<TomlConfig>(&contents) {
                Ok(config) => return Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring unparsable config {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
            }
        }
    }
    None
}

fn candidate_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("cropwise.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("cropwise").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn cli_argument_wins_over_environment() {
        std::env::set_var(MODEL_DIR_ENV, "/from/env");
        let resolved = resolve_model_dir(Some(Path::new("/from/cli")));
        std::env::remove_var(MODEL_DIR_ENV);
        assert_eq!(resolved, PathBuf::from("/from/cli"));
    }

    #[test]
    #[serial]
    fn environment_wins_over_default() {
        std::env::set_var(MODEL_DIR_ENV, "/from/env");
        let resolved = resolve_model_dir(None);
        std::env::remove_var(MODEL_DIR_ENV);
        assert_eq!(resolved, PathBuf::from("/from/env"));
    }

    #[test]
    #[serial]
    fn default_applies_when_nothing_is_configured() {
        std::env::remove_var(MODEL_DIR_ENV);
        let resolved = resolve_model_dir(None);
        assert_eq!(resolved, PathBuf::from(DEFAULT_MODEL_DIR));
    }

    #[test]
    fn toml_config_parses_model_dir() {
        let config: TomlConfig = toml::from_str("model_dir = \"/opt/models\"").unwrap();
        assert_eq!(config.model_dir, Some(PathBuf::from("/opt/models")));
    }
}

//! Trove Configuration
//!
//! Loads and saves the runtime configuration from `~/.trove/trove.json`,
//! resolves the API credential, and reads declarative pipeline files.

use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::TroveError;
use crate::types::{default_config, PipelineConfig, TroveConfig};

/// Config file name within the trove directory.
const CONFIG_FILENAME: &str = "trove.json";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "TROVE_API_KEY";

/// Returns the trove configuration directory: `~/.trove`.
pub fn get_trove_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/root"))
        .join(".trove")
}

/// Returns the full path to the config file: `~/.trove/trove.json`.
pub fn get_config_path() -> PathBuf {
    get_trove_dir().join(CONFIG_FILENAME)
}

/// Load the trove config from disk.
///
/// Reads `~/.trove/trove.json` and merges missing fields with defaults.
/// Returns `None` if the config file does not exist or cannot be parsed.
pub fn load_config() -> Option<TroveConfig> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return None;
    }

    let contents = fs::read_to_string(&config_path).ok()?;
    let config: TroveConfig = serde_json::from_str(&contents).ok()?;

    Some(merge_defaults(config))
}

/// Merge defaults for unset fields of a parsed config.
pub fn merge_defaults(mut config: TroveConfig) -> TroveConfig {
    let defaults = default_config();

    if config.api_url.is_empty() {
        config.api_url = defaults.api_url;
    }
    if config.model.is_empty() {
        config.model = defaults.model;
    }
    if config.max_tokens == 0 {
        config.max_tokens = defaults.max_tokens;
    }
    if config.report_dir.is_empty() {
        config.report_dir = defaults.report_dir;
    }
    if config.version.is_empty() {
        config.version = defaults.version;
    }

    config
}

/// Save the trove config to disk at `~/.trove/trove.json`.
///
/// Creates the trove directory with mode 0o700 if it does not exist.
/// The config file is written with mode 0o600 since it may contain an
/// API key.
pub fn save_config(config: &TroveConfig) -> Result<()> {
    let dir = get_trove_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create trove directory")?;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
    }

    let config_path = get_config_path();
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&config_path, &json).context("Failed to write config file")?;
    fs::set_permissions(&config_path, fs::Permissions::from_mode(0o600))?;

    Ok(())
}

/// Resolve the API credential for a loaded config.
///
/// Order: the config file's `apiKey` value, then the `TROVE_API_KEY`
/// process environment variable (a `.env` file is folded into the
/// environment by the binary at startup). Absence is a fatal startup
/// condition for any component that calls the endpoint.
pub fn require_api_key(config: &TroveConfig) -> Result<String, TroveError> {
    if !config.api_key.is_empty() {
        return Ok(config.api_key.clone());
    }

    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(TroveError::MissingCredential),
    }
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's home
/// directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}

/// Load a declarative pipeline definition from a JSON file.
pub fn load_pipeline(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pipeline file {}", path.display()))?;
    let pipeline: PipelineConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse pipeline file {}", path.display()))?;

    Ok(pipeline)
}

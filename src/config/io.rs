// src/config/io.rs
use super::types::Config;
use crate::error::{CoverlabError, Result};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "coverlab.toml";

/// Parses TOML content into a config.
///
/// # Errors
/// Returns `Config` error on malformed TOML or mistyped fields.
pub fn parse_toml(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Reads and parses a config file.
///
/// # Errors
/// Returns `Io` if the file cannot be read, `Config` if it does not parse.
pub fn load_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| CoverlabError::io(e, path))?;
    parse_toml(&content)
}

/// Loads `explicit` if given (it must exist), otherwise `coverlab.toml`
/// from `dir` if present, otherwise the defaults.
///
/// # Errors
/// Returns error if a file that should be read cannot be read or parsed.
pub fn load_from(dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_file(path);
    }
    let default_path = dir.join(CONFIG_FILE);
    if default_path.exists() {
        load_file(&default_path)
    } else {
        Ok(Config::default())
    }
}

/// Serializes a config back to TOML.
///
/// # Errors
/// Returns `InvalidParameter` if serialization fails.
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| CoverlabError::invalid(e.to_string()))
}

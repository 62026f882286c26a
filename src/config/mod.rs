// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, OutputConfig};
use crate::error::Result;
use std::path::Path;

impl Config {
    /// Loads `--config <path>` if given, else `coverlab.toml` in the current
    /// directory, else defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        io::load_from(Path::new("."), explicit)
    }

    /// # Errors
    /// Returns error on malformed TOML.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content)
    }

    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        io::to_toml(self)
    }
}

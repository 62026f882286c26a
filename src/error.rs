// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::graph::GraphFamily;

#[derive(Debug, Error)]
pub enum CoverlabError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid network shape: {0}")]
    InvalidNetwork(String),

    #[error("Label {label} out of range for {classes} classes")]
    InvalidLabel { label: usize, classes: usize },

    #[error("Graph is not connected")]
    Disconnected,

    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("No connected {family} graph after {attempts} attempts")]
    GenerationExhausted { family: GraphFamily, attempts: usize },

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoverlabError>;

impl CoverlabError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

// Allow `?` on std::io::Error by converting to CoverlabError::Io with unknown path.
impl From<std::io::Error> for CoverlabError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

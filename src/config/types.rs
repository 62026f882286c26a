// src/config/types.rs
use crate::animate::AnimationConfig;
use crate::bench::{BenchConfig, SweepConfig};
use crate::classify::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of `coverlab.toml`. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classify: SearchConfig,
    pub bench: BenchConfig,
    pub sweep: SweepConfig,
    pub animate: AnimationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_true")]
    pub plots: bool,
    #[serde(default = "default_true")]
    pub events: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            plots: true,
            events: true,
        }
    }
}

fn default_dir() -> PathBuf { PathBuf::from("coverlab-out") }
fn default_true() -> bool { true }

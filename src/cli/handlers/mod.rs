// src/cli/handlers/mod.rs
//! Subcommand handlers and the state they share.

pub mod animate;
pub mod bench;
pub mod classify;
pub mod walk;

use super::args::GlobalArgs;
use crate::config::Config;
use crate::events::{EventKind, EventLogger};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Effective settings for one invocation: the loaded config with global
/// flags applied on top.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    pub logger: EventLogger,
    pub verbose: bool,
    pub json: bool,
    pub plots: bool,
    pub out_dir: PathBuf,
    seed: Option<u64>,
}

impl RunContext {
    /// Loads the config file and applies `global`.
    ///
    /// # Errors
    /// Returns error if the config file exists but cannot be read or parsed.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let config = Config::load(global.config.as_deref()).context("failed to load config")?;
        Ok(Self::from_config(config, global))
    }

    #[must_use]
    pub fn from_config(config: Config, global: &GlobalArgs) -> Self {
        let out_dir = global
            .out
            .clone()
            .unwrap_or_else(|| config.output.dir.clone());
        let logger = if config.output.events {
            EventLogger::new(&out_dir)
        } else {
            EventLogger::disabled()
        };
        Self {
            plots: config.output.plots && !global.no_plots,
            verbose: global.verbose,
            json: global.json,
            seed: global.seed,
            logger,
            out_dir,
            config,
        }
    }

    /// `--seed` if given, else the seed of the command's config section.
    #[must_use]
    pub fn seed_for(&self, command: &str) -> u64 {
        self.seed.unwrap_or(match command {
            "classify" => self.config.classify.seed,
            "bench" => self.config.bench.seed,
            "sweep" => self.config.sweep.seed,
            "animate" => self.config.animate.seed,
            _ => 0,
        })
    }

    /// Draws one figure under the output directory unless plots are off.
    ///
    /// # Errors
    /// Returns error if the figure cannot be written.
    pub fn plot<F>(&self, relative: &Path, draw: F) -> Result<()>
    where
        F: FnOnce(&Path) -> crate::error::Result<()>,
    {
        if !self.plots {
            return Ok(());
        }
        let path = self.out_dir.join(relative);
        draw(&path).with_context(|| format!("failed to write {}", path.display()))?;
        self.logger.log(EventKind::PlotWritten {
            path: path.display().to_string(),
        });
        if !self.json {
            println!("  {} {}", "wrote".dimmed(), path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.bench.seed = 7;
        config.output.events = false;
        let global = GlobalArgs {
            seed: Some(99),
            no_plots: true,
            out: Some(PathBuf::from("elsewhere")),
            ..GlobalArgs::default()
        };
        let ctx = RunContext::from_config(config.clone(), &global);
        assert_eq!(ctx.seed_for("bench"), 99);
        assert!(!ctx.plots);
        assert_eq!(ctx.out_dir, PathBuf::from("elsewhere"));
        assert!(ctx.logger.path().is_none());

        let ctx = RunContext::from_config(config, &GlobalArgs::default());
        assert_eq!(ctx.seed_for("bench"), 7);
        assert!(ctx.plots);
    }
}

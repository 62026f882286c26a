// src/cli/handlers/animate.rs
use super::RunContext;
use crate::animate::{AnimationConfig, Scene};
use crate::cli::args::AnimateArgs;
use crate::exit::CoverlabExit;
use anyhow::{Context, Result};

/// Handles the animate command. With `--json` (or without the `tui`
/// feature) the scene is printed instead of played.
///
/// # Errors
/// Returns error if the scene cannot be built or the terminal fails.
pub fn handle_animate(ctx: &RunContext, args: &AnimateArgs) -> Result<CoverlabExit> {
    let mut config: AnimationConfig = ctx.config.animate.clone();
    if let Some(nodes) = args.nodes {
        config.nodes = nodes;
    }
    if let Some(connections) = args.connections {
        config.connections = connections;
    }
    if let Some(interval) = args.interval {
        config.interval_ms = interval;
    }
    config.seed = ctx.seed_for("animate");

    let scene = Scene::build(&config).context("failed to build animation scene")?;

    if ctx.json || !cfg!(feature = "tui") {
        println!("{}", serde_json::to_string(&scene)?);
        return Ok(CoverlabExit::Success);
    }

    play(&scene, &config)?;
    Ok(CoverlabExit::Success)
}

#[cfg(feature = "tui")]
fn play(scene: &Scene, config: &AnimationConfig) -> Result<()> {
    crate::tui::run_animation(scene, std::time::Duration::from_millis(config.interval_ms))
}

#[cfg(not(feature = "tui"))]
fn play(_scene: &Scene, _config: &AnimationConfig) -> Result<()> {
    Ok(())
}

// src/tui/mod.rs
pub mod animation;
pub mod runner;

use crate::animate::Scene;
use anyhow::Result;
use std::time::Duration;

/// Plays `scene` in the terminal until the user quits.
///
/// # Errors
/// Returns error if terminal setup fails or IO error occurs.
pub fn run_animation(scene: &Scene, interval: Duration) -> Result<()> {
    animation::run(scene, interval)
}

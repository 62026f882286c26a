// src/cli/dispatch.rs
//! Runs one parsed subcommand and records its start and outcome in the event log.

use super::args::{Commands, GlobalArgs};
use super::handlers::{self, RunContext};
use crate::events::EventKind;
use crate::exit::CoverlabExit;
use anyhow::Result;
use std::time::Instant;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the config cannot be loaded or the command handler fails.
pub fn execute(command: Commands, global: &GlobalArgs) -> Result<CoverlabExit> {
    let ctx = RunContext::load(global)?;
    let name = command_name(&command);
    let seed = ctx.seed_for(name);

    ctx.logger.log(EventKind::RunStarted {
        command: name.to_string(),
        seed,
    });
    let started = Instant::now();

    let result = match command {
        Commands::Classify(args) => handlers::classify::handle_classify(&ctx, &args),
        Commands::Bench(args) => handlers::bench::handle_bench(&ctx, &args),
        Commands::Sweep(args) => handlers::bench::handle_sweep(&ctx, &args),
        Commands::Walk(args) => handlers::walk::handle_walk(&ctx, &args),
        Commands::Animate(args) => handlers::animate::handle_animate(&ctx, &args),
    };

    match &result {
        Ok(_) => ctx.logger.log(EventKind::RunFinished {
            command: name.to_string(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }),
        Err(e) => ctx.logger.log(EventKind::RunFailed {
            command: name.to_string(),
            error: format!("{e:#}"),
        }),
    }
    result
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Classify(_) => "classify",
        Commands::Bench(_) => "bench",
        Commands::Sweep(_) => "sweep",
        Commands::Walk(_) => "walk",
        Commands::Animate(_) => "animate",
    }
}

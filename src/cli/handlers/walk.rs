// src/cli/handlers/walk.rs
use super::RunContext;
use crate::bench::{average_cover_time, report, SweepRow};
use crate::cli::args::WalkArgs;
use crate::exit::CoverlabExit;
use crate::graph::FamilySpec;
use crate::rng;
use crate::walk::Strategy;
use anyhow::{Context, Result};

/// Handles the walk command: every requested strategy on fresh graphs of one
/// family, averaged over `runs`.
///
/// # Errors
/// Returns error for impossible graph parameters or when no connected graph
/// can be drawn.
pub fn handle_walk(ctx: &RunContext, args: &WalkArgs) -> Result<CoverlabExit> {
    let strategies = if args.strategies.is_empty() {
        vec![
            Strategy::Random,
            Strategy::Explore,
            Strategy::Dfs,
            Strategy::NonBacktracking,
        ]
    } else {
        args.strategies.clone()
    };
    let spec = FamilySpec::new(args.family, args.nodes, args.connections);
    let seed = ctx.seed_for("walk");

    let mut rows = Vec::with_capacity(strategies.len());
    for (i, &strategy) in strategies.iter().enumerate() {
        let mut rng = rng::seeded(seed, &[i as u64]);
        let average = average_cover_time(&spec, strategy, args.runs, args.attempts, &mut rng)
            .with_context(|| format!("{strategy} on {} failed", args.family))?;
        rows.push(SweepRow {
            nodes: args.nodes,
            connections: args.connections,
            family: args.family,
            strategy,
            runs: args.runs,
            average,
        });
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", report::format_sweep(&rows));
    }
    Ok(CoverlabExit::Success)
}

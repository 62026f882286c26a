// src/cli/handlers/bench.rs
use super::RunContext;
use crate::bench::{self, report, BenchConfig, SweepConfig};
use crate::cli::args::{BenchArgs, SweepArgs};
use crate::events::EventKind;
use crate::exit::CoverlabExit;
use crate::graph::layout::DEFAULT_ITERATIONS;
use crate::graph::spring_layout;
use crate::plot;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handles the bench command.
///
/// # Errors
/// Returns error if the benchmark or its figure fails.
pub fn handle_bench(ctx: &RunContext, args: &BenchArgs) -> Result<CoverlabExit> {
    let config = bench_config(ctx, args);
    let total = config.cells().len();
    let done = AtomicUsize::new(0);

    if !ctx.json {
        println!(
            "{}",
            format!(
                "Benchmarking {total} cells x {} trials ({} families, {} strategies)",
                config.trials,
                config.families.len(),
                config.strategies.len()
            )
            .bold()
        );
    }

    let result = bench::run_bench(&config, |cell| {
        let i = done.fetch_add(1, Ordering::Relaxed) + 1;
        if ctx.verbose && !ctx.json {
            println!("[{i}/{total}]{}", report::format_cell(cell));
        }
        let samples = cell.totals.iter().map(|t| t.3).sum();
        ctx.logger.log(EventKind::BenchCellFinished {
            nodes: cell.nodes,
            connections: cell.connections,
            samples,
        });
        for &(family, count) in &cell.rejected {
            if count > 0 {
                ctx.logger.log(EventKind::GenerationRejected {
                    family,
                    nodes: cell.nodes,
                    connections: cell.connections,
                    count,
                });
            }
        }
    })
    .context("benchmark failed")?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::format_bench(&result));
    }
    ctx.plot(Path::new("bench/cover_times.svg"), |path| {
        plot::bench_grid(path, &result)
    })?;
    Ok(CoverlabExit::Success)
}

fn bench_config(ctx: &RunContext, args: &BenchArgs) -> BenchConfig {
    let mut config = ctx.config.bench.clone();
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if !args.nodes.is_empty() {
        config.node_counts.clone_from(&args.nodes);
    }
    if !args.connections.is_empty() {
        config.connection_counts.clone_from(&args.connections);
    }
    config.seed = ctx.seed_for("bench");
    config
}

/// Handles the sweep command.
///
/// # Errors
/// Returns error if the sweep fails.
pub fn handle_sweep(ctx: &RunContext, args: &SweepArgs) -> Result<CoverlabExit> {
    let mut config: SweepConfig = ctx.config.sweep.clone();
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if !args.nodes.is_empty() {
        config.node_counts.clone_from(&args.nodes);
    }
    config.seed = ctx.seed_for("sweep");

    let sweep = bench::run_sweep(&config).context("sweep failed")?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&sweep.rows)?);
    } else {
        print!("{}", report::format_sweep(&sweep.rows));
    }
    for preview in &sweep.previews {
        let path = Path::new("sweep").join(preview.file_name());
        ctx.plot(&path, |p| {
            let layout = spring_layout(&preview.graph, DEFAULT_ITERATIONS, config.seed);
            plot::graph_preview(p, &preview.graph, &layout, &preview.title())
        })?;
    }
    Ok(CoverlabExit::Success)
}

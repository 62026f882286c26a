// src/cli/handlers/classify.rs
use super::RunContext;
use crate::classify::{self, report, SearchConfig, SearchReport};
use crate::cli::args::ClassifyArgs;
use crate::events::EventKind;
use crate::exit::CoverlabExit;
use crate::plot;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Handles the classify command.
///
/// # Errors
/// Returns error if a search or a figure fails.
pub fn handle_classify(ctx: &RunContext, args: &ClassifyArgs) -> Result<CoverlabExit> {
    let config = search_config(ctx, args);
    let mut reports = Vec::with_capacity(config.nodes.len());

    for &nodes in &config.nodes {
        if !ctx.json {
            println!("{}", report::format_header(nodes, config.noisy));
        }
        let search = classify::run_search(&config, nodes, |trial| {
            if !ctx.json {
                println!("{}", report::format_trial(trial));
                if ctx.verbose {
                    print!("{}", report::format_epochs(trial));
                }
            }
            ctx.logger.log(EventKind::TrialFinished {
                nodes,
                architecture: trial.architecture.clone(),
                eta: trial.eta,
                accuracy: trial.final_accuracy,
            });
        })
        .with_context(|| format!("search for {nodes}x{nodes} graphs failed"))?;

        if !ctx.json {
            print!("{}", report::format_summary(&search));
        }
        write_figures(ctx, &search)?;
        reports.push(search);
    }

    if ctx.json {
        println!("{}", report::format_json(&reports)?);
    }
    Ok(CoverlabExit::Success)
}

fn search_config(ctx: &RunContext, args: &ClassifyArgs) -> SearchConfig {
    let mut config = ctx.config.classify.clone();
    if !args.nodes.is_empty() {
        config.nodes.clone_from(&args.nodes);
    }
    config.noisy |= args.noisy;
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(n) = args.train_per_class {
        config.train_per_class = n;
    }
    if let Some(n) = args.test_per_class {
        config.test_per_class = n;
    }
    config.seed = ctx.seed_for("classify");
    config
}

fn write_figures(ctx: &RunContext, search: &SearchReport) -> Result<()> {
    let n = search.nodes;
    let dir = PathBuf::from("classify").join(format!("{n}x{n}"));

    let mut curves = vec![("best", search.best_trial())];
    if search.worst != search.best {
        curves.push(("worst", search.worst_trial()));
    }
    for (tag, trial) in curves {
        let title = if tag == "best" { "Best" } else { "Worst" };
        ctx.plot(&dir.join(format!("{tag}_mse.svg")), |path| {
            plot::line_chart(path, &trial.history.cost, &format!("{title} MSE ({n}x{n})"), "MSE")
        })?;
        ctx.plot(&dir.join(format!("{tag}_accuracy.svg")), |path| {
            plot::line_chart(
                path,
                &trial.history.accuracy,
                &format!("{title} Accuracy ({n}x{n})"),
                "Accuracy",
            )
        })?;
    }

    let averages = [
        ("average_directed.svg", "Directed", &search.average_directed),
        ("average_undirected.svg", "Undirected", &search.average_undirected),
    ];
    for (file, kind, grid) in averages {
        let Some(grid) = grid else {
            continue;
        };
        ctx.plot(&dir.join(file), |path| {
            plot::heatmap(path, grid, &format!("Average {kind} Graph ({n}x{n})"))
        })?;
    }
    Ok(())
}

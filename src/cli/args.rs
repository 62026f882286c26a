use crate::graph::GraphFamily;
use crate::walk::Strategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coverlab",
    version,
    about = "Graph classification and cover-time experiments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every subcommand. Values given here override
/// `coverlab.toml`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Print per-epoch and per-cell progress
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file to read instead of ./coverlab.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Base seed for every random draw
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
    /// Skip writing SVG figures
    #[arg(long, global = true)]
    pub no_plots: bool,
    /// Directory for figures and the event log
    #[arg(long, global = true, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train networks to tell directed from undirected adjacency matrices
    Classify(ClassifyArgs),
    /// Cover-time benchmark over node and connection counts
    Bench(BenchArgs),
    /// Simple graph vs multigraph cover-time table
    Sweep(SweepArgs),
    /// Average cover time of each strategy on one graph family
    Walk(WalkArgs),
    /// Play traversals side by side in the terminal
    Animate(AnimateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Matrix size; repeat for several searches
    #[arg(long = "nodes", value_name = "N")]
    pub nodes: Vec<usize>,
    /// Train and test on noisy matrices
    #[arg(long)]
    pub noisy: bool,
    #[arg(long)]
    pub epochs: Option<usize>,
    #[arg(long)]
    pub train_per_class: Option<usize>,
    #[arg(long)]
    pub test_per_class: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BenchArgs {
    /// Graphs drawn per family per cell
    #[arg(long)]
    pub trials: Option<usize>,
    #[arg(long = "nodes", value_name = "N")]
    pub nodes: Vec<usize>,
    #[arg(long = "connections", value_name = "C")]
    pub connections: Vec<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SweepArgs {
    /// Runs averaged per configuration
    #[arg(long)]
    pub runs: Option<usize>,
    #[arg(long = "nodes", value_name = "N")]
    pub nodes: Vec<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct WalkArgs {
    #[arg(long, value_enum, default_value_t = GraphFamily::Simple)]
    pub family: GraphFamily,
    #[arg(long, default_value = "15")]
    pub nodes: usize,
    #[arg(long, default_value = "25")]
    pub connections: usize,
    /// Strategy to measure; repeat for several (default: all)
    #[arg(long = "strategy", value_enum)]
    pub strategies: Vec<Strategy>,
    #[arg(long, default_value = "10")]
    pub runs: usize,
    /// Draws allowed per graph before giving up on connectivity
    #[arg(long, default_value = "1000")]
    pub attempts: usize,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnimateArgs {
    #[arg(long)]
    pub nodes: Option<usize>,
    #[arg(long)]
    pub connections: Option<usize>,
    /// Milliseconds per frame
    #[arg(long)]
    pub interval: Option<u64>,
}

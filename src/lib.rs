pub mod adjacency;
pub mod animate;
pub mod bench;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod exit;
pub mod graph;
pub mod nn;
pub mod plot;
pub mod rng;
#[cfg(feature = "tui")]
pub mod tui;
pub mod walk;

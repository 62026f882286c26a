// src/classify/mod.rs
//! Directed-vs-undirected classification experiment.
//!
//! A hyper-parameter search: every hidden-layer layout is trained with every
//! learning rate on the same synthetic datasets, and the best and worst
//! trials (by final test accuracy) are reported.
//!
//! # Example
//!
//! ```ignore
//! coverlab classify --nodes 4 --nodes 10 --noisy
//! ```

pub mod confusion;
pub mod report;

pub use confusion::ConfusionMatrix;

use crate::adjacency::{self, Label, Sample};
use crate::error::{CoverlabError, Result};
use crate::nn::{vectorize_result, Network, SgdParams, TestExample, TrainingExample, TrainingHistory};
use crate::rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Search space and dataset sizes. Loaded from `[classify]` in `coverlab.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Matrix sizes; each gets its own search.
    pub nodes: Vec<usize>,
    pub noisy: bool,
    pub train_per_class: usize,
    pub test_per_class: usize,
    pub hidden_layers: Vec<Vec<usize>>,
    pub learning_rates: Vec<f64>,
    pub epochs: usize,
    pub mini_batch_size: usize,
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nodes: vec![4, 10],
            noisy: false,
            train_per_class: 500,
            test_per_class: 200,
            hidden_layers: vec![vec![10], vec![30], vec![15, 5]],
            learning_rates: vec![0.1, 0.5, 1.0],
            epochs: 15,
            mini_batch_size: 10,
            seed: 0,
        }
    }
}

/// Outcome of training one (hidden layers, learning rate) pair.
#[derive(Debug, Clone, Serialize)]
pub struct TrialResult {
    pub index: usize,
    pub hidden: Vec<usize>,
    pub architecture: Vec<usize>,
    pub eta: f64,
    pub epochs: usize,
    pub history: TrainingHistory,
    pub final_accuracy: f64,
    #[serde(skip)]
    pub network: Network,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub nodes: usize,
    pub noisy: bool,
    pub trials: Vec<TrialResult>,
    pub best: usize,
    pub worst: usize,
    /// Best network on the test set.
    pub confusion: ConfusionMatrix,
    pub average_directed: Option<Vec<Vec<f64>>>,
    pub average_undirected: Option<Vec<Vec<f64>>>,
}

impl SearchReport {
    #[must_use]
    pub fn best_trial(&self) -> &TrialResult {
        &self.trials[self.best]
    }

    #[must_use]
    pub fn worst_trial(&self) -> &TrialResult {
        &self.trials[self.worst]
    }
}

/// Runs the search for `nodes × nodes` matrices.
///
/// Trials train in parallel; `on_trial` is called as each finishes (in
/// completion order).
///
/// # Errors
/// `InvalidParameter` for an empty search space or impossible dataset;
/// training errors are propagated.
pub fn run_search<F>(config: &SearchConfig, nodes: usize, on_trial: F) -> Result<SearchReport>
where
    F: Fn(&TrialResult) + Sync,
{
    if config.hidden_layers.is_empty() || config.learning_rates.is_empty() {
        return Err(CoverlabError::invalid(
            "search needs at least one hidden-layer layout and one learning rate",
        ));
    }

    let mut data_rng = rng::seeded(config.seed, &[nodes as u64, 0]);
    let train_set =
        adjacency::create_dataset(nodes, config.train_per_class, config.noisy, &mut data_rng)?;
    let test_set =
        adjacency::create_dataset(nodes, config.test_per_class, config.noisy, &mut data_rng)?;

    let training = to_training(&train_set)?;
    let test: Vec<TestExample> = test_set
        .iter()
        .map(|s| TestExample {
            input: s.input.clone(),
            label: s.label.index(),
        })
        .collect();

    let grid: Vec<(usize, &Vec<usize>, f64)> = config
        .hidden_layers
        .iter()
        .flat_map(|h| config.learning_rates.iter().map(move |&eta| (h, eta)))
        .enumerate()
        .map(|(i, (h, eta))| (i, h, eta))
        .collect();

    let mut trials = grid
        .par_iter()
        .map(|&(index, hidden, eta)| {
            let trial = train_trial(config, nodes, index, hidden, eta, &training, &test)?;
            on_trial(&trial);
            Ok(trial)
        })
        .collect::<Result<Vec<_>>>()?;
    trials.sort_by_key(|t| t.index);

    let (best, worst) = extremes(&trials);
    let best_net = &trials[best].network;
    let confusion = ConfusionMatrix::from_pairs(
        test.iter()
            .map(|ex| Ok((best_net.predict(&ex.input)?, ex.label)))
            .collect::<Result<Vec<_>>>()?,
    );

    Ok(SearchReport {
        nodes,
        noisy: config.noisy,
        average_directed: class_average(&test_set, Label::Directed, nodes),
        average_undirected: class_average(&test_set, Label::Undirected, nodes),
        trials,
        best,
        worst,
        confusion,
    })
}

fn to_training(samples: &[Sample]) -> Result<Vec<TrainingExample>> {
    samples
        .iter()
        .map(|s| {
            Ok(TrainingExample {
                input: s.input.clone(),
                target: vectorize_result(s.label.index(), Label::COUNT)?,
            })
        })
        .collect()
}

fn train_trial(
    config: &SearchConfig,
    nodes: usize,
    index: usize,
    hidden: &[usize],
    eta: f64,
    training: &[TrainingExample],
    test: &[TestExample],
) -> Result<TrialResult> {
    let mut rng = rng::seeded(config.seed, &[nodes as u64, 1, index as u64]);

    let mut architecture = Vec::with_capacity(hidden.len() + 2);
    architecture.push(nodes * nodes);
    architecture.extend_from_slice(hidden);
    architecture.push(Label::COUNT);

    let mut network = Network::new(&architecture, &mut rng)?;
    let mut training = training.to_vec();
    let params = SgdParams {
        epochs: config.epochs,
        mini_batch_size: config.mini_batch_size,
        eta,
    };
    let history = network.sgd(&mut training, &params, Some(test), &mut rng, |_| {})?;

    Ok(TrialResult {
        index,
        hidden: hidden.to_vec(),
        architecture,
        eta,
        epochs: config.epochs,
        final_accuracy: history.final_accuracy().unwrap_or(0.0),
        history,
        network,
    })
}

/// First trial with the highest and first with the lowest final accuracy.
fn extremes(trials: &[TrialResult]) -> (usize, usize) {
    let (mut best, mut worst) = (0, 0);
    for (i, t) in trials.iter().enumerate() {
        if t.final_accuracy > trials[best].final_accuracy {
            best = i;
        }
        if t.final_accuracy < trials[worst].final_accuracy {
            worst = i;
        }
    }
    (best, worst)
}

fn class_average(samples: &[Sample], label: Label, nodes: usize) -> Option<Vec<Vec<f64>>> {
    adjacency::average(
        samples
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.input.as_slice()),
        nodes,
    )
}

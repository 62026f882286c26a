// tests/unit_config.rs
use coverlab_core::config::io::{load_file, load_from};
use coverlab_core::config::{Config, CONFIG_FILE};
use coverlab_core::error::CoverlabError;
use coverlab_core::graph::GraphFamily;
use coverlab_core::walk::Strategy;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let c = Config::default();
    assert_eq!(c.classify.nodes, vec![4, 10]);
    assert_eq!(c.classify.learning_rates, vec![0.1, 0.5, 1.0]);
    assert_eq!(c.bench.trials, 500);
    assert_eq!(c.sweep.runs, 10);
    assert_eq!(c.sweep.preview_max, 12);
    assert_eq!(c.animate.interval_ms, 25);
    assert_eq!(c.animate.layout_seed, 42);
    assert_eq!(c.output.dir, PathBuf::from("coverlab-out"));
    assert!(c.output.plots && c.output.events);
}

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join(CONFIG_FILE),
        "[bench]\ntrials = 25\nfamilies = [\"small_world\"]\n\n[sweep]\npreview_max = 5\n\n[output]\nplots = false\n",
    )
    .unwrap();
    let c = load_from(d.path(), None).unwrap();
    assert_eq!(c.bench.trials, 25);
    assert_eq!(c.bench.families, vec![GraphFamily::SmallWorld]);
    assert_eq!(c.bench.strategies, vec![Strategy::Random, Strategy::Explore, Strategy::Dfs]);
    assert_eq!(c.sweep.preview_max, 5);
    assert_eq!(c.sweep.runs, 10);
    assert!(!c.output.plots);
    assert!(c.output.events);
    assert_eq!(c.classify, Config::default().classify);
}

#[test]
fn test_missing_default_file_is_fine() {
    let d = tempfile::tempdir().unwrap();
    assert_eq!(load_from(d.path(), None).unwrap(), Config::default());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let d = tempfile::tempdir().unwrap();
    let missing = d.path().join("nope.toml");
    assert!(matches!(
        load_from(d.path(), Some(&missing)),
        Err(CoverlabError::Io { .. })
    ));
}

#[test]
fn test_malformed_toml_is_an_error() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("bad.toml");
    fs::write(&path, "[sweep]\nruns = \"many\"\n").unwrap();
    assert!(matches!(load_file(&path), Err(CoverlabError::Config(_))));
}

#[test]
fn test_toml_round_trip_keeps_values() {
    let mut c = Config::default();
    c.sweep.node_counts = vec![6, 9];
    c.classify.hidden_layers = vec![vec![8, 4]];
    let text = c.to_toml().unwrap();
    assert_eq!(Config::parse_toml(&text).unwrap(), c);
}

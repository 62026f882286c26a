// tests/unit_plot.rs
use coverlab_core::bench::{run_bench, run_sweep, BenchConfig, SweepConfig};
use coverlab_core::graph::spring_layout;
use coverlab_core::plot;
use std::fs;

#[test]
fn test_line_chart_creates_parent_dirs() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("nested/dir/curve.svg");
    plot::line_chart(&path, &[0.5, 0.3, 0.2, 0.15], "Best MSE (4x4)", "MSE").unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Best MSE (4x4)"));
}

#[test]
fn test_empty_inputs_still_render() {
    let d = tempfile::tempdir().unwrap();
    plot::line_chart(&d.path().join("empty.svg"), &[], "Nothing", "MSE").unwrap();
    plot::heatmap(&d.path().join("empty_heat.svg"), &[], "Nothing").unwrap();
    assert!(d.path().join("empty.svg").exists());
    assert!(d.path().join("empty_heat.svg").exists());
}

#[test]
fn test_heatmap_and_bench_grid() {
    let d = tempfile::tempdir().unwrap();
    let grid = vec![vec![0.0, 0.5], vec![0.5, 1.0]];
    plot::heatmap(&d.path().join("heat.svg"), &grid, "Average Directed Graph (2x2)").unwrap();
    assert!(fs::read_to_string(d.path().join("heat.svg"))
        .unwrap()
        .contains("<rect"));

    let report = run_bench(
        &BenchConfig {
            node_counts: vec![8, 12],
            connection_counts: vec![14, 20],
            trials: 3,
            ..BenchConfig::default()
        },
        |_| {},
    )
    .unwrap();
    let path = d.path().join("bench/grid.svg");
    plot::bench_grid(&path, &report).unwrap();
    let svg = fs::read_to_string(path).unwrap();
    assert!(svg.contains("Small World - DFS Walk"));
}

#[test]
fn test_heatmap_colours_use_fixed_unit_scale() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("half.svg");
    plot::heatmap(&path, &vec![vec![0.5; 3]; 3], "Average Undirected Graph (3x3)").unwrap();
    let svg = fs::read_to_string(path).unwrap().to_lowercase();
    // 0.5 sits on the middle viridis stop whatever the grid's own range is
    assert!(svg.contains("#21918c"));
    assert!(!svg.contains("#fde725"));
    assert!(svg.contains("connection probability"));
}

#[test]
fn test_sweep_previews_render() {
    let d = tempfile::tempdir().unwrap();
    let report = run_sweep(&SweepConfig {
        node_counts: vec![5],
        runs: 1,
        seed: 3,
        ..SweepConfig::default()
    })
    .unwrap();
    let preview = &report.previews[0];
    let path = d.path().join("sweep").join(preview.file_name());
    let layout = spring_layout(&preview.graph, 20, 3);
    plot::graph_preview(&path, &preview.graph, &layout, &preview.title()).unwrap();

    assert!(path.ends_with("sweep/preview_simple_n5_c4.svg"));
    let svg = fs::read_to_string(path).unwrap();
    assert!(svg.contains("Type: Simple, N=5, C=4"));
    assert!(svg.contains("<circle"));
}

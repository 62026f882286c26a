// src/plot/mod.rs
//! SVG figures drawn with `plotters`.
//!
//! SVG output needs no system fonts, so figures render the same on every
//! machine. Every function creates missing parent directories first.

use crate::bench::BenchReport;
use crate::error::{CoverlabError, Result};
use crate::graph::{Graph, Position};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

const COLORBAR_STEPS: usize = 50;

const LINE_COLORS: [RGBColor; 8] = [
    BLUE,
    RED,
    GREEN,
    MAGENTA,
    CYAN,
    BLACK,
    RGBColor(255, 140, 0),
    RGBColor(128, 0, 128),
];

/// Learning curve: `values[i]` plotted against epoch `i`.
///
/// # Errors
/// `Io` when the directory cannot be created, `Plot` when drawing fails.
pub fn line_chart(path: &Path, values: &[f64], title: &str, y_label: &str) -> Result<()> {
    prepare(path)?;
    draw_line_chart(path, values, title, y_label).map_err(plot_error)
}

/// Grid of values in `[0, 1]` drawn as coloured cells, row 0 at the top,
/// with a fixed `[0, 1]` colour scale beside it.
///
/// # Errors
/// `Io` when the directory cannot be created, `Plot` when drawing fails.
pub fn heatmap(path: &Path, grid: &[Vec<f64>], title: &str) -> Result<()> {
    prepare(path)?;
    draw_heatmap(path, grid, title).map_err(plot_error)
}

/// One graph drawn at the given node positions, nodes labelled by index.
/// Self-loops are drawn as rings around their node.
///
/// # Errors
/// `Io` when the directory cannot be created, `Plot` when drawing fails.
pub fn graph_preview(path: &Path, graph: &Graph, layout: &[Position], title: &str) -> Result<()> {
    prepare(path)?;
    draw_graph_preview(path, graph, layout, title).map_err(plot_error)
}

/// Families × strategies grid of cover-time charts: nodes on x, mean steps
/// on y, one line per connection count.
///
/// # Errors
/// `Io` when the directory cannot be created, `Plot` when drawing fails.
pub fn bench_grid(path: &Path, report: &BenchReport) -> Result<()> {
    prepare(path)?;
    draw_bench_grid(path, report).map_err(plot_error)
}

fn prepare(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| CoverlabError::io(e, dir))
        }
        _ => Ok(()),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn plot_error(err: Box<dyn std::error::Error + Send + Sync>) -> CoverlabError {
    CoverlabError::Plot(err.to_string())
}

#[allow(clippy::cast_precision_loss)]
fn draw_line_chart(path: &Path, values: &[f64], title: &str, y_label: &str) -> DrawResult {
    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    if values.is_empty() {
        draw_placeholder(&root, "No data", (400, 250))?;
        root.present()?;
        return Ok(());
    }

    let (lo, hi) = padded_range(values.iter().copied());
    let x_max = values.len().saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, lo..hi)?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc(y_label)
        .draw()?;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_heatmap(path: &Path, grid: &[Vec<f64>], title: &str) -> DrawResult {
    let root = SVGBackend::new(path, (720, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = grid.len();
    if n == 0 {
        draw_placeholder(&root, "No graphs to average", (300, 300))?;
        root.present()?;
        return Ok(());
    }
    let cols = grid.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let (cells, scale) = root.split_horizontally(600);

    let mut chart = ChartBuilder::on(&cells)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..cols, 0..n)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Node")
        .y_desc("Node")
        .y_label_formatter(&|y| n.saturating_sub(*y + 1).to_string())
        .draw()?;

    for (row, values) in grid.iter().enumerate() {
        let y = n - 1 - row;
        chart.draw_series(values.iter().enumerate().map(|(col, &v)| {
            Rectangle::new([(col, y), (col + 1, y + 1)], viridis(v).filled())
        }))?;
    }

    draw_colorbar(&scale, "Connection Probability")?;
    root.present()?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_colorbar(area: &DrawingArea<SVGBackend<'_>, Shift>, label: &str) -> DrawResult {
    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_desc(label)
        .draw()?;

    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = i as f64 / COLORBAR_STEPS as f64;
        let hi = (i + 1) as f64 / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, lo), (1.0, hi)], viridis((lo + hi) / 2.0).filled())
    }))?;
    Ok(())
}

fn draw_graph_preview(path: &Path, graph: &Graph, layout: &[Position], title: &str) -> DrawResult {
    let root = SVGBackend::new(path, (500, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    if layout.is_empty() {
        draw_placeholder(&root, "Empty graph", (250, 250))?;
        root.present()?;
        return Ok(());
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 18))
        .margin(20)
        .build_cartesian_2d(-1.2..1.2, -1.2..1.2)?;

    let at = |v: usize| layout.get(v).map(|p| (p.x, p.y));
    let edge_color = BLACK.mix(0.4);
    chart.draw_series(graph.edges().iter().filter_map(|&(u, v)| {
        let (a, b) = (at(u)?, at(v)?);
        (u != v).then(|| PathElement::new(vec![a, b], edge_color))
    }))?;
    chart.draw_series(graph.edges().iter().filter_map(|&(u, v)| {
        let p = at(u)?;
        (u == v).then(|| Circle::new(p, 14, edge_color))
    }))?;
    chart.draw_series(layout.iter().map(|p| Circle::new((p.x, p.y), 9, BLUE.filled())))?;
    chart.draw_series(layout.iter().enumerate().map(|(i, p)| {
        Text::new(
            i.to_string(),
            (p.x, p.y),
            ("sans-serif", 11).into_font().color(&WHITE),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn draw_bench_grid(path: &Path, report: &BenchReport) -> DrawResult {
    let families = report.families();
    let strategies = report.strategies();
    let rows = families.len().max(1);
    let cols = strategies.len().max(1);

    let root = SVGBackend::new(path, (500 * cols as u32, 320 * rows as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    if report.series.is_empty() {
        draw_placeholder(&root, "No benchmark data", (250, 160))?;
        root.present()?;
        return Ok(());
    }

    let x_lo = report.node_counts.iter().copied().min().unwrap_or(0) as f64;
    let x_hi = report.node_counts.iter().copied().max().unwrap_or(1) as f64;
    let x_hi = if x_hi > x_lo { x_hi } else { x_lo + 1.0 };

    let panels = root.split_evenly((rows, cols));
    for (fi, family) in families.iter().enumerate() {
        for (si, strategy) in strategies.iter().enumerate() {
            let Some(series) = report.series(*family, *strategy) else {
                continue;
            };
            let area = &panels[fi * cols + si];
            let y_hi = series
                .cells
                .iter()
                .map(|c| c.mean)
                .fold(0.0_f64, f64::max)
                .max(1.0)
                * 1.1;

            let mut chart = ChartBuilder::on(area)
                .caption(series.title(), ("sans-serif", 16))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

            chart
                .configure_mesh()
                .x_desc("Nodes (n)")
                .y_desc("Steps")
                .draw()?;

            for (ci, &c) in report.connection_counts.iter().enumerate() {
                let points: Vec<(f64, f64)> = report
                    .node_counts
                    .iter()
                    .filter_map(|&n| series.get(n, c).map(|cell| (n as f64, cell.mean)))
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let color = LINE_COLORS[ci % LINE_COLORS.len()];
                chart
                    .draw_series(LineSeries::new(points, &color))?
                    .label(format!("C={c}"))
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
            }

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 10))
                .draw()?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_placeholder(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    text: &str,
    at: (i32, i32),
) -> DrawResult {
    root.draw(&Text::new(
        text.to_string(),
        at,
        ("sans-serif", 20).into_font().color(&BLACK),
    ))?;
    Ok(())
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = value_range(values);
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Piecewise-linear approximation of the viridis colour map.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn viridis(t: f64) -> RGBColor {
    const STOPS: [(f64, f64, f64); 5] = [
        (68.0, 1.0, 84.0),
        (59.0, 82.0, 139.0),
        (33.0, 145.0, 140.0),
        (94.0, 201.0, 98.0),
        (253.0, 231.0, 37.0),
    ];
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (STOPS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let f = scaled - i as f64;
    let (a, b) = (STOPS[i], STOPS[i + 1]);
    let lerp = |x: f64, y: f64| (x + (y - x) * f).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(f64::NAN), RGBColor(68, 1, 84));
    }

    #[test]
    fn flat_series_gets_padding() {
        let (lo, hi) = padded_range([2.0, 2.0].into_iter());
        assert!(lo < 2.0 && hi > 2.0);
    }
}

// src/bench/report.rs
//! Console tables for benchmark and sweep results.

use crate::bench::{BenchReport, CellOutcome, Series, SweepRow};
use colored::Colorize;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

/// One progress line per finished cell (verbose mode).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_cell(outcome: &CellOutcome) -> String {
    let mut line = format!("  n={:<3} c={:<4}", outcome.nodes, outcome.connections);
    for &(family, strategy, total, samples) in &outcome.totals {
        if samples > 0 {
            let _ = write!(
                line,
                " {}/{}={:.1}",
                family,
                strategy,
                total as f64 / samples as f64
            );
        }
    }
    let rejected: usize = outcome.rejected.iter().map(|r| r.1).sum();
    if rejected > 0 {
        let _ = write!(line, " {}", format!("({rejected} rejected)").yellow());
    }
    line
}

/// Mean steps per (family, strategy), one table each, nodes down and
/// connection counts across.
#[must_use]
pub fn format_bench(report: &BenchReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{}",
        format!("COVER TIME BENCHMARK ({} trials per cell)", report.trials).bold()
    );
    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));

    for series in &report.series {
        write_series(&mut out, report, series);
    }

    let rejected = report.total_rejections();
    if rejected > 0 {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            format!("{rejected} draws rejected (generator failure or disconnected)").yellow()
        );
    }
    out
}

fn write_series(out: &mut String, report: &BenchReport, series: &Series) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", series.title().cyan().bold());
    let mut header = format!("{:>6}", "n \\ c");
    for c in &report.connection_counts {
        let _ = write!(header, " {c:>9}");
    }
    let _ = writeln!(out, "{}", header.dimmed());

    for &n in &report.node_counts {
        let mut row = format!("{n:>6}");
        for &c in &report.connection_counts {
            match series.get(n, c) {
                Some(cell) => {
                    let _ = write!(row, " {:>9.2}", cell.mean);
                }
                None => {
                    let _ = write!(row, " {:>9}", "-");
                }
            }
        }
        let _ = writeln!(out, "{row}");
    }
}

/// The sweep table, with a rule after each (nodes, connections) group.
#[must_use]
pub fn format_sweep(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<4} {:<4} {:<14} {:<28} {:<6} {:<8}",
            "N", "C", "Graph Type", "Strategy", "Runs", "avgCt"
        )
        .bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let mut previous: Option<(usize, usize)> = None;
    for row in rows {
        let key = (row.nodes, row.connections);
        if previous.is_some_and(|p| p != key) {
            let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        }
        previous = Some(key);
        let _ = writeln!(
            out,
            "{:<4} {:<4} {:<14} {:<28} {:<6} {:<8.2}",
            row.nodes,
            row.connections,
            row.family.label(),
            row.strategy.name(),
            row.runs,
            row.average
        );
    }
    if previous.is_some() {
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    out
}

// src/classify/report.rs
//! Report formatting for classification searches.

use crate::adjacency::Label;
use crate::classify::{SearchReport, TrialResult};
use colored::Colorize;
use std::fmt::Write;

/// Formats the banner printed before a search starts.
#[must_use]
pub fn format_header(nodes: usize, noisy: bool) -> String {
    format!(
        "--- Starting Search for {nodes}x{nodes} graphs (Noisy Data: {noisy}) ---"
    )
    .bold()
    .to_string()
}

/// Formats a single finished trial.
#[must_use]
pub fn format_trial(trial: &TrialResult) -> String {
    let acc = format!("{:.3}", trial.final_accuracy);
    format!(
        "  Config: Hidden={:?}, LR={:?}  ... acc={}",
        trial.hidden,
        trial.eta,
        color_accuracy(trial.final_accuracy, &acc)
    )
}

/// Formats the per-epoch lines of a trial (verbose mode).
#[must_use]
pub fn format_epochs(trial: &TrialResult) -> String {
    let mut out = String::new();
    for (epoch, cost) in trial.history.cost.iter().enumerate() {
        match trial.history.accuracy.get(epoch) {
            Some(acc) => {
                let _ = writeln!(out, "    Epoch {epoch:>3}:  cost={cost:.4}  acc={acc:.3}");
            }
            None => {
                let _ = writeln!(out, "    Epoch {epoch:>3}:  cost={cost:.4}");
            }
        }
    }
    out
}

/// Formats the best/worst summary and the confusion matrix.
#[must_use]
pub fn format_summary(report: &SearchReport) -> String {
    let mut out = String::new();
    let n = report.nodes;

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "═".repeat(60));
    let _ = writeln!(out, "{}", format!("SEARCH COMPLETE for {n}x{n} graphs").bold());
    let _ = writeln!(out, "{}", "═".repeat(60));

    write_config(&mut out, "Best Configuration", report.best_trial());
    write_config(&mut out, "Worst Configuration", report.worst_trial());

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Confusion Matrix for Best Network (Prediction, Actual):".bold());
    let _ = writeln!(out, "{}", "─".repeat(60));
    for actual in [Label::Directed, Label::Undirected] {
        for predicted in [Label::Directed, Label::Undirected] {
            let label = format!("Predicted {},", predicted.name());
            let count = report.confusion.count(predicted, actual);
            let count = if predicted == actual {
                count.to_string().green()
            } else {
                count.to_string().red()
            };
            let _ = writeln!(out, "  {label:<23} Actual {:<11} {count}", format!("{}:", actual.name()));
        }
    }
    let _ = writeln!(out, "{}", "─".repeat(60));
    out
}

fn write_config(out: &mut String, title: &str, trial: &TrialResult) {
    let acc = format!("{:.3}", trial.final_accuracy);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format!("--- {title} ---").cyan());
    let _ = writeln!(out, "  - Architecture:   {:?}", trial.architecture);
    let _ = writeln!(out, "  - Learning Rate:  {:?}", trial.eta);
    let _ = writeln!(out, "  - Final Accuracy: {}", color_accuracy(trial.final_accuracy, &acc));
}

fn color_accuracy(value: f64, text: &str) -> colored::ColoredString {
    if value >= 0.9 {
        text.green().bold()
    } else if value >= 0.7 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Formats the report as JSON for machine consumption.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_json(reports: &[SearchReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

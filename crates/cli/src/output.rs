//! Terminal rendering of command results

use crate::command::ListFormat;
use anyhow::{Context, Result};
use chrono::Local;
use simulator::WorkflowInfo;
use types::{KeyStatus, SyncOutcome};

/// Render the workflow listing in the requested format
pub fn render_workflows(workflows: &[WorkflowInfo], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Json => {
            serde_json::to_string_pretty(workflows).context("Failed to serialize workflows")
        }
        ListFormat::Simple => Ok(render_simple(workflows)),
        ListFormat::Table => Ok(render_table(workflows)),
    }
}

fn render_simple(workflows: &[WorkflowInfo]) -> String {
    let mut out = String::from("Available workflows:\n");
    for workflow in workflows {
        out.push_str(&format!("- {} ({})\n", workflow.name, size_label(workflow)));
    }
    out.push_str(&format!("Total workflows found: {}\n", workflows.len()));
    out
}

fn render_table(workflows: &[WorkflowInfo]) -> String {
    const HEADERS: [&str; 3] = ["Name", "Size", "Last Modified"];

    let rows: Vec<[String; 3]> = workflows
        .iter()
        .map(|workflow| {
            [
                workflow.name.clone(),
                size_label(workflow),
                workflow
                    .last_modified
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        format!(
            "| {:<w0$} | {:>w1$} | {:<w2$} |\n",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )
    };
    let separator = format!(
        "+{}+{}+{}+\n",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2),
        "-".repeat(widths[2] + 2)
    );

    let mut out = separator.clone();
    out.push_str(&line(HEADERS));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out.push_str(&separator);
    out.push_str(&format!("Total workflows found: {}\n", workflows.len()));
    out
}

fn size_label(workflow: &WorkflowInfo) -> String {
    format!("{:.2} KB", workflow.size_kb())
}

/// Per-key report of a sync run
pub fn render_sync_outcome(outcome: &SyncOutcome) -> String {
    let mut out = String::new();
    for result in &outcome.results {
        match &result.status {
            KeyStatus::Published => out.push_str(&format!("  ✓ {}\n", result.key)),
            KeyStatus::Failed { reason } => {
                out.push_str(&format!("  ✗ {}: {}\n", result.key, reason))
            }
        }
    }
    out.push_str(&outcome.summary());
    out.push('\n');
    out
}

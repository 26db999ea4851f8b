//! `ql overdue`: unfinished tasks whose deadline has passed.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;
use questlog_core::Task;
use questlog_core::board::{Overdue, overdue};
use serde::Serialize;

use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ql overdue`.
#[derive(Args, Debug, Default)]
pub struct OverdueArgs {}

#[derive(Debug, Serialize)]
struct OverdueView {
    today: NaiveDate,
    overdue: Vec<Overdue>,
}

/// Execute `ql overdue`.
pub fn run_overdue(
    _args: &OverdueArgs,
    output: OutputMode,
    tasks: &[Task],
    today: NaiveDate,
) -> anyhow::Result<()> {
    let view = OverdueView {
        today,
        overdue: overdue(tasks, today),
    };
    if !view.overdue.is_empty() {
        tracing::info!(count = view.overdue.len(), "overdue tasks found");
    }
    render_mode(output, &view, render_text, render_pretty)
}

fn render_text(view: &OverdueView, w: &mut dyn Write) -> io::Result<()> {
    for row in &view.overdue {
        let deadline = row.task.deadline.map(|d| d.to_string()).unwrap_or_default();
        writeln!(w, "{}\t{deadline}\t{}\t{}", row.days_late, row.task.id, row.task.name)?;
    }
    Ok(())
}

fn render_pretty(view: &OverdueView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Overdue as of {}", view.today))?;
    if view.overdue.is_empty() {
        return writeln!(w, "  (nothing overdue)");
    }
    for row in &view.overdue {
        let unit = if row.days_late == 1 { "day" } else { "days" };
        writeln!(
            w,
            "  ⚠ {} {}  ({} {unit} late)",
            row.task.complexity.marker(),
            row.task.name,
            row.days_late
        )?;
    }
    Ok(())
}

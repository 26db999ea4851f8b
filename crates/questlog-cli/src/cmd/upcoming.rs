//! `ql upcoming`: the next due date of every task.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;
use questlog_core::Task;
use questlog_core::board::{DueReason, Upcoming, upcoming};
use serde::Serialize;

use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ql upcoming`.
#[derive(Args, Debug, Default)]
pub struct UpcomingArgs {
    /// Maximum rows to show.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct UpcomingView {
    from: NaiveDate,
    upcoming: Vec<Upcoming>,
}

/// Execute `ql upcoming`.
pub fn run_upcoming(
    args: &UpcomingArgs,
    output: OutputMode,
    tasks: &[Task],
    today: NaiveDate,
) -> anyhow::Result<()> {
    let mut rows = upcoming(tasks, today);
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }
    let view = UpcomingView {
        from: today,
        upcoming: rows,
    };
    render_mode(output, &view, render_text, render_pretty)
}

const fn reason_label(reason: DueReason) -> &'static str {
    match reason {
        DueReason::Deadline => "deadline",
        DueReason::Recurrence => "recurrence",
    }
}

fn render_text(view: &UpcomingView, w: &mut dyn Write) -> io::Result<()> {
    for row in &view.upcoming {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            row.date,
            reason_label(row.reason),
            row.task.id,
            row.task.name
        )?;
    }
    Ok(())
}

fn render_pretty(view: &UpcomingView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Upcoming after {}", view.from))?;
    if view.upcoming.is_empty() {
        return writeln!(w, "  (nothing upcoming)");
    }
    for row in &view.upcoming {
        let days = (row.date - view.from).num_days();
        let glyph = match row.reason {
            DueReason::Deadline => "⏰",
            DueReason::Recurrence => "↻",
        };
        writeln!(
            w,
            "  {} {glyph} {} {}  (in {days}d)",
            row.date,
            row.task.complexity.marker(),
            row.task.name
        )?;
    }
    Ok(())
}

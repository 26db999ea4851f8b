//! `ql week`: the forward calendar window, excluding today.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;
use questlog_core::{Entry, Task, Weekday, project_window, weekday_of};
use serde::Serialize;

use super::{write_entry_line, write_entry_row};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ql week`.
#[derive(Args, Debug, Default)]
pub struct WeekArgs {
    /// Number of days after today to show (default from config, else 7).
    #[arg(short = 'n', long)]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WeekView {
    from: NaiveDate,
    window_days: u32,
    days: Vec<DayView>,
}

#[derive(Debug, Serialize)]
struct DayView {
    date: NaiveDate,
    weekday: Weekday,
    entries: Vec<Entry>,
}

fn build_view(tasks: &[Task], today: NaiveDate, window_days: u32) -> WeekView {
    let days = project_window(tasks, today, window_days)
        .into_iter()
        .map(|(date, entries)| DayView {
            date,
            weekday: weekday_of(date),
            entries,
        })
        .collect();
    WeekView {
        from: today,
        window_days,
        days,
    }
}

/// Execute `ql week`.
pub fn run_week(
    output: OutputMode,
    tasks: &[Task],
    today: NaiveDate,
    window_days: u32,
) -> anyhow::Result<()> {
    let view = build_view(tasks, today, window_days);
    render_mode(output, &view, render_text, render_pretty)
}

fn render_text(view: &WeekView, w: &mut dyn Write) -> io::Result<()> {
    for day in &view.days {
        for entry in &day.entries {
            write_entry_row(w, day.date, entry)?;
        }
    }
    Ok(())
}

fn render_pretty(view: &WeekView, w: &mut dyn Write) -> io::Result<()> {
    if view.days.is_empty() {
        return writeln!(
            w,
            "(nothing scheduled in the {} days after {})",
            view.window_days, view.from
        );
    }
    for (i, day) in view.days.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        pretty_section(w, &format!("{} {}", day.weekday, day.date))?;
        for entry in &day.entries {
            write_entry_line(w, entry)?;
        }
    }
    Ok(())
}

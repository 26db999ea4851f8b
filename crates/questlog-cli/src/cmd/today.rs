//! `ql today`: what is due today.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;
use questlog_core::{Entry, Task, Weekday, project_today, weekday_of};
use serde::Serialize;

use super::{write_entry_line, write_entry_row};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ql today`.
#[derive(Args, Debug, Default)]
pub struct TodayArgs {
    /// Hide entries that are already completed.
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, Serialize)]
struct TodayView {
    date: NaiveDate,
    weekday: Weekday,
    entries: Vec<Entry>,
}

fn build_view(args: &TodayArgs, tasks: &[Task], today: NaiveDate) -> TodayView {
    let mut entries = project_today(tasks, today);
    if args.open {
        entries.retain(|entry| !entry.completed());
    }
    TodayView {
        date: today,
        weekday: weekday_of(today),
        entries,
    }
}

/// Execute `ql today`.
pub fn run_today(
    args: &TodayArgs,
    output: OutputMode,
    tasks: &[Task],
    today: NaiveDate,
) -> anyhow::Result<()> {
    let view = build_view(args, tasks, today);
    render_mode(output, &view, render_text, render_pretty)
}

fn render_text(view: &TodayView, w: &mut dyn Write) -> io::Result<()> {
    for entry in &view.entries {
        write_entry_row(w, view.date, entry)?;
    }
    Ok(())
}

fn render_pretty(view: &TodayView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("My day · {} {}", view.weekday, view.date))?;
    if view.entries.is_empty() {
        return writeln!(w, "  (nothing due today)");
    }
    for entry in &view.entries {
        write_entry_line(w, entry)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use questlog_core::Recurrence;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("1", "c", "Report").with_deadline(ymd(2024, 6, 10)).with_completed(true),
            Task::new("2", "c", "Gym").with_recurrence(Recurrence::from_days([Weekday::Mon])),
        ]
    }

    #[test]
    fn open_flag_drops_completed_entries() {
        let all = build_view(&TodayArgs::default(), &tasks(), ymd(2024, 6, 10));
        assert_eq!(all.entries.len(), 2);
        assert_eq!(all.weekday, Weekday::Mon);

        let open = build_view(&TodayArgs { open: true }, &tasks(), ymd(2024, 6, 10));
        assert_eq!(open.entries.len(), 1);
        assert_eq!(open.entries[0].name(), "Gym");
    }

    #[test]
    fn pretty_output_has_heading_and_placeholder() {
        let view = build_view(&TodayArgs::default(), &[], ymd(2024, 6, 10));
        let mut buf = Vec::new();
        render_pretty(&view, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("My day · mon 2024-06-10\n"));
        assert!(text.contains("(nothing due today)"));
    }
}

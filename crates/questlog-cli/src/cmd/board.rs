//! `ql board`: tasks grouped by catalog, dated groups first.

use std::io::{self, Write};

use clap::Args;
use questlog_core::board::{CatalogGroup, catalog_board};
use questlog_core::snapshot::Snapshot;
use serde::Serialize;

use super::write_task_line;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ql board`.
#[derive(Args, Debug, Default)]
pub struct BoardArgs {
    /// Show only this catalog (by id).
    #[arg(short, long)]
    pub catalog: Option<String>,
}

#[derive(Debug, Serialize)]
struct BoardView {
    catalogs: Vec<CatalogGroup>,
}

fn build_view(args: &BoardArgs, snapshot: &Snapshot) -> BoardView {
    let mut catalogs = catalog_board(&snapshot.catalogs, &snapshot.tasks);
    if let Some(wanted) = args.catalog.as_deref() {
        catalogs.retain(|group| group.catalog_id.as_str() == wanted);
    }
    BoardView { catalogs }
}

/// Execute `ql board`.
pub fn run_board(args: &BoardArgs, output: OutputMode, snapshot: &Snapshot) -> anyhow::Result<()> {
    let view = build_view(args, snapshot);
    render_mode(output, &view, render_text, render_pretty)
}

fn render_text(view: &BoardView, w: &mut dyn Write) -> io::Result<()> {
    for group in &view.catalogs {
        for dated in &group.dated {
            for task in &dated.tasks {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    group.catalog_id, dated.date, task.id, task.complexity, task.completed, task.name
                )?;
            }
        }
        for task in &group.undated {
            writeln!(
                w,
                "{}\t-\t{}\t{}\t{}\t{}",
                group.catalog_id, task.id, task.complexity, task.completed, task.name
            )?;
        }
    }
    Ok(())
}

fn render_pretty(view: &BoardView, w: &mut dyn Write) -> io::Result<()> {
    for (i, group) in view.catalogs.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        let title = group.name.as_deref().unwrap_or("(unlisted catalog)");
        pretty_section(w, &format!("{title} [{}] · {} tasks", group.catalog_id, group.task_count()))?;
        for dated in &group.dated {
            writeln!(w, " {}", dated.date.format("%d.%m.%Y"))?;
            for task in &dated.tasks {
                write_task_line(w, task)?;
            }
        }
        if !group.undated.is_empty() {
            writeln!(w, " No date")?;
            for task in &group.undated {
                write_task_line(w, task)?;
            }
        }
    }
    Ok(())
}

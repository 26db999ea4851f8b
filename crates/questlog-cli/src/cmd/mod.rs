pub mod board;
pub mod completions;
pub mod overdue;
pub mod today;
pub mod upcoming;
pub mod week;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::bail;
use chrono::NaiveDate;
use questlog_core::config::{self, ProjectConfig, UserConfig};
use questlog_core::error::ErrorCode;
use questlog_core::snapshot::{Snapshot, load_snapshot};
use questlog_core::{Entry, Task};

use crate::output::{CliError, OutputMode, render_error};

/// Parse a `--today` value.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    raw.trim().parse::<NaiveDate>().map_err(|_| {
        format!(
            "{}: '{raw}' ({})",
            ErrorCode::InvalidDate.message(),
            ErrorCode::InvalidDate.hint().unwrap_or_default()
        )
    })
}

/// Locate the project root and load user and project config, rendering
/// failures in `output` mode.
pub fn load_config(output: OutputMode) -> anyhow::Result<(PathBuf, UserConfig, ProjectConfig)> {
    let project_root = std::env::current_dir().map_err(|err| {
        let err = anyhow::Error::new(err).context("cannot read working directory");
        report(output, ErrorCode::InternalUnexpected, err)
    })?;
    let user = config::load_user_config()
        .map_err(|err| report(output, ErrorCode::ConfigParseError, err))?;
    let project = config::load_project_config(&project_root)
        .map_err(|err| report(output, ErrorCode::ConfigParseError, err))?;
    Ok((project_root, user, project))
}

/// Render `err` under `code` and hand it back for propagation.
fn report(output: OutputMode, code: ErrorCode, err: anyhow::Error) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::from_code(code, format!("{err:#}"))) {
        tracing::warn!(error = %render_err, "failed to render error");
    }
    err
}

/// Resolve and load the task snapshot, rendering failures in `output` mode.
pub fn open_snapshot(
    output: OutputMode,
    cli_path: Option<&Path>,
    project_root: &Path,
    project: &ProjectConfig,
    user: &UserConfig,
) -> anyhow::Result<Snapshot> {
    let env_path = std::env::var(config::SNAPSHOT_ENV).ok();
    let Some(path) =
        config::resolve_snapshot_path(cli_path, env_path.as_deref(), project_root, project, user)
    else {
        let err = CliError::from_code(
            ErrorCode::SnapshotNotConfigured,
            ErrorCode::SnapshotNotConfigured.message(),
        );
        render_error(output, &err)?;
        bail!(err.message);
    };

    match load_snapshot(&path) {
        Ok(snapshot) => Ok(snapshot),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}

const fn done_mark(completed: bool) -> &'static str {
    if completed { "x" } else { " " }
}

/// One tab-separated row: date, key, kind, complexity, done, name.
fn write_entry_row(w: &mut dyn Write, date: NaiveDate, entry: &Entry) -> io::Result<()> {
    writeln!(
        w,
        "{date}\t{}\t{}\t{}\t{}\t{}",
        entry.key(),
        if entry.is_derived() { "instance" } else { "task" },
        entry.complexity(),
        entry.completed(),
        entry.name()
    )
}

/// One human line: checkbox, complexity marker, name, recurrence hint.
fn write_entry_line(w: &mut dyn Write, entry: &Entry) -> io::Result<()> {
    let recurrence = match entry {
        Entry::Instance(instance) => format!("  ↻ {}", instance.recurrence),
        Entry::Task(_) => String::new(),
    };
    writeln!(
        w,
        "  [{}] {} {}{recurrence}",
        done_mark(entry.completed()),
        entry.complexity().marker(),
        entry.name()
    )
}

fn write_task_line(w: &mut dyn Write, task: &Task) -> io::Result<()> {
    let recurrence = if task.is_recurring() {
        format!("  ↻ {}", task.recurrence)
    } else {
        String::new()
    };
    writeln!(
        w,
        "  [{}] {} {}{recurrence}",
        done_mark(task.completed),
        task.complexity.marker(),
        task.name
    )
}

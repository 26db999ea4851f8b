//! Task snapshot boundary.
//!
//! The task service exports catalogs and tasks as JSON with integer ids,
//! string-typed completion flags, timestamp deadlines and a `daily_tasks`
//! list per task. This module normalises that payload into [`Task`] values
//! once, so the projections only ever see a typed, immutable snapshot.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{debug, warn};

use crate::calendar::{Recurrence, Weekday};
use crate::error::ErrorCode;
use crate::model::{Catalog, CatalogId, Complexity, Task, TaskId};

/// Errors raised while loading or normalising a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task {task}: invalid deadline '{value}'")]
    InvalidDeadline { task: TaskId, value: String },

    #[error("task {task}: invalid recurrence day '{value}'")]
    InvalidWeekday { task: TaskId, value: String },
}

impl SnapshotError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorCode::SnapshotNotFound
            }
            Self::Io { .. } => ErrorCode::SnapshotUnreadable,
            Self::Json(_) => ErrorCode::SnapshotParseError,
            Self::InvalidDeadline { .. } => ErrorCode::InvalidDeadline,
            Self::InvalidWeekday { .. } => ErrorCode::InvalidWeekday,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Normalised, read-only view of the task service's data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub catalogs: Vec<Catalog>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct WireSnapshot {
    #[serde(default)]
    catalogs: Vec<WireCatalog>,
    #[serde(default)]
    tasks: Vec<WireTask>,
}

#[derive(Debug, Deserialize)]
struct WireCatalog {
    catalog_id: WireId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tasks: Vec<WireTask>,
}

#[derive(Debug, Deserialize)]
struct WireTask {
    task_id: WireId,
    #[serde(default)]
    catalog_id: Option<WireId>,
    name: String,
    #[serde(default)]
    complexity: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    completed: Option<WireFlag>,
    #[serde(default)]
    daily_tasks: Vec<WireDailyTask>,
}

#[derive(Debug, Deserialize)]
struct WireDailyTask {
    day_week: String,
}

/// Ids arrive as integers from the service and as strings from hand-written files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Completion is a real boolean or one of the strings `"true"` / `"false"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireFlag {
    Bool(bool),
    Text(String),
}

/// Read and normalise a snapshot file.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the file cannot be read, and any error of
/// [`parse_snapshot`] for its contents.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&content)?;
    debug!(
        path = %path.display(),
        catalogs = snapshot.catalogs.len(),
        tasks = snapshot.tasks.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Normalise a snapshot from its JSON text.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] for malformed JSON or missing required
/// fields, [`SnapshotError::InvalidDeadline`] for unparseable deadlines, and
/// [`SnapshotError::InvalidWeekday`] for unknown `day_week` tags.
pub fn parse_snapshot(content: &str) -> Result<Snapshot, SnapshotError> {
    let wire: WireSnapshot = serde_json::from_str(content)?;

    let mut snapshot = Snapshot::default();
    for catalog in wire.catalogs {
        let catalog_id = CatalogId::new(catalog.catalog_id.into_string());
        for task in catalog.tasks {
            snapshot.tasks.push(normalize_task(task, Some(&catalog_id))?);
        }
        snapshot.catalogs.push(Catalog {
            id: catalog_id,
            name: catalog.name,
        });
    }
    for task in wire.tasks {
        snapshot.tasks.push(normalize_task(task, None)?);
    }
    Ok(snapshot)
}

fn normalize_task(wire: WireTask, enclosing: Option<&CatalogId>) -> Result<Task, SnapshotError> {
    let id = TaskId::new(wire.task_id.into_string());
    let catalog_id = wire
        .catalog_id
        .map(|id| CatalogId::new(id.into_string()))
        .or_else(|| enclosing.cloned())
        .unwrap_or_default();

    let complexity = wire.complexity.as_deref().map_or_else(Complexity::default, |raw| {
        raw.parse().unwrap_or_else(|_| {
            debug!(task = %id, complexity = raw, "unknown complexity; using normal");
            Complexity::Normal
        })
    });

    let deadline = match wire.deadline.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_deadline(raw).ok_or_else(|| SnapshotError::InvalidDeadline {
            task: id.clone(),
            value: raw.to_string(),
        })?),
    };

    let completed = match wire.completed {
        None => false,
        Some(WireFlag::Bool(flag)) => flag,
        Some(WireFlag::Text(raw)) => parse_flag(&raw).unwrap_or_else(|| {
            warn!(task = %id, completed = %raw, "unrecognized completion flag; treating as open");
            false
        }),
    };

    let mut recurrence = Recurrence::new();
    for daily in wire.daily_tasks {
        let day = daily
            .day_week
            .parse::<Weekday>()
            .map_err(|_| SnapshotError::InvalidWeekday {
                task: id.clone(),
                value: daily.day_week.clone(),
            })?;
        recurrence.insert(day);
    }

    if deadline.is_some() && !recurrence.is_empty() {
        warn!(task = %id, "task has both a deadline and recurrence days; deadline takes precedence on its date");
    }

    Ok(Task {
        id,
        catalog_id,
        name: wire.name,
        complexity,
        deadline,
        completed,
        recurrence,
    })
}

/// Calendar day of a `YYYY-MM-DD` date or a timestamp; time of day is dropped.
fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn deadline_formats() {
        assert_eq!(parse_deadline("2024-06-10"), Some(ymd(2024, 6, 10)));
        assert_eq!(
            parse_deadline("2024-06-10T00:00:00.000Z"),
            Some(ymd(2024, 6, 10))
        );
        assert_eq!(
            parse_deadline("2024-06-10T23:30:00+03:00"),
            Some(ymd(2024, 6, 10))
        );
        assert_eq!(parse_deadline("2024-06-10T08:15:00"), Some(ymd(2024, 6, 10)));
        assert_eq!(parse_deadline("10.06.2024"), None);
    }

    #[test]
    fn flag_strings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" FALSE "), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn nested_tasks_inherit_catalog() {
        let snapshot = parse_snapshot(
            r#"{"catalogs":[{"catalog_id":3,"name":"Home","tasks":[
                {"task_id":10,"name":"Dishes","complexity":"easy","completed":"false"}
            ]}]}"#,
        )
        .expect("parse");
        assert_eq!(snapshot.catalogs, vec![Catalog::new("3", "Home")]);
        assert_eq!(snapshot.tasks.len(), 1);
        let task = &snapshot.tasks[0];
        assert_eq!(task.id.as_str(), "10");
        assert_eq!(task.catalog_id.as_str(), "3");
        assert_eq!(task.complexity, Complexity::Easy);
        assert!(!task.completed);
    }

    #[test]
    fn empty_deadline_string_is_absent() {
        let snapshot =
            parse_snapshot(r#"{"tasks":[{"task_id":"a","name":"A","deadline":""}]}"#).expect("parse");
        assert!(snapshot.tasks[0].deadline.is_none());
    }

    #[test]
    fn unknown_completion_string_is_open() {
        let snapshot =
            parse_snapshot(r#"{"tasks":[{"task_id":"a","name":"A","completed":"maybe"}]}"#)
                .expect("parse");
        assert!(!snapshot.tasks[0].completed);
    }

    #[test]
    fn bad_weekday_is_rejected_with_task_id() {
        let err = parse_snapshot(
            r#"{"tasks":[{"task_id":5,"name":"A","daily_tasks":[{"day_week":"funday"}]}]}"#,
        )
        .expect_err("should fail");
        assert!(matches!(err, SnapshotError::InvalidWeekday { ref task, .. } if task.as_str() == "5"));
        assert_eq!(err.code(), ErrorCode::InvalidWeekday);
    }

    #[test]
    fn bad_deadline_is_rejected() {
        let err = parse_snapshot(r#"{"tasks":[{"task_id":5,"name":"A","deadline":"soon"}]}"#)
            .expect_err("should fail");
        assert!(matches!(err, SnapshotError::InvalidDeadline { .. }));
        assert!(err.hint().is_some());
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let err = load_snapshot(Path::new("/definitely/not/here.json")).expect_err("should fail");
        assert_eq!(err.code(), ErrorCode::SnapshotNotFound);
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn directory_maps_to_unreadable() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let err = load_snapshot(dir.path()).expect_err("should fail");
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert_eq!(err.code(), ErrorCode::SnapshotUnreadable);
        assert_eq!(err.code().code(), "E1104");
    }
}

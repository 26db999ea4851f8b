use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use super::task::{CatalogId, Complexity, Task, TaskId};
use crate::calendar::Recurrence;

/// Composite key of a derived instance: one source task on one calendar day.
///
/// Text form is `<task>@<date>` with the date in ISO `YYYY-MM-DD`. The date
/// part never contains `@`, so splitting at the last `@` recovers both halves
/// even when the task id itself contains `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId {
    pub task: TaskId,
    pub date: NaiveDate,
}

impl InstanceId {
    #[must_use]
    pub const fn new(task: TaskId, date: NaiveDate) -> Self {
        Self { task, date }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.task, self.date)
    }
}

/// Error returned when an instance id string is not `<task>@<date>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseInstanceIdError {
    #[error("instance id '{0}' has no '@' separator")]
    MissingSeparator(String),

    #[error("instance id '{input}' has an invalid date part '{date}'")]
    InvalidDate { input: String, date: String },
}

impl FromStr for InstanceId {
    type Err = ParseInstanceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (task, date) = s
            .rsplit_once('@')
            .ok_or_else(|| ParseInstanceIdError::MissingSeparator(s.to_string()))?;
        let date = date
            .parse::<NaiveDate>()
            .map_err(|_| ParseInstanceIdError::InvalidDate {
                input: s.to_string(),
                date: date.to_string(),
            })?;
        Ok(Self::new(TaskId::new(task), date))
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InstanceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Ephemeral per-date copy of a recurring task. Never persisted.
///
/// Built only by [`crate::project::materialize`]: `completed` starts `false`
/// and `deadline` is always `None`, whatever the source task holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInstance {
    pub instance_id: InstanceId,
    pub instance_date: NaiveDate,
    pub id: TaskId,
    pub catalog_id: CatalogId,
    pub name: String,
    pub complexity: Complexity,
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
    pub recurrence: Recurrence,
}

impl TaskInstance {
    /// Always true: instances exist only as projections.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        true
    }
}

/// Identity of one entry within a day's result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKey {
    Task(TaskId),
    Instance(InstanceId),
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "{id}"),
            Self::Instance(id) => write!(f, "{id}"),
        }
    }
}

/// One row of a projected day: a stored task or a derived instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Task(Task),
    Instance(TaskInstance),
}

impl Entry {
    #[must_use]
    pub fn key(&self) -> EntryKey {
        match self {
            Self::Task(task) => EntryKey::Task(task.id.clone()),
            Self::Instance(instance) => EntryKey::Instance(instance.instance_id.clone()),
        }
    }

    /// Id of the underlying persisted task.
    #[must_use]
    pub const fn source_id(&self) -> &TaskId {
        match self {
            Self::Task(task) => &task.id,
            Self::Instance(instance) => &instance.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Task(task) => &task.name,
            Self::Instance(instance) => &instance.name,
        }
    }

    #[must_use]
    pub const fn catalog_id(&self) -> &CatalogId {
        match self {
            Self::Task(task) => &task.catalog_id,
            Self::Instance(instance) => &instance.catalog_id,
        }
    }

    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        match self {
            Self::Task(task) => task.complexity,
            Self::Instance(instance) => instance.complexity,
        }
    }

    #[must_use]
    pub const fn completed(&self) -> bool {
        match self {
            Self::Task(task) => task.completed,
            Self::Instance(instance) => instance.completed,
        }
    }

    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::Instance(_))
    }
}

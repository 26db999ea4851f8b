use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};
use crate::calendar::Recurrence;

/// Opaque, stable identifier of a persisted task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of the catalog that owns a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Task difficulty. Unknown values read from the wire fall back to `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Complexity {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Complexity {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    /// Parse without failing: anything unrecognized is `Normal`.
    #[must_use]
    pub fn lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Single-glyph marker used by list views.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Easy => "⚪",
            Self::Normal => "🔵",
            Self::Hard => "🔴",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseEnumError {
                expected: "complexity",
                got: s.to_string(),
            }),
        }
    }
}

impl From<String> for Complexity {
    fn from(value: String) -> Self {
        Self::lenient(&value)
    }
}

/// A persisted task as seen by the projection engine.
///
/// The editing workflow keeps `deadline` and a non-empty `recurrence` mutually
/// exclusive; the projections still handle tasks that carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub catalog_id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl Task {
    #[must_use]
    pub fn new(id: impl Into<TaskId>, catalog_id: impl Into<CatalogId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            catalog_id: catalog_id.into(),
            name: name.into(),
            complexity: Complexity::default(),
            deadline: None,
            completed: false,
            recurrence: Recurrence::new(),
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    #[must_use]
    pub const fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// True when the task carries at least one recurrence day.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !self.recurrence.is_empty()
    }

    /// True when the deadline falls on `date`.
    #[must_use]
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.deadline == Some(date)
    }
}

/// A named grouping of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: CatalogId,
    pub name: String,
}

impl Catalog {
    #[must_use]
    pub fn new(id: impl Into<CatalogId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Weekday;

    #[test]
    fn complexity_defaults_to_normal() {
        assert_eq!(Complexity::default(), Complexity::Normal);
        assert_eq!(Complexity::lenient("legendary"), Complexity::Normal);
        assert_eq!(Complexity::lenient(" HARD "), Complexity::Hard);
        assert!("legendary".parse::<Complexity>().is_err());
    }

    #[test]
    fn complexity_serde_is_lenient() {
        assert_eq!(serde_json::to_string(&Complexity::Easy).expect("ser"), "\"easy\"");
        assert_eq!(
            serde_json::from_str::<Complexity>("\"hard\"").expect("de"),
            Complexity::Hard
        );
        assert_eq!(
            serde_json::from_str::<Complexity>("\"epic\"").expect("de"),
            Complexity::Normal
        );
    }

    #[test]
    fn markers_are_distinct() {
        assert_ne!(Complexity::Easy.marker(), Complexity::Normal.marker());
        assert_ne!(Complexity::Normal.marker(), Complexity::Hard.marker());
    }

    #[test]
    fn task_deserializes_with_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"7","name":"Stretch"}"#).expect("de");
        assert_eq!(task.id, TaskId::new("7"));
        assert_eq!(task.complexity, Complexity::Normal);
        assert!(task.deadline.is_none());
        assert!(!task.completed);
        assert!(!task.is_recurring());
    }

    #[test]
    fn builder_sets_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let task = Task::new("1", "c", "Read")
            .with_deadline(date)
            .with_complexity(Complexity::Hard)
            .with_completed(true)
            .with_recurrence(Recurrence::from_days([Weekday::Mon]));
        assert!(task.is_due_on(date));
        assert!(task.completed);
        assert!(task.is_recurring());
        assert_eq!(task.complexity, Complexity::Hard);
    }
}

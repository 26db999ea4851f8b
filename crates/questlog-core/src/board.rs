//! Catalog-oriented views over a snapshot: per-catalog grouping, upcoming
//! occurrences, and overdue detection.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Catalog, CatalogId, Task};

/// Tasks sharing one deadline inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedGroup {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

/// One catalog's tasks: dated groups in ascending date order, then the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogGroup {
    pub catalog_id: CatalogId,
    pub name: Option<String>,
    pub dated: Vec<DatedGroup>,
    pub undated: Vec<Task>,
}

impl CatalogGroup {
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.undated.len() + self.dated.iter().map(|group| group.tasks.len()).sum::<usize>()
    }
}

/// Group tasks by catalog.
///
/// Listed catalogs come first in list order, even when empty. Catalogs that
/// only appear on tasks follow in id order with no name.
#[must_use]
pub fn catalog_board(catalogs: &[Catalog], tasks: &[Task]) -> Vec<CatalogGroup> {
    let mut order: Vec<(CatalogId, Option<String>)> = catalogs
        .iter()
        .map(|catalog| (catalog.id.clone(), Some(catalog.name.clone())))
        .collect();
    let listed: BTreeSet<&CatalogId> = catalogs.iter().map(|catalog| &catalog.id).collect();
    let unlisted: BTreeSet<&CatalogId> = tasks
        .iter()
        .map(|task| &task.catalog_id)
        .filter(|id| !listed.contains(id))
        .collect();
    order.extend(unlisted.into_iter().map(|id| (id.clone(), None)));

    order
        .into_iter()
        .map(|(catalog_id, name)| {
            let mut dated: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
            let mut undated = Vec::new();
            for task in tasks.iter().filter(|task| task.catalog_id == catalog_id) {
                match task.deadline {
                    Some(date) => dated.entry(date).or_default().push(task.clone()),
                    None => undated.push(task.clone()),
                }
            }
            CatalogGroup {
                catalog_id,
                name,
                dated: dated
                    .into_iter()
                    .map(|(date, tasks)| DatedGroup { date, tasks })
                    .collect(),
                undated,
            }
        })
        .collect()
}

/// Why a task shows up in [`upcoming`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueReason {
    Deadline,
    Recurrence,
}

/// The next date strictly after today on which a task is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upcoming {
    pub date: NaiveDate,
    pub reason: DueReason,
    pub task: Task,
}

/// Next due date per task, sorted by date then task id.
///
/// A future deadline wins over recurrence. Completed deadline tasks and tasks
/// with neither a future deadline nor recurrence rules are skipped.
#[must_use]
pub fn upcoming(tasks: &[Task], today: NaiveDate) -> Vec<Upcoming> {
    let mut rows: Vec<Upcoming> = tasks
        .iter()
        .filter_map(|task| {
            if let Some(deadline) = task.deadline.filter(|date| *date > today) {
                return (!task.completed).then(|| Upcoming {
                    date: deadline,
                    reason: DueReason::Deadline,
                    task: task.clone(),
                });
            }
            task.recurrence.next_after(today).map(|date| Upcoming {
                date,
                reason: DueReason::Recurrence,
                task: task.clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.task.id.cmp(&b.task.id)));
    rows
}

/// An unfinished task whose deadline has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overdue {
    pub days_late: i64,
    pub task: Task,
}

/// Unfinished tasks with a deadline before `today`, most overdue first.
#[must_use]
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<Overdue> {
    let mut rows: Vec<Overdue> = tasks
        .iter()
        .filter(|task| !task.completed)
        .filter_map(|task| {
            let deadline = task.deadline.filter(|date| *date < today)?;
            Some(Overdue {
                days_late: (today - deadline).num_days(),
                task: task.clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        b.days_late
            .cmp(&a.days_late)
            .then_with(|| a.task.id.cmp(&b.task.id))
    });
    rows
}

use chrono::NaiveDate;
use tracing::{debug, instrument};

use super::project_day;
use crate::model::{Entry, Task};

/// Tasks due on `today`: deadline-today tasks as stored, recurring tasks
/// matching today's weekday as instances bound to `today`.
///
/// Output follows input order; callers group for display themselves.
#[must_use]
#[instrument(skip(tasks), fields(tasks = tasks.len()))]
pub fn project_today(tasks: &[Task], today: NaiveDate) -> Vec<Entry> {
    let entries = project_day(tasks, today);
    debug!(entries = entries.len(), "projected today");
    entries
}

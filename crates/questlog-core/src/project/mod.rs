//! Projection of a task snapshot onto concrete calendar days.
//!
//! Both entry points share one per-day rule:
//!
//! 1. a task whose deadline is the day is included as-is;
//! 2. otherwise a task whose recurrence matches the day's weekday is included
//!    as an instance materialized for that day.
//!
//! Each source task contributes at most one entry per day. Deadline wins when a
//! task carries both a deadline and recurrence rules, and repeated ids in the
//! input keep their first occurrence.
//!
//! Projections are pure: they read a borrowed snapshot, hold no state between
//! calls, and return freshly built values.

mod materialize;
mod today;
mod window;

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::model::{Entry, Task, TaskId};

pub use materialize::materialize;
pub use today::project_today;
pub use window::{DEFAULT_WINDOW_DAYS, project_window};

/// Entries due on `day`, in input order.
pub(crate) fn project_day(tasks: &[Task], day: NaiveDate) -> Vec<Entry> {
    let mut bucket = DayBucket::new(day);
    for task in tasks {
        bucket.offer(task);
    }
    bucket.into_entries()
}

/// Accumulates one day's entries, deduplicated by source task id.
struct DayBucket<'a> {
    day: NaiveDate,
    seen: HashSet<&'a TaskId>,
    entries: Vec<Entry>,
}

impl<'a> DayBucket<'a> {
    fn new(day: NaiveDate) -> Self {
        Self {
            day,
            seen: HashSet::new(),
            entries: Vec::new(),
        }
    }

    fn offer(&mut self, task: &'a Task) {
        let entry = if task.is_due_on(self.day) {
            Entry::Task(task.clone())
        } else if task.recurrence.matches_date(self.day) {
            Entry::Instance(materialize(task, self.day))
        } else {
            return;
        };

        if self.seen.insert(&task.id) {
            self.entries.push(entry);
        } else {
            tracing::warn!(task = %task.id, day = %self.day, "duplicate task id in snapshot; keeping first");
        }
    }

    fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

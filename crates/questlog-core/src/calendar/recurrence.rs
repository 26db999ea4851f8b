use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::weekday::{Weekday, add_days, weekday_of};

/// Weekly recurrence rules: the set of weekdays a task repeats on.
///
/// An empty set means the task does not recur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recurrence(BTreeSet<Weekday>);

impl Recurrence {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self(days.into_iter().collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, day: Weekday) -> bool {
        self.0.insert(day)
    }

    /// Days in Sunday-first order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    /// True iff `day` is one of the rule days. Never true for an empty set.
    #[must_use]
    pub fn matches(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// True iff the weekday of `date` is one of the rule days.
    #[must_use]
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.matches(weekday_of(date))
    }

    /// Earliest date strictly after `date` that matches, at most a week out.
    #[must_use]
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        (1..=7)
            .map(|offset| add_days(date, offset))
            .find(|candidate| self.matches_date(*candidate))
    }
}

impl FromIterator<Weekday> for Recurrence {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self::from_days(iter)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.days() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(day.as_str())?;
            first = false;
        }
        Ok(())
    }
}

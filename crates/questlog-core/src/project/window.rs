use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::project_day;
use crate::calendar::add_days;
use crate::model::{Entry, Task};

/// Default length of the forward calendar window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Per-day entries for the `window_days` days after `today`.
///
/// `today` itself is never a key (see [`super::project_today`]). Days with no
/// entries are absent from the map, so a missing key means an empty day. The
/// window ends early at the last date chrono can represent.
#[must_use]
#[instrument(skip(tasks), fields(tasks = tasks.len()))]
pub fn project_window(
    tasks: &[Task],
    today: NaiveDate,
    window_days: u32,
) -> BTreeMap<NaiveDate, Vec<Entry>> {
    let mut days = BTreeMap::new();
    if tasks.is_empty() {
        return days;
    }

    let mut previous = today;
    for offset in 1..=i64::from(window_days) {
        let day = add_days(today, offset);
        // add_days saturates at the last representable date
        if day <= previous {
            break;
        }
        previous = day;
        let entries = project_day(tasks, day);
        if !entries.is_empty() {
            days.insert(day, entries);
        }
    }

    debug!(days = days.len(), "projected window");
    days
}

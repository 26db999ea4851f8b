//! Calendar primitives: weekday tags, day offsets, and weekly recurrence rules.

pub mod recurrence;
pub mod weekday;

pub use recurrence::Recurrence;
pub use weekday::{Weekday, add_days, weekday_of};

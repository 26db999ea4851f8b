//! questlog-core library.
//!
//! Pure projection of task snapshots onto "today" and a forward calendar
//! window, plus the snapshot boundary and configuration that feed it.
//!
//! # Conventions
//!
//! - **Errors**: library errors are `thiserror` enums carrying an [`error::ErrorCode`];
//!   configuration loading returns `anyhow::Result`. Projections never fail.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod board;
pub mod calendar;
pub mod config;
pub mod error;
pub mod model;
pub mod project;
pub mod snapshot;

pub use calendar::{Recurrence, Weekday, add_days, weekday_of};
pub use model::{CatalogId, Complexity, Entry, EntryKey, InstanceId, Task, TaskId, TaskInstance};
pub use project::{DEFAULT_WINDOW_DAYS, materialize, project_today, project_window};

use chrono::NaiveDate;

use crate::model::{InstanceId, Task, TaskInstance};

/// Stamp out the derived instance of `task` bound to `date`.
///
/// The source task is only read. The instance starts unresolved and carries
/// no deadline of its own.
#[must_use]
pub fn materialize(task: &Task, date: NaiveDate) -> TaskInstance {
    TaskInstance {
        instance_id: InstanceId::new(task.id.clone(), date),
        instance_date: date,
        id: task.id.clone(),
        catalog_id: task.catalog_id.clone(),
        name: task.name.clone(),
        complexity: task.complexity,
        deadline: None,
        completed: false,
        recurrence: task.recurrence.clone(),
    }
}

use chrono::NaiveDate;
use proptest::prelude::*;
use questlog_core::{
    DEFAULT_WINDOW_DAYS, Entry, InstanceId, Recurrence, Task, TaskId, Weekday, add_days,
    project_today, project_window,
};
use std::collections::HashSet;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    prop::sample::select(Weekday::ALL.to_vec())
}

/// Tasks around a fixed "today" with a tiny id pool so duplicates and
/// deadline+recurrence collisions show up often.
fn arb_task(today: NaiveDate) -> impl Strategy<Value = Task> {
    (
        "[abc@]{1,2}",
        prop::option::of(-3i64..10),
        prop::collection::vec(arb_weekday(), 0..4),
        any::<bool>(),
    )
        .prop_map(move |(id, offset, days, completed)| {
            let mut task = Task::new(id.as_str(), "c", format!("task {id}"))
                .with_recurrence(Recurrence::from_days(days))
                .with_completed(completed);
            if let Some(offset) = offset {
                task = task.with_deadline(add_days(today, offset));
            }
            task
        })
}

fn arb_snapshot() -> impl Strategy<Value = (NaiveDate, Vec<Task>)> {
    arb_date().prop_flat_map(|today| {
        (
            Just(today),
            prop::collection::vec(arb_task(today), 0..12),
        )
    })
}

fn assert_unique_day(entries: &[Entry]) -> Result<(), TestCaseError> {
    let mut keys = HashSet::new();
    let mut sources = HashSet::new();
    for entry in entries {
        prop_assert!(keys.insert(entry.key()), "duplicate key {}", entry.key());
        prop_assert!(
            sources.insert(entry.source_id().clone()),
            "task {} listed twice",
            entry.source_id()
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn today_is_idempotent((today, tasks) in arb_snapshot()) {
        prop_assert_eq!(project_today(&tasks, today), project_today(&tasks, today));
    }

    #[test]
    fn window_is_idempotent((today, tasks) in arb_snapshot()) {
        prop_assert_eq!(
            project_window(&tasks, today, DEFAULT_WINDOW_DAYS),
            project_window(&tasks, today, DEFAULT_WINDOW_DAYS)
        );
    }

    #[test]
    fn no_identity_repeats_within_a_day((today, tasks) in arb_snapshot()) {
        assert_unique_day(&project_today(&tasks, today))?;
        for entries in project_window(&tasks, today, DEFAULT_WINDOW_DAYS).values() {
            assert_unique_day(entries)?;
        }
    }

    #[test]
    fn window_stays_inside_bounds(
        (today, tasks) in arb_snapshot(),
        window_days in 0u32..15,
    ) {
        let window = project_window(&tasks, today, window_days);
        let last = add_days(today, i64::from(window_days));
        for (day, entries) in &window {
            prop_assert!(*day > today);
            prop_assert!(*day <= last);
            prop_assert!(!entries.is_empty());
        }
    }

    #[test]
    fn instances_are_open_and_bound_to_their_day((today, tasks) in arb_snapshot()) {
        let today_entries = project_today(&tasks, today).into_iter().map(|e| (today, e));
        let window_entries = project_window(&tasks, today, DEFAULT_WINDOW_DAYS)
            .into_iter()
            .flat_map(|(day, entries)| entries.into_iter().map(move |e| (day, e)));

        for (day, entry) in today_entries.chain(window_entries) {
            match entry {
                Entry::Instance(instance) => {
                    prop_assert!(!instance.completed);
                    prop_assert!(instance.deadline.is_none());
                    prop_assert_eq!(instance.instance_date, day);
                    prop_assert_eq!(instance.instance_id, InstanceId::new(instance.id.clone(), day));
                }
                Entry::Task(task) => prop_assert_eq!(task.deadline, Some(day)),
            }
        }
    }

    #[test]
    fn every_matching_task_is_listed((today, tasks) in arb_snapshot()) {
        let listed: HashSet<TaskId> = project_today(&tasks, today)
            .iter()
            .map(|entry| entry.source_id().clone())
            .collect();
        for task in &tasks {
            let due = tasks.iter().any(|other| {
                other.id == task.id
                    && (other.deadline == Some(today) || other.recurrence.matches_date(today))
            });
            prop_assert_eq!(listed.contains(&task.id), due);
        }
    }

    #[test]
    fn instance_ids_never_collide(
        a in ".{0,6}", da in arb_date(),
        b in ".{0,6}", db in arb_date(),
    ) {
        let left = InstanceId::new(TaskId::new(a.clone()), da);
        let right = InstanceId::new(TaskId::new(b.clone()), db);
        prop_assert_eq!(left.to_string() == right.to_string(), a == b && da == db);
        prop_assert_eq!(left.to_string().parse::<InstanceId>().ok(), Some(left));
    }
}

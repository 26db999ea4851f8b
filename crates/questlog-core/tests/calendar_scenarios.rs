//! Concrete calendar scenarios for the today/window projections, anchored on
//! the week of Monday 2024-06-10.

use chrono::NaiveDate;
use questlog_core::snapshot::parse_snapshot;
use questlog_core::{
    DEFAULT_WINDOW_DAYS, Entry, Recurrence, Task, Weekday, materialize, project_today,
    project_window,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn mon_thu() -> Task {
    Task::new("gym", "health", "Gym")
        .with_recurrence(Recurrence::from_days([Weekday::Mon, Weekday::Thu]))
}

#[test]
fn deadline_task_appears_only_on_its_day() {
    let exam = Task::new("exam", "school", "Exam").with_deadline(ymd(2024, 6, 10));
    let tasks = vec![exam];

    assert_eq!(project_today(&tasks, ymd(2024, 6, 10)).len(), 1);
    assert!(project_today(&tasks, ymd(2024, 6, 9)).is_empty());
    assert!(project_today(&tasks, ymd(2024, 6, 11)).is_empty());

    let from_friday = project_window(&tasks, ymd(2024, 6, 7), DEFAULT_WINDOW_DAYS);
    assert_eq!(from_friday.keys().copied().collect::<Vec<_>>(), vec![ymd(2024, 6, 10)]);
    assert!(matches!(from_friday[&ymd(2024, 6, 10)][0], Entry::Task(_)));

    // Ten days earlier the deadline is outside the window.
    assert!(project_window(&tasks, ymd(2024, 5, 31), DEFAULT_WINDOW_DAYS).is_empty());
}

#[test]
fn recurring_task_on_monday_and_tuesday() {
    let tasks = vec![mon_thu()];

    let monday = project_today(&tasks, ymd(2024, 6, 10));
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].key().to_string(), "gym@2024-06-10");

    assert!(project_today(&tasks, ymd(2024, 6, 11)).is_empty());

    let window = project_window(&tasks, ymd(2024, 6, 11), DEFAULT_WINDOW_DAYS);
    assert_eq!(
        window.keys().copied().collect::<Vec<_>>(),
        vec![ymd(2024, 6, 13), ymd(2024, 6, 17)]
    );
    assert_eq!(
        window[&ymd(2024, 6, 13)],
        vec![Entry::Instance(materialize(&tasks[0], ymd(2024, 6, 13)))]
    );
    assert_eq!(
        window[&ymd(2024, 6, 17)][0].key().to_string(),
        "gym@2024-06-17"
    );
}

#[test]
fn window_never_includes_today_or_day_eight() {
    let daily = Task::new("d", "c", "Daily").with_recurrence(Recurrence::from_days(Weekday::ALL));
    let today = ymd(2024, 6, 10);
    let window = project_window(&[daily], today, DEFAULT_WINDOW_DAYS);
    assert!(!window.contains_key(&today));
    assert!(!window.contains_key(&ymd(2024, 6, 18)));
    assert_eq!(window.len(), 7);
}

#[test]
fn malformed_task_with_both_paths_is_listed_once_per_day() {
    let both = Task::new("both", "c", "Both")
        .with_deadline(ymd(2024, 6, 13))
        .with_recurrence(Recurrence::from_days([Weekday::Thu]));
    let tasks = vec![both];

    let window = project_window(&tasks, ymd(2024, 6, 10), 14);
    let thursday = &window[&ymd(2024, 6, 13)];
    assert_eq!(thursday.len(), 1);
    assert!(matches!(thursday[0], Entry::Task(_)));

    // The following Thursday only recurrence applies.
    let next = &window[&ymd(2024, 6, 20)];
    assert_eq!(next.len(), 1);
    assert!(next[0].is_derived());
}

#[test]
fn projections_share_a_snapshot_across_threads() {
    let tasks = vec![mon_thu(), Task::new("x", "c", "X").with_deadline(ymd(2024, 6, 12))];
    let today = ymd(2024, 6, 10);
    let expected = project_window(&tasks, today, DEFAULT_WINDOW_DAYS);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| project_window(&tasks, today, DEFAULT_WINDOW_DAYS)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}

#[test]
fn service_payload_projects_end_to_end() {
    let snapshot = parse_snapshot(
        r#"{
            "catalogs": [
                {"catalog_id": 1, "name": "Health", "tasks": [
                    {"task_id": 11, "name": "Gym", "complexity": "hard", "completed": "true",
                     "daily_tasks": [{"day_week": "mon"}, {"day_week": "thu"}]}
                ]},
                {"catalog_id": 2, "name": "Study", "tasks": [
                    {"task_id": 21, "name": "Essay", "complexity": "mythic",
                     "deadline": "2024-06-10T00:00:00.000Z", "completed": "false"}
                ]}
            ]
        }"#,
    )
    .expect("parse");

    let today = project_today(&snapshot.tasks, ymd(2024, 6, 10));
    let keys: Vec<String> = today.iter().map(|e| e.key().to_string()).collect();
    assert_eq!(keys, vec!["11@2024-06-10", "21"]);
    assert!(!today[0].completed(), "instance ignores stored completion");
    assert_eq!(today[1].complexity().to_string(), "normal");
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    use crate::board::TaskBoard;
    use crate::model::filter::{DueDateFilter, StatusFilter, TaskFilters};
    use crate::model::snapshot::BoardSnapshot;
    use crate::model::task::{Category, Priority, Task, TaskDraft};
    use crate::time::{Clock, FixedClock};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn board() -> TaskBoard<FixedClock> {
        TaskBoard::with_clock(FixedClock::on(today()))
    }

    /// Clock whose `now` walks backwards one minute per call.
    struct RewindingClock {
        now: Cell<DateTime<Utc>>,
    }

    impl Clock for RewindingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.now.get();
            self.now.set(now - Duration::minutes(1));
            now
        }

        fn today(&self) -> NaiveDate {
            today()
        }
    }

    #[test]
    fn test_add_then_list_with_default_filters() {
        let mut board = board();
        let id = board.add_task(TaskDraft::new("X", Priority::Low, Category::Design));

        let visible = board.get_filtered_tasks();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].task_name, "X");
        assert_eq!(visible[0].id, id);
        assert!(!visible[0].completed);
        assert_eq!(visible[0].assigned_on, FixedClock::on(today()).now());
    }

    #[test]
    fn test_add_respects_explicit_completed() {
        let mut board = board();
        let id = board.add_task(TaskDraft::new("done", Priority::Low, Category::Other).completed(true));
        assert!(board.find(&id).unwrap().completed);
    }

    #[test]
    fn test_incomplete_overdue_scenario() {
        let mut board = board();
        let overdue = board.add_task(
            TaskDraft::new("one", Priority::High, Category::Backend).due(today() - Duration::days(1)),
        );
        board.add_task(TaskDraft::new("two", Priority::Low, Category::Frontend).completed(true));

        board.set_filters(TaskFilters {
            status: StatusFilter::Incomplete,
            due_date: Some(DueDateFilter::Overdue),
            ..Default::default()
        });
        let visible: Vec<Uuid> = board.get_filtered_tasks().iter().map(|t| t.id).collect();
        assert_eq!(visible, vec![overdue]);
    }

    #[test]
    fn test_today_is_injected() {
        let mut board = board();
        board.add_task(TaskDraft::new("due", Priority::Low, Category::Other).due(today()));
        board.set_filters(TaskFilters {
            due_date: Some(DueDateFilter::Today),
            ..Default::default()
        });

        assert_eq!(board.get_filtered_tasks().len(), 1);
        assert!(board.get_filtered_tasks_on(today() + Duration::days(1)).is_empty());
    }

    #[test]
    fn test_search_combines_with_filters() {
        let mut board = board();
        board.add_task(TaskDraft::new("Deploy API", Priority::High, Category::Backend));
        board.add_task(TaskDraft::new("Deploy site", Priority::Low, Category::Frontend));
        board.add_task(TaskDraft::new("Retro", Priority::High, Category::Meeting));

        board.set_search_term("deploy");
        board.set_filters(TaskFilters {
            priority: Some(Priority::High),
            ..Default::default()
        });
        let names: Vec<&str> = board.get_filtered_tasks().iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, vec!["Deploy API"]);
        assert_eq!(board.search_term(), "deploy");

        board.set_search_term("");
        board.reset_filters();
        assert_eq!(board.get_filtered_tasks().len(), 3);
    }

    #[test]
    fn test_assigned_on_never_decreases() {
        let start = Utc::now();
        let mut board = TaskBoard::with_clock(RewindingClock { now: Cell::new(start) });
        for i in 0..5 {
            board.add_task(TaskDraft::new(format!("t{i}"), Priority::Low, Category::Other));
        }
        let stamps: Vec<_> = board.tasks().iter().map(|t| t.assigned_on).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert!(stamps.iter().all(|s| *s == start));
    }

    #[test]
    fn test_from_snapshot_continues_after_latest_stamp() {
        let future = Utc::now() + Duration::days(365);
        let stored = TaskDraft::new("old", Priority::Low, Category::Other).into_task(Uuid::new_v4(), future);
        let snapshot = BoardSnapshot {
            tasks: vec![stored],
            filters: TaskFilters::default(),
        };
        let mut board = TaskBoard::from_snapshot(snapshot, FixedClock::on(today()));
        let id = board.add_task(TaskDraft::new("new", Priority::Low, Category::Other));
        assert_eq!(board.find(&id).unwrap().assigned_on, future);
    }

    #[test]
    fn test_snapshot_keeps_filters_but_not_search() {
        let mut board = board();
        board.add_task(TaskDraft::new("a", Priority::Low, Category::Other));
        board.set_search_term("a");
        board.set_filters(TaskFilters {
            category: Some(Category::Other),
            ..Default::default()
        });

        let restored = TaskBoard::from_snapshot(board.snapshot(), FixedClock::on(today()));
        assert_eq!(restored.tasks(), board.tasks());
        assert_eq!(restored.filters(), board.filters());
        assert_eq!(restored.search_term(), "");
    }

    // --- Properties ---

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn arb_status() -> impl Strategy<Value = StatusFilter> {
        prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Completed),
            Just(StatusFilter::Incomplete),
        ]
    }

    fn arb_user() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["", "Alice", "alicia", "BOB", "Carol Ann"]).prop_map(String::from)
    }

    fn arb_draft() -> impl Strategy<Value = TaskDraft> {
        (
            prop::sample::select(vec!["Write spec", "fix bug", "Design review", "standup", "SPEC sync"]),
            arb_priority(),
            arb_category(),
            prop::option::of(-5i64..5),
            arb_user(),
            any::<bool>(),
        )
            .prop_map(|(name, priority, category, offset, user, completed)| TaskDraft {
                task_name: name.to_string(),
                priority,
                category,
                due_date: offset.map(|d| today() + Duration::days(d)),
                assigned_user: user,
                completed,
            })
    }

    fn arb_filters() -> impl Strategy<Value = TaskFilters> {
        (
            arb_status(),
            prop::option::of(arb_priority()),
            prop::option::of(arb_category()),
            prop::option::of(prop::sample::select(DueDateFilter::ALL.to_vec())),
            prop::sample::select(vec!["", "ali", "b", "ANN", "zed"]),
        )
            .prop_map(|(status, priority, category, due_date, user)| TaskFilters {
                status,
                priority,
                category,
                due_date,
                assigned_user: user.to_string(),
            })
    }

    // Independent restatement of each clause.
    fn expected_visible(task: &Task, f: &TaskFilters, search: &str) -> bool {
        let status_ok = match f.status {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Incomplete => !task.completed,
        };
        let due_ok = match (f.due_date, task.due_date) {
            (None, _) => true,
            (Some(DueDateFilter::NoDueDate), due) => due.is_none(),
            (Some(_), None) => false,
            (Some(DueDateFilter::Overdue), Some(d)) => d < today(),
            (Some(DueDateFilter::Today), Some(d)) => d == today(),
            (Some(DueDateFilter::Upcoming), Some(d)) => d > today(),
        };
        status_ok
            && f.priority.map_or(true, |p| p == task.priority)
            && f.category.map_or(true, |c| c == task.category)
            && task.assigned_user.to_lowercase().contains(&f.assigned_user.to_lowercase())
            && task.task_name.to_lowercase().contains(&search.to_lowercase())
            && due_ok
    }

    proptest! {
        #[test]
        fn prop_added_ids_are_unique(drafts in prop::collection::vec(arb_draft(), 0..40)) {
            let mut board = board();
            let returned: Vec<Uuid> = drafts.into_iter().map(|d| board.add_task(d)).collect();

            let mut ids: Vec<Uuid> = board.tasks().iter().map(|t| t.id).collect();
            prop_assert_eq!(&ids, &returned);
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), board.tasks().len());
        }

        #[test]
        fn prop_toggle_twice_restores(drafts in prop::collection::vec(arb_draft(), 1..20), pick in any::<prop::sample::Index>()) {
            let mut board = board();
            for d in drafts {
                board.add_task(d);
            }
            let before = board.tasks().to_vec();
            let id = before[pick.index(before.len())].id;

            board.toggle_task(&id);
            prop_assert_ne!(board.tasks(), before.as_slice());
            board.toggle_task(&id);
            prop_assert_eq!(board.tasks(), before.as_slice());
        }

        #[test]
        fn prop_unknown_id_mutations_are_noops(drafts in prop::collection::vec(arb_draft(), 0..20), stray in any::<u128>()) {
            let mut board = board();
            for d in drafts {
                board.add_task(d);
            }
            let before = board.tasks().to_vec();
            let stray = Uuid::from_u128(stray);
            prop_assume!(board.find(&stray).is_none());

            board.delete_task(&stray);
            board.toggle_task(&stray);
            board.edit_task(TaskDraft::new("ghost", Priority::High, Category::Other).into_task(stray, Utc::now()));
            prop_assert_eq!(board.tasks(), before.as_slice());
        }

        #[test]
        fn prop_filtering_is_clause_conjunction(
            drafts in prop::collection::vec(arb_draft(), 0..30),
            filters in arb_filters(),
            search in prop::sample::select(vec!["", "spec", "BUG", "review", "x"]),
        ) {
            let mut board = board();
            for d in drafts {
                board.add_task(d);
            }
            board.set_filters(filters.clone());
            board.set_search_term(search);

            let visible: Vec<Uuid> = board.get_filtered_tasks().iter().map(|t| t.id).collect();
            let expected: Vec<Uuid> = board
                .tasks()
                .iter()
                .filter(|t| expected_visible(t, &filters, search))
                .map(|t| t.id)
                .collect();
            prop_assert_eq!(visible, expected);
        }

        #[test]
        fn prop_reset_restores_initial_filters(sequence in prop::collection::vec(arb_filters(), 0..10)) {
            let mut board = board();
            let initial = board.filters().clone();
            for f in sequence {
                board.set_filters(f);
            }
            board.reset_filters();
            prop_assert_eq!(board.filters(), &initial);
        }
    }
}

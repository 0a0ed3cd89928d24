//! # Engine Scenarios
//!
//! End-to-end behaviour of the account-scoped services against a real redb
//! store: feature actions, the rewards they trigger, and the streak caches.

use chrono::{Days, NaiveDate};
use lifeos_core::services::{
    GoalPatch, HealthPatch, LearningPatch, NewFocusSession, NewGoal, NewHabit, NewIdea,
    NewLearningItem, NewMilestone, NewReflection, NewTask, NewTransaction, NewWorkout,
    TaskFilter, TaskPatch, TransactionFilter, register,
};
use lifeos_core::{
    AccountId, AccountScope, Clock, FocusKind, LifeError, Priority, RedbStore, TransactionKind,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("date")
}

fn clock() -> Clock {
    Clock::fixed_on(today())
}

fn setup() -> (RedbStore, AccountId) {
    let store = RedbStore::in_memory().expect("store");
    let registration = register(&store, &clock(), "Ada", "ada@example.com").expect("register");
    let id = registration.account.id;
    (store, id)
}

fn task(title: &str) -> NewTask {
    NewTask {
        title: title.into(),
        description: None,
        priority: Priority::Medium,
        category: None,
        due_date: None,
    }
}

fn habit(name: &str) -> NewHabit {
    NewHabit {
        name: name.into(),
        icon: None,
        color: None,
        cadence: Default::default(),
    }
}

// =============================================================================
// END-TO-END
// =============================================================================

mod end_to_end {
    use super::*;

    /// Three tasks and a week-long habit run, then un-checking today.
    #[test]
    fn tasks_and_habit_week() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());

        for title in ["one", "two", "three"] {
            let t = scope.create_task(task(title)).expect("create");
            let toggled = scope.toggle_task(t.id).expect("toggle");
            assert!(toggled.item.completed);
            assert!(toggled.progression.is_some());
        }
        let profile = scope.profile().expect("profile");
        assert_eq!(profile.xp, 30);
        assert_eq!(profile.level, 1);

        let h = scope.create_habit(habit("Read")).expect("habit");
        let mut last = None;
        for back in (0..7).rev() {
            let date = today() - Days::new(back);
            last = Some(scope.toggle_habit(h.id, Some(date)).expect("toggle"));
        }
        let last = last.expect("toggled");
        assert_eq!(last.item.streak, 7);
        assert_eq!(last.item.best_streak, 7);

        let undone = scope.toggle_habit(h.id, Some(today())).expect("untoggle");
        assert_eq!(undone.item.streak, 6);
        assert_eq!(undone.item.best_streak, 7);
        assert!(undone.progression.is_none());
    }
}

// =============================================================================
// REWARDS
// =============================================================================

mod rewards {
    use super::*;

    #[test]
    fn task_reward_only_on_first_completion() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let t = scope.create_task(task("report")).expect("create");

        let done = scope
            .update_task(
                t.id,
                TaskPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .expect("complete");
        assert_eq!(done.progression.map(|p| p.xp_added), Some(10));

        let again = scope
            .update_task(
                t.id,
                TaskPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .expect("complete again");
        assert!(again.progression.is_none());

        let reopened = scope.toggle_task(t.id).expect("reopen");
        assert!(!reopened.item.completed);
        assert!(reopened.progression.is_none());
        assert_eq!(scope.profile().expect("profile").xp, 10);
    }

    #[test]
    fn habit_backfill_earns_nothing() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let h = scope.create_habit(habit("Run")).expect("habit");

        let yesterday = scope
            .toggle_habit(h.id, Some(today() - Days::new(1)))
            .expect("toggle");
        assert!(yesterday.progression.is_none());
        assert_eq!(yesterday.item.streak, 1);

        let now = scope.toggle_habit(h.id, Some(today())).expect("toggle");
        assert_eq!(now.progression.map(|p| p.xp_added), Some(5));
        assert_eq!(now.item.streak, 2);
    }

    #[test]
    fn habit_toggle_defaults_to_scope_day() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let h = scope.create_habit(habit("Walk")).expect("habit");

        let checked = scope.toggle_habit(h.id, None).expect("toggle");
        assert!(checked.item.completed_dates.contains(&today()));
        assert_eq!(checked.progression.map(|p| p.xp_added), Some(5));
    }

    #[test]
    fn habit_toggle_rejects_future_dates() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let h = scope.create_habit(habit("Walk")).expect("habit");

        let tomorrow = scope.toggle_habit(h.id, Some(today() + Days::new(1)));
        assert!(matches!(tomorrow, Err(LifeError::Invalid(_))));

        let habits = scope.list_habits().expect("habits");
        let stored = &habits[0];
        assert!(stored.completed_dates.is_empty());
        assert_eq!(scope.profile().expect("profile").xp, 0);
    }

    #[test]
    fn learning_reward_once_per_finish() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let item = scope
            .create_learning(NewLearningItem {
                title: "Rust book".into(),
                kind: Default::default(),
                category: None,
                progress: 40,
                notes: None,
                url: Some("https://doc.rust-lang.org/book/".into()),
            })
            .expect("create");

        let patch = |p: u8| LearningPatch {
            progress: Some(p),
            ..Default::default()
        };
        let finished = scope.update_learning(item.id, patch(100)).expect("finish");
        assert_eq!(finished.progression.map(|p| p.xp_added), Some(50));
        assert!(finished.item.completed_at.is_some());

        let still = scope.update_learning(item.id, patch(100)).expect("again");
        assert!(still.progression.is_none());

        let reopened = scope.update_learning(item.id, patch(90)).expect("reopen");
        assert!(reopened.item.completed_at.is_none());
    }

    #[test]
    fn goal_bonus_is_paid_once() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let goal = scope
            .create_goal(NewGoal {
                title: "Marathon".into(),
                description: None,
                category: Default::default(),
                progress: 0,
                target_date: None,
                milestones: vec![
                    NewMilestone {
                        title: "10k".into(),
                        completed: true,
                    },
                    NewMilestone {
                        title: "half".into(),
                        completed: false,
                    },
                ],
            })
            .expect("goal");
        assert_eq!(goal.progress, 50);
        let open = goal.milestones[1].id;

        let achieved = scope.toggle_milestone(goal.id, open).expect("toggle");
        assert_eq!(achieved.item.progress, 100);
        assert_eq!(achieved.progression.map(|p| p.xp_added), Some(100));

        scope.toggle_milestone(goal.id, open).expect("untoggle");
        let again = scope.toggle_milestone(goal.id, open).expect("retoggle");
        assert_eq!(again.item.progress, 100);
        assert!(again.progression.is_none());
        assert_eq!(scope.profile().expect("profile").xp, 100);
    }

    #[test]
    fn goal_progress_is_derived_when_milestones_exist() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let goal = scope
            .create_goal(NewGoal {
                title: "Save".into(),
                description: None,
                category: Default::default(),
                progress: 0,
                target_date: None,
                milestones: vec![],
            })
            .expect("goal");
        let goal = scope
            .add_milestone(
                goal.id,
                NewMilestone {
                    title: "first".into(),
                    completed: false,
                },
            )
            .expect("milestone");

        let result = scope.update_goal(
            goal.id,
            GoalPatch {
                progress: Some(80),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(LifeError::Invalid(_))));
    }

    #[test]
    fn focus_work_and_break_rewards() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let work = scope
            .create_focus(NewFocusSession {
                duration_minutes: 25,
                kind: FocusKind::Pomodoro,
            })
            .expect("work");
        let rest = scope
            .create_focus(NewFocusSession {
                duration_minutes: 5,
                kind: FocusKind::ShortBreak,
            })
            .expect("break");
        assert_eq!(work.progression.map(|p| p.xp_added), Some(20));
        assert_eq!(rest.progression.map(|p| p.xp_added), Some(5));

        let stats = scope.focus_stats().expect("stats");
        assert_eq!(stats.total_minutes, 30);
        assert_eq!(stats.today_minutes, 30);
        assert_eq!(stats.total_sessions, 2);
    }

    #[test]
    fn workout_idea_and_reflection_rewards() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());

        let entry = scope.health_today().expect("today");
        let workout = scope
            .add_workout(
                entry.id,
                NewWorkout {
                    kind: "run".into(),
                    duration_minutes: 30,
                    calories_burned: Some(300),
                    notes: None,
                },
            )
            .expect("workout");
        assert_eq!(workout.progression.map(|p| p.xp_added), Some(15));

        let idea = scope
            .create_idea(NewIdea {
                title: "Garden planner".into(),
                content: None,
                category: None,
                tags: vec![],
                pinned: false,
            })
            .expect("idea");
        assert_eq!(idea.progression.map(|p| p.xp_added), Some(5));

        let reflection = NewReflection {
            date: None,
            gratitude: vec!["sun".into()],
            wins: vec![],
            improvements: vec![],
            mood: 4,
            energy_level: 3,
        };
        let recorded = scope.create_reflection(reflection.clone()).expect("reflection");
        assert_eq!(recorded.progression.map(|p| p.current_xp), Some(40));
        assert!(matches!(
            scope.create_reflection(reflection),
            Err(LifeError::Conflict(_))
        ));
    }

    #[test]
    fn manual_grant_validates_amount() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());

        assert!(matches!(scope.grant_xp(0), Err(LifeError::InvalidAward(0))));
        assert!(matches!(scope.grant_xp(-20), Err(LifeError::InvalidAward(-20))));
        assert_eq!(scope.profile().expect("profile").xp, 0);

        let progression = scope.grant_xp(1000).expect("grant");
        assert!(progression.leveled_up);
        assert_eq!(progression.level, 2);
        assert_eq!(scope.profile().expect("profile").xp_to_next_level, 1000);
    }

    #[test]
    fn engagement_streak_lapses_across_days() {
        let (store, account) = setup();
        let day_one = AccountScope::new(&store, account, &clock());
        day_one.grant_xp(5).expect("grant");

        let next = Clock::fixed_on(today() + Days::new(1));
        let day_two = AccountScope::new(&store, account, &next);
        day_two.grant_xp(5).expect("grant");
        assert_eq!(day_two.profile().expect("profile").streak, 2);

        let later = Clock::fixed_on(today() + Days::new(5));
        let idle = AccountScope::new(&store, account, &later);
        assert_eq!(idle.profile().expect("profile").streak, 0);
    }
}

// =============================================================================
// ISOLATION AND LISTINGS
// =============================================================================

mod isolation {
    use super::*;

    #[test]
    fn accounts_cannot_see_each_other() {
        let (store, ada) = setup();
        let bob = register(&store, &clock(), "Bob", "bob@example.com")
            .expect("register")
            .account
            .id;

        let ada_scope = AccountScope::new(&store, ada, &clock());
        let bob_scope = AccountScope::new(&store, bob, &clock());
        let t = ada_scope.create_task(task("private")).expect("create");

        assert!(bob_scope.list_tasks(&TaskFilter::default()).expect("list").is_empty());
        assert!(matches!(
            bob_scope.toggle_task(t.id),
            Err(LifeError::NotFound { kind: "Task", .. })
        ));
        assert!(matches!(
            bob_scope.delete_task(t.id),
            Err(LifeError::NotFound { .. })
        ));
        assert_eq!(ada_scope.list_tasks(&TaskFilter::default()).expect("list").len(), 1);
    }

    #[test]
    fn duplicate_email_conflicts_case_insensitively() {
        let (store, _) = setup();
        let result = register(&store, &clock(), "Other", "ADA@example.com");
        assert!(matches!(result, Err(LifeError::Conflict(_))));
    }

    #[test]
    fn open_tasks_listed_first() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let first = scope.create_task(task("first")).expect("create");
        scope.create_task(task("second")).expect("create");
        scope.toggle_task(first.id).expect("toggle");

        let titles: Vec<String> = scope
            .list_tasks(&TaskFilter::default())
            .expect("list")
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);

        let done = scope
            .list_tasks(&TaskFilter {
                completed: Some(true),
                priority: None,
            })
            .expect("list");
        assert_eq!(done.len(), 1);
    }

    #[test]
    fn transaction_summary_and_filters() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let add = |kind, cents| {
            scope
                .create_transaction(NewTransaction {
                    kind,
                    amount_cents: cents,
                    category: "misc".into(),
                    description: None,
                    date: None,
                })
                .expect("transaction")
        };
        add(TransactionKind::Income, 250_000);
        add(TransactionKind::Expense, 4_550);
        add(TransactionKind::Expense, 300_000);

        let summary = scope.transaction_summary().expect("summary");
        assert_eq!(summary.total_income_cents, 250_000);
        assert_eq!(summary.total_expenses_cents, 304_550);
        assert_eq!(summary.balance_cents, -54_550);

        let expenses = scope
            .list_transactions(&TransactionFilter {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            })
            .expect("list");
        assert_eq!(expenses.len(), 2);

        let zero = scope.create_transaction(NewTransaction {
            kind: TransactionKind::Income,
            amount_cents: 0,
            category: "misc".into(),
            description: None,
            date: None,
        });
        assert!(matches!(zero, Err(LifeError::Invalid(_))));
    }

    #[test]
    fn health_today_is_created_once() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let first = scope.health_today().expect("today");
        let second = scope.health_today().expect("today");
        assert_eq!(first.id, second.id);

        let updated = scope
            .update_health(
                first.id,
                HealthPatch {
                    sleep_minutes: Some(450),
                    ..Default::default()
                },
            )
            .expect("update");
        assert_eq!(updated.sleep_minutes, 450);

        let too_long = scope.update_health(
            first.id,
            HealthPatch {
                sleep_minutes: Some(1441),
                ..Default::default()
            },
        );
        assert!(matches!(too_long, Err(LifeError::Invalid(_))));
        assert_eq!(scope.list_health().expect("list").len(), 1);
    }

    #[test]
    fn export_contains_everything() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        scope.create_task(task("t")).expect("task");
        scope.create_habit(habit("h")).expect("habit");

        let export = scope.export().expect("export");
        assert_eq!(export.profile.id, account);
        assert_eq!(export.tasks.len(), 1);
        assert_eq!(export.habits.len(), 1);
        assert!(export.goals.is_empty());
    }
}

// =============================================================================
// CONCURRENCY
// =============================================================================

mod concurrency {
    use super::*;
    use std::thread;

    #[test]
    fn parallel_xp_grants_all_land() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        scope.grant_xp(3).expect("grant");
                    }
                });
            }
        });

        let profile = scope.profile().expect("profile");
        assert_eq!(profile.xp, 8 * 50 * 3);
        assert_eq!(profile.level, 2);
    }

    #[test]
    fn parallel_toggles_on_one_habit_keep_every_date() {
        let (store, account) = setup();
        let scope = AccountScope::new(&store, account, &clock());
        let id = scope.create_habit(habit("Meditate")).expect("habit").id;

        thread::scope(|s| {
            for back in 0..10 {
                s.spawn(move || {
                    scope
                        .toggle_habit(id, Some(today() - Days::new(back)))
                        .expect("toggle");
                });
            }
        });

        let habits = scope.list_habits().expect("habits");
        let stored = &habits[0];
        assert_eq!(stored.completed_dates.len(), 10);
        assert_eq!(stored.streak, 10);
        assert_eq!(stored.best_streak, 10);
        assert_eq!(scope.profile().expect("profile").xp, 5);
    }
}

// =============================================================================
// FILE BACKEND
// =============================================================================

mod file_backend {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn progression_survives_reopen() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("lifeos.redb");

        let (account, habit_id) = {
            let store = RedbStore::open(&path).expect("open");
            let account = register(&store, &clock(), "Ada", "ada@example.com")
                .expect("register")
                .account
                .id;
            let scope = AccountScope::new(&store, account, &clock());
            let h = scope.create_habit(habit("Stretch")).expect("habit");
            scope.toggle_habit(h.id, Some(today())).expect("toggle");
            (account, h.id)
        };

        let store = RedbStore::open(&path).expect("reopen");
        let scope = AccountScope::new(&store, account, &clock());
        assert_eq!(scope.profile().expect("profile").xp, 5);
        let habits = scope.list_habits().expect("habits");
        assert_eq!(habits[0].id, habit_id);
        assert_eq!(habits[0].streak, 1);
        assert!(habits[0].completed_dates.contains(&today()));
    }
}

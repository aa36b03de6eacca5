//! Library-level tests driving the Tracker in-process.

use punchlog::core::Tracker;
use punchlog::core::leaderboard::Metric;
use punchlog::core::retention::RetentionPolicy;
use punchlog::errors::AppError;
use punchlog::models::action::Action;
use punchlog::models::event::{EventDraft, EventFilter};

fn task_event(action: Action, subject: &str, category: &str) -> EventDraft {
    let mut draft = EventDraft::new(action, subject);
    draft.category = category.to_string();
    draft.status = action.to_db_str().to_string();
    draft
}

#[test]
fn clock_in_out_lifecycle() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    let session = tracker.clock_in("emp-1", "UA").expect("clock in");
    assert!(session.clock_out.is_none());

    // second clock-in for the same subject conflicts
    let err = tracker.clock_in("emp-1", "UA").unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // clock-out closes the session
    let closed = tracker.clock_out(&session.session_id).expect("clock out");
    assert!(closed.clock_out.is_some());

    // closing again is AlreadyClosed
    let err = tracker.clock_out(&session.session_id).unwrap_err();
    assert!(matches!(err, AppError::AlreadyClosed(_)));

    // unknown session id is NotFound
    let err = tracker.clock_out("no-such-session").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // subject can start a new cycle
    assert!(tracker.open_session("emp-1").expect("lookup").is_none());
    tracker.clock_in("emp-1", "UA").expect("clock in again");
    assert!(tracker.open_session("emp-1").expect("lookup").is_some());
}

#[test]
fn no_two_open_sessions_even_under_contention() {
    let tracker = Tracker::open_in_memory().expect("tracker").into_shared();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let shared = tracker.clone();
        handles.push(std::thread::spawn(move || {
            let mut t = shared.lock().expect("lock");
            t.clock_in("emp-1", "race").is_ok()
        }));
    }

    let successes = handles
        .into_iter()
        .map(|h| h.join().expect("join"))
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);

    // exactly one open session and one clock_in event
    let mut t = tracker.lock().expect("lock");
    assert!(t.open_session("emp-1").expect("lookup").is_some());
    let events = t.query(&EventFilter::default()).expect("query");
    assert_eq!(events.len(), 1);
}

#[test]
fn every_session_operation_appends_one_event() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    let session = tracker.clock_in("emp-1", "UA").expect("clock in");
    tracker.clock_out(&session.session_id).expect("clock out");

    let events = tracker.query(&EventFilter::default()).expect("query");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, Action::ClockIn);
    assert_eq!(events[1].action, Action::ClockOut);

    // ids strictly increase in append order
    assert!(events[0].id < events[1].id);

    // the clock-out event carries the elapsed duration
    assert!(events[1].meta.get("durationSecs").is_some());
}

#[test]
fn subject_rates_follow_the_formula() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    for _ in 0..3 {
        tracker
            .record(task_event(Action::Created, "emp-2", "support"))
            .expect("record");
    }
    tracker
        .record(task_event(Action::Completed, "emp-2", "support"))
        .expect("record");

    let stats = tracker.subject_stats("emp-2").expect("subject stats");
    assert_eq!(stats.total_assigned, 3);
    assert_eq!(stats.total_completed, 1);
    assert_eq!(stats.completion_rate(), 33);
    assert!(stats.completion_rate() >= 0 && stats.completion_rate() <= 100);
    assert_eq!(stats.acknowledgment_rate(), 0);
}

#[test]
fn recompute_matches_incremental_state() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    let session = tracker.clock_in("emp-1", "UA").expect("clock in");
    tracker
        .record(task_event(Action::Created, "emp-1", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Created, "emp-2", "support"))
        .expect("record");
    tracker
        .record(task_event(Action::Completed, "emp-2", "support"))
        .expect("record");
    tracker
        .record(task_event(Action::Deleted, "emp-1", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Acknowledged, "emp-2", "support"))
        .expect("record");
    tracker.clock_out(&session.session_id).expect("clock out");

    let global_before = tracker.stats().clone();
    let emp1_before = tracker.subject_stats("emp-1").expect("emp-1").clone();
    let emp2_before = tracker.subject_stats("emp-2").expect("emp-2").clone();
    let board_before = tracker.leaderboard(Metric::CompletionRate);

    tracker.recompute().expect("recompute");

    assert_eq!(tracker.stats(), &global_before);
    assert_eq!(tracker.subject_stats("emp-1").expect("emp-1"), &emp1_before);
    assert_eq!(tracker.subject_stats("emp-2").expect("emp-2"), &emp2_before);

    let board_after = tracker.leaderboard(Metric::CompletionRate);
    let ids_before: Vec<_> = board_before.iter().map(|r| r.subject_id.clone()).collect();
    let ids_after: Vec<_> = board_after.iter().map(|r| r.subject_id.clone()).collect();
    assert_eq!(ids_before, ids_after);
}

#[test]
fn compaction_leaves_live_aggregates_unchanged() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    tracker
        .record(task_event(Action::Created, "emp-1", "ops"))
        .expect("record");

    // plant an event far past the horizon, then fold it in
    tracker
        .pool()
        .conn
        .execute(
            "INSERT INTO events (timestamp, action, subject_id, task_name, category,
                                 status, date, idle_seconds, acknowledged, meta)
             VALUES ('2020-01-01T09:00:00+00:00', 'created', 'emp-1', 'old task', 'ops',
                     'created', '2020-01-01', 0, 0, '')",
            [],
        )
        .expect("insert old event");
    tracker.recompute().expect("recompute");

    assert_eq!(tracker.stats().total_created, 2);
    let snapshot = tracker.stats().clone();
    let subject_snapshot = tracker.subject_stats("emp-1").expect("subject").clone();

    // compaction removes the old row from storage only
    let removed = tracker
        .compact(RetentionPolicy::new(30))
        .expect("compact");
    assert_eq!(removed, 1);

    let remaining = tracker.query(&EventFilter::default()).expect("query");
    assert_eq!(remaining.len(), 1);

    // live aggregates still reflect the discarded history
    assert_eq!(tracker.stats(), &snapshot);
    assert_eq!(
        tracker.subject_stats("emp-1").expect("subject"),
        &subject_snapshot
    );

    // a recompute over the truncated log shows smaller totals: the
    // running aggregates, not the raw log, are authoritative
    tracker.recompute().expect("recompute");
    assert_eq!(tracker.stats().total_created, 1);
}

#[test]
fn query_filters_combine_with_and() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    tracker
        .record(task_event(Action::Created, "emp-1", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Created, "emp-2", "support"))
        .expect("record");
    tracker
        .record(task_event(Action::Completed, "emp-2", "support"))
        .expect("record");

    let filter = EventFilter {
        subject_id: Some("emp-2".to_string()),
        action: Some(Action::Created),
        ..EventFilter::default()
    };
    let events = tracker.query(&filter).expect("query");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].subject_id, "emp-2");

    let filter = EventFilter {
        category: Some("missing".to_string()),
        ..EventFilter::default()
    };
    assert!(tracker.query(&filter).expect("query").is_empty());
}

#[test]
fn csv_export_matches_log_contents() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    // empty log → no export
    assert!(tracker.export_csv().expect("export").is_none());

    tracker
        .record(task_event(Action::Created, "emp-1", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Completed, "emp-1", "ops"))
        .expect("record");

    let text = tracker.export_csv().expect("export").expect("some text");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3); // header + 2 events
    assert_eq!(
        lines[0],
        "eventId,timestamp,action,subjectId,taskId,taskName,category,status,date,\
         idleSeconds,acknowledged,acknowledgedBy,acknowledgedAt"
    );

    // cells are JSON-stringified: strings quoted, null for missing task id
    assert!(lines[1].contains("\"created\""));
    assert!(lines[1].contains("null"));
}

#[test]
fn validation_failures_leave_the_log_unmodified() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    tracker
        .record(task_event(Action::Created, "emp-1", "ops"))
        .expect("record");

    let mut bad = task_event(Action::Created, "emp-1", "ops");
    bad.idle_seconds = -1;
    assert!(matches!(
        tracker.record(bad).unwrap_err(),
        AppError::Validation(_)
    ));

    let mut bad = task_event(Action::Created, "", "ops");
    bad.subject_id = "   ".to_string();
    assert!(matches!(
        tracker.record(bad).unwrap_err(),
        AppError::Validation(_)
    ));

    assert_eq!(tracker.query(&EventFilter::default()).expect("query").len(), 1);
}

#[test]
fn leaderboard_breaks_ties_by_first_seen_order() {
    let mut tracker = Tracker::open_in_memory().expect("tracker");

    // emp-a and emp-c tie on completed; emp-b leads
    tracker
        .record(task_event(Action::Completed, "emp-a", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Completed, "emp-b", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Completed, "emp-b", "ops"))
        .expect("record");
    tracker
        .record(task_event(Action::Completed, "emp-c", "ops"))
        .expect("record");

    let rows = tracker.leaderboard(Metric::TotalCompleted);
    let ids: Vec<&str> = rows.iter().map(|r| r.subject_id.as_str()).collect();
    assert_eq!(ids, ["emp-b", "emp-a", "emp-c"]);

    // one row per subject with at least one event
    assert_eq!(rows.len(), 3);
}

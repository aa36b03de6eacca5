use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_db_with_data, log_event, pcl, setup_test_db};

#[test]
fn test_clock_in_and_status() {
    let db_path = setup_test_db("clock_in_status");

    init_db(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "in", "emp-1", "--device", "UA"])
        .assert()
        .success()
        .stdout(contains("Clocked in 'emp-1'"));

    pcl()
        .args(["--db", &db_path, "--test", "status", "emp-1"])
        .assert()
        .success()
        .stdout(contains("is clocked in since"))
        .stdout(contains("device: UA"));
}

#[test]
fn test_second_clock_in_is_a_conflict() {
    let db_path = setup_test_db("clock_in_conflict");

    init_db(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "in", "emp-1", "--device", "UA"])
        .assert()
        .success();

    // same subject, still clocked in
    pcl()
        .args(["--db", &db_path, "--test", "in", "emp-1", "--device", "UA"])
        .assert()
        .failure()
        .stderr(contains("already clocked in"));

    // a different subject is unaffected
    pcl()
        .args(["--db", &db_path, "--test", "in", "emp-2"])
        .assert()
        .success();
}

#[test]
fn test_clock_out_closes_the_session() {
    let db_path = setup_test_db("clock_out");

    init_db(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "in", "emp-1"])
        .assert()
        .success();

    pcl()
        .args(["--db", &db_path, "--test", "out", "emp-1"])
        .assert()
        .success()
        .stdout(contains("Clocked out 'emp-1'"));

    // no open session left
    pcl()
        .args(["--db", &db_path, "--test", "status", "emp-1"])
        .assert()
        .success()
        .stdout(contains("is not clocked in"));

    // a second clock-out has nothing to close
    pcl()
        .args(["--db", &db_path, "--test", "out", "emp-1"])
        .assert()
        .failure()
        .stderr(contains("No active session"));
}

#[test]
fn test_clock_cycle_can_repeat() {
    let db_path = setup_test_db("clock_cycle");

    init_db(&db_path);

    for _ in 0..2 {
        pcl()
            .args(["--db", &db_path, "--test", "in", "emp-1"])
            .assert()
            .success();

        pcl()
            .args(["--db", &db_path, "--test", "out", "emp-1"])
            .assert()
            .success();
    }

    // both cycles produced clock events
    pcl()
        .args(["--db", &db_path, "--test", "list", "--action", "clock_out"])
        .assert()
        .success()
        .stdout(contains("2 events."));
}

#[test]
fn test_log_and_list_filters() {
    let db_path = setup_test_db("list_filters");

    init_db_with_data(&db_path);

    // filter by subject
    pcl()
        .args(["--db", &db_path, "--test", "list", "--subject", "emp-2"])
        .assert()
        .success()
        .stdout(contains("emp-2"))
        .stdout(contains("emp-3").not());

    // filter by action
    pcl()
        .args(["--db", &db_path, "--test", "list", "--action", "completed"])
        .assert()
        .success()
        .stdout(contains("1 events."));

    // filter by category
    pcl()
        .args(["--db", &db_path, "--test", "list", "--category", "ops"])
        .assert()
        .success()
        .stdout(contains("2 events."));
}

#[test]
fn test_list_date_range_excludes_nothing_today() {
    let db_path = setup_test_db("list_range");

    init_db_with_data(&db_path);

    let today = chrono::Local::now().date_naive().to_string();

    pcl()
        .args([
            "--db", &db_path, "--test", "list", "--from", &today, "--to", &today,
        ])
        .assert()
        .success()
        .stdout(contains("5 events."));

    // a past-only window is empty
    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "list",
            "--from",
            "2000-01-01",
            "--to",
            "2000-12-31",
        ])
        .assert()
        .success()
        .stdout(contains("No events found"));
}

#[test]
fn test_log_rejects_unknown_action() {
    let db_path = setup_test_db("bad_action");

    init_db(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "log", "destroyed", "emp-1"])
        .assert()
        .failure()
        .stderr(contains("Invalid action"));

    // clock events are reserved for the session manager
    pcl()
        .args(["--db", &db_path, "--test", "log", "clock_in", "emp-1"])
        .assert()
        .failure()
        .stderr(contains("Invalid action"));
}

#[test]
fn test_log_rejects_negative_idle_seconds() {
    let db_path = setup_test_db("bad_idle");

    init_db(&db_path);

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "log",
            "created",
            "emp-1",
            "--idle=-5",
        ])
        .assert()
        .failure()
        .stderr(contains("idle_seconds must be non-negative"));

    // the rejected event never reached the log
    pcl()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No events found"));
}

#[test]
fn test_acknowledged_event_records_who() {
    let db_path = setup_test_db("ack_by");

    init_db(&db_path);

    log_event(
        &db_path,
        "acknowledged",
        "emp-4",
        &["--task-name", "rollout", "--ack-by", "lead-1"],
    );

    pcl()
        .args(["--db", &db_path, "--test", "list", "--subject", "emp-4"])
        .assert()
        .success()
        .stdout(contains("rollout"))
        .stdout(contains("1 events."));
}

#[test]
fn test_db_info_and_oplog() {
    let db_path = setup_test_db("db_info");

    init_db_with_data(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total events:"))
        .stdout(contains("Sessions:"));

    // init wrote an oplog row
    pcl()
        .args(["--db", &db_path, "--test", "db", "--log"])
        .assert()
        .success()
        .stdout(contains("Internal oplog"))
        .stdout(contains("init"));
}

#[test]
fn test_compact_removes_nothing_recent() {
    let db_path = setup_test_db("compact_recent");

    init_db_with_data(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "compact", "--days", "30", "-y"])
        .assert()
        .success()
        .stdout(contains("Removed 0 events"));

    // everything still listed
    pcl()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("5 events."));
}

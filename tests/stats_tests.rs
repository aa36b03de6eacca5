use predicates::str::{contains, is_match};

mod common;
use common::{init_db, init_db_with_data, log_event, pcl, setup_test_db};

#[test]
fn test_global_stats_totals() {
    let db_path = setup_test_db("stats_global");

    init_db_with_data(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("Global statistics"))
        .stdout(contains("Created:"))
        .stdout(contains("support"))
        .stdout(contains("ops"));
}

#[test]
fn test_subject_stats_completion_rate() {
    let db_path = setup_test_db("stats_subject");

    // 3 created + 1 completed for emp-2 → round(100 * 1 / 3) = 33
    init_db_with_data(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "stats", "--subject", "emp-2"])
        .assert()
        .success()
        .stdout(contains("Statistics for 'emp-2'"))
        .stdout(contains("33%"));
}

#[test]
fn test_subject_stats_unknown_subject() {
    let db_path = setup_test_db("stats_unknown");

    init_db(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "stats", "--subject", "nobody"])
        .assert()
        .success()
        .stdout(contains("No events recorded for 'nobody'"));
}

#[test]
fn test_board_orders_by_completed() {
    let db_path = setup_test_db("board_order");

    init_db(&db_path);

    // emp-a completes 1 task, emp-b completes 3
    log_event(&db_path, "created", "emp-a", &[]);
    log_event(&db_path, "completed", "emp-a", &[]);
    for _ in 0..3 {
        log_event(&db_path, "created", "emp-b", &[]);
        log_event(&db_path, "completed", "emp-b", &[]);
    }

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "board",
            "--metric",
            "total-completed",
        ])
        .assert()
        .success()
        .stdout(contains("Leaderboard by total-completed"))
        .stdout(is_match(r"(?s)emp-b.*emp-a").expect("Invalid regex"));
}

#[test]
fn test_board_includes_clock_only_subjects() {
    let db_path = setup_test_db("board_clock_only");

    init_db(&db_path);

    // emp-c only clocks in; still one leaderboard row
    pcl()
        .args(["--db", &db_path, "--test", "in", "emp-c"])
        .assert()
        .success();

    pcl()
        .args(["--db", &db_path, "--test", "board"])
        .assert()
        .success()
        .stdout(contains("emp-c"));
}

#[test]
fn test_board_empty_log() {
    let db_path = setup_test_db("board_empty");

    init_db(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "board"])
        .assert()
        .success()
        .stdout(contains("No subjects with recorded events"));
}

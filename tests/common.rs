#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pcl() -> Command {
    cargo_bin_cmd!("punchlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB via the CLI (creates schema)
pub fn init_db(db_path: &str) {
    pcl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Append one task event via the CLI
pub fn log_event(db_path: &str, action: &str, subject: &str, extra: &[&str]) {
    let mut args = vec!["--db", db_path, "--test", "log", action, subject];
    args.extend_from_slice(extra);
    pcl().args(&args).assert().success();
}

/// Initialize DB and add a small dataset useful for many tests:
/// 3 created + 1 completed for emp-2, 1 created for emp-3.
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    log_event(db_path, "created", "emp-2", &["--category", "support"]);
    log_event(db_path, "created", "emp-2", &["--category", "support"]);
    log_event(db_path, "created", "emp-2", &["--category", "ops"]);
    log_event(db_path, "completed", "emp-2", &["--category", "support"]);
    log_event(db_path, "created", "emp-3", &["--category", "ops"]);
}

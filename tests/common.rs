#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rpayroll::core::access::Session;
use rpayroll::core::auth::AuthLogic;
use rpayroll::db::initialize::init_db;
use rpayroll::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN: &str = "admin";
pub const ADMIN_PW: &str = "s3cret";

pub fn rpb() -> Command {
    let mut cmd = cargo_bin_cmd!("rpayroll");
    cmd.env_remove("RPAYROLL_USER")
        .env_remove("RPAYROLL_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpayroll.sqlite", name));
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

/// `init` in test mode with a bootstrap admin.
pub fn init_with_admin(db_path: &str) {
    rpb()
        .args([
            "--db",
            db_path,
            "--test",
            "init",
            "--admin-user",
            ADMIN,
            "--admin-password",
            ADMIN_PW,
        ])
        .assert()
        .success();
}

/// Command already pointed at `db_path` and logged in as the admin.
pub fn as_admin(db_path: &str) -> Command {
    let mut cmd = rpb();
    cmd.args(["--db", db_path, "--user", ADMIN, "--password", ADMIN_PW]);
    cmd
}

/// One department, one position, employee 1 earning 17600.00 a month,
/// two deduction templates and three timesheets in March 2025.
pub fn seed_via_cli(db_path: &str) {
    init_with_admin(db_path);

    let steps: &[&[&str]] = &[
        &["department", "add", "--name", "Engineering"],
        &[
            "position",
            "add",
            "--name",
            "Developer",
            "--base-salary",
            "17600",
            "--department-id",
            "1",
        ],
        &[
            "employee",
            "add",
            "--last-name",
            "Cruz",
            "--first-name",
            "Juan",
            "--email",
            "juan.cruz@example.ph",
            "--gender",
            "M",
            "--department-id",
            "1",
            "--position-id",
            "1",
            "--monthly-salary",
            "17600.00",
        ],
        &["deduction", "add", "--description", "SSS", "--amount", "500.00"],
        &["deduction", "add", "--description", "PhilHealth", "--amount", "250.50"],
        &[
            "timesheet", "add", "--employee-id", "1", "--date", "2025-03-03", "--rendered", "8",
        ],
        &[
            "timesheet", "add", "--employee-id", "1", "--date", "2025-03-04", "--rendered", "10",
        ],
        &[
            "timesheet", "add", "--employee-id", "1", "--date", "2025-03-20", "--rendered", "6",
        ],
    ];

    for step in steps {
        as_admin(db_path).args(*step).assert().success();
    }
}

/// Library-level fixture: a migrated file database and an admin session.
pub fn admin_pool(name: &str) -> (DbPool, Session) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    AuthLogic::bootstrap_admin(&pool, ADMIN, ADMIN_PW).expect("bootstrap admin");
    let session = AuthLogic::login(&pool, ADMIN, ADMIN_PW).expect("login");
    (pool, session)
}

/// Row count of one table.
pub fn count(pool: &DbPool, table: &str) -> i64 {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .expect("count rows")
}

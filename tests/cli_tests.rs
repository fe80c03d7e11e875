mod common;
use common::{ADMIN, ADMIN_PW, as_admin, init_with_admin, rpb, seed_via_cli, setup_test_db, temp_out};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn init_bootstraps_an_admin_that_can_log_in() {
    let db_path = setup_test_db("cli_init_login");
    init_with_admin(&db_path);

    as_admin(&db_path)
        .arg("login")
        .assert()
        .success()
        .stdout(contains(format!("Logged in as {ADMIN} (Admin)")));

    rpb()
        .args(["--db", &db_path, "--user", ADMIN, "--password", "nope", "login"])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password!"));
}

#[test]
fn record_commands_need_credentials() {
    let db_path = setup_test_db("cli_auth_required");
    init_with_admin(&db_path);

    rpb()
        .args(["--db", &db_path, "department", "list"])
        .assert()
        .failure()
        .stderr(contains("Authentication required"));
}

#[test]
fn credentials_can_come_from_the_environment() {
    let db_path = setup_test_db("cli_auth_env");
    init_with_admin(&db_path);

    rpb()
        .env("RPAYROLL_USER", ADMIN)
        .env("RPAYROLL_PASSWORD", ADMIN_PW)
        .args(["--db", &db_path, "department", "add", "--name", "Sales"])
        .assert()
        .success()
        .stdout(contains("Department 1 added."));
}

#[test]
fn missing_database_points_to_init() {
    let db_path = setup_test_db("cli_missing_db");
    as_admin(&db_path)
        .arg("login")
        .assert()
        .failure()
        .stderr(contains("rpayroll init"));
}

#[test]
fn payroll_generate_list_and_show() {
    let db_path = setup_test_db("cli_payroll_flow");
    seed_via_cli(&db_path);

    as_admin(&db_path)
        .args([
            "payroll",
            "generate",
            "--employee",
            "1",
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-15",
        ])
        .assert()
        .success()
        .stdout(contains("Payroll 1 generated (reference PR-1-"))
        .stdout(contains("gross pay rows    : 2"));

    as_admin(&db_path)
        .args(["payroll", "list"])
        .assert()
        .success()
        .stdout(contains("Juan Cruz"))
        .stdout(contains("1850.00"))
        .stdout(contains("1099.50"));

    as_admin(&db_path)
        .args(["payroll", "show", "1"])
        .assert()
        .success()
        .stdout(contains("PhilHealth"))
        .stdout(contains("Gross pay  : 1850.00"))
        .stdout(contains("Deductions : 750.50"))
        .stdout(contains("1099.50"));
}

#[test]
fn generating_for_an_unknown_employee_fails() {
    let db_path = setup_test_db("cli_payroll_unknown");
    seed_via_cli(&db_path);

    as_admin(&db_path)
        .args([
            "payroll",
            "generate",
            "--employee",
            "42",
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-15",
        ])
        .assert()
        .failure()
        .stderr(contains("Employee does not exist."));
}

#[test]
fn search_without_hits_says_so() {
    let db_path = setup_test_db("cli_search_none");
    seed_via_cli(&db_path);

    as_admin(&db_path)
        .args(["search", "zzz"])
        .assert()
        .success()
        .stdout(contains("No results found for 'zzz'"));

    as_admin(&db_path)
        .args(["search", "Engineer"])
        .assert()
        .success()
        .stdout(contains("name=Engineering"));
}

#[test]
fn registered_employee_sees_only_self_service() {
    let db_path = setup_test_db("cli_register_employee");
    seed_via_cli(&db_path);

    rpb()
        .args(["--db", &db_path, "register", "1", "juan", "pw123"])
        .assert()
        .success()
        .stdout(contains("Registration successful! Account 'juan' created."));

    rpb()
        .args(["--db", &db_path, "register", "1", "juan2", "pw123"])
        .assert()
        .failure()
        .stderr(contains("already has an account"));

    let employee = |args: &[&str]| {
        let mut cmd = rpb();
        cmd.args(["--db", &db_path, "--user", "juan", "--password", "pw123"])
            .args(args);
        cmd
    };

    employee(&["me", "timesheets"])
        .assert()
        .success()
        .stdout(contains("2025-03-20"));

    employee(&["me", "payrolls"])
        .assert()
        .success()
        .stdout(contains("No payrolls found."));

    employee(&["employee", "list"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    employee(&["me", "--employee", "2", "profile"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn export_writes_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    seed_via_cli(&db_path);
    as_admin(&db_path)
        .args([
            "payroll",
            "generate",
            "--employee",
            "1",
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-15",
        ])
        .assert()
        .success();

    let csv_out = temp_out("cli_export", "csv");
    as_admin(&db_path)
        .args(["export", "--format", "csv", "--file", &csv_out])
        .assert()
        .success();
    let csv = fs::read_to_string(&csv_out).expect("csv written");
    assert!(csv.starts_with("payroll_id,employee_id,employee_name,reference_no"));
    assert!(csv.contains("Juan Cruz"));
    assert!(csv.contains("1850.00"));
    assert!(csv.contains("750.50"));

    let json_out = temp_out("cli_export", "json");
    as_admin(&db_path)
        .args(["export", "--format", "json", "--file", &json_out])
        .assert()
        .success();
    let json = fs::read_to_string(&json_out).expect("json written");
    assert!(json.contains("\"reference_no\""));
    assert!(json.contains("PR-1-"));
    assert!(json.contains("1099.50"));
}

#[test]
fn department_with_dependents_is_not_deleted() {
    let db_path = setup_test_db("cli_department_conflict");
    seed_via_cli(&db_path);

    as_admin(&db_path)
        .args(["department", "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Department 1 is still used by"));

    as_admin(&db_path)
        .args(["department", "list"])
        .assert()
        .success()
        .stdout(contains("Engineering"));
}

#[test]
fn declined_confirmation_keeps_the_record() {
    let db_path = setup_test_db("cli_delete_declined");
    seed_via_cli(&db_path);

    as_admin(&db_path)
        .args(["deduction", "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    as_admin(&db_path)
        .args(["deduction", "list"])
        .assert()
        .success()
        .stdout(contains("SSS"));
}

#[test]
fn db_info_reports_row_counts() {
    let db_path = setup_test_db("cli_db_info");
    seed_via_cli(&db_path);

    as_admin(&db_path)
        .args(["db", "--info"])
        .assert()
        .success()
        .stdout(contains("Employees"))
        .stdout(contains("Timesheets"))
        .stdout(contains("Payroll cut-offs"));
}

#[test]
fn migrations_report_once_through_init_and_db_migrate() {
    let db_path = setup_test_db("cli_migration_output");

    rpb()
        .args([
            "--db",
            &db_path,
            "--test",
            "init",
            "--admin-user",
            ADMIN,
            "--admin-password",
            ADMIN_PW,
        ])
        .assert()
        .success()
        .stdout(contains("migration(s) applied"))
        .stdout(contains("Migration applied:").not());

    as_admin(&db_path)
        .args(["db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration completed (0 applied)."));
}

#[test]
fn oversized_deduction_amount_is_refused() {
    let db_path = setup_test_db("cli_amount_cap");
    init_with_admin(&db_path);

    as_admin(&db_path)
        .args([
            "deduction",
            "add",
            "--description",
            "Huge",
            "--amount",
            "50000000000000000000000000000",
        ])
        .assert()
        .failure()
        .stderr(contains("Default Amount cannot exceed 999999999999.99."));
}

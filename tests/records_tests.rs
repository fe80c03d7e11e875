mod common;
use common::{admin_pool, count};
use rpayroll::config::Config;
use rpayroll::core::auth::AuthLogic;
use rpayroll::core::deduction::DeductionLogic;
use rpayroll::core::department::DepartmentLogic;
use rpayroll::core::employee::{EmployeeForm, EmployeeLogic};
use rpayroll::core::payroll::PayrollLogic;
use rpayroll::core::position::{PositionForm, PositionLogic};
use rpayroll::core::timesheet::{TimesheetForm, TimesheetLogic};
use rpayroll::core::user::{UserForm, UserLogic};
use rpayroll::db::payrolls;
use rpayroll::errors::AppError;
use rust_decimal_macros::dec;

fn employee_form(last: &str, first: &str) -> EmployeeForm {
    EmployeeForm {
        last_name: Some(last.into()),
        first_name: Some(first.into()),
        ..EmployeeForm::default()
    }
}

fn timesheet_form(emp: i64, date: &str, rendered: &str) -> TimesheetForm {
    TimesheetForm {
        employee_id: Some(emp.to_string()),
        work_date: Some(date.into()),
        rendered_hours: Some(rendered.into()),
        standard_hours: None,
    }
}

#[test]
fn department_in_use_cannot_be_deleted() {
    let (pool, admin) = admin_pool("lib_department_in_use");
    let dept = DepartmentLogic::add(&pool, &admin, "Finance").unwrap();
    let pos = PositionLogic::add(
        &pool,
        &admin,
        &PositionForm {
            name: Some("Accountant".into()),
            base_salary: Some("25000".into()),
            department_id: Some(dept.to_string()),
        },
    )
    .unwrap();

    let err = DepartmentLogic::delete(&pool, &admin, dept).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(count(&pool, "departments"), 1);

    PositionLogic::delete(&pool, &admin, pos).unwrap();
    DepartmentLogic::delete(&pool, &admin, dept).unwrap();
    assert_eq!(count(&pool, "departments"), 0);
}

#[test]
fn position_held_by_an_employee_cannot_be_deleted() {
    let (pool, admin) = admin_pool("lib_position_in_use");
    let pos = PositionLogic::add(
        &pool,
        &admin,
        &PositionForm {
            name: Some("Clerk".into()),
            ..PositionForm::default()
        },
    )
    .unwrap();
    EmployeeLogic::add(
        &pool,
        &admin,
        &EmployeeForm {
            position_id: Some(pos.to_string()),
            ..employee_form("Reyes", "Ana")
        },
    )
    .unwrap();

    assert!(matches!(
        PositionLogic::delete(&pool, &admin, pos),
        Err(AppError::Conflict(_))
    ));
}

#[test]
fn employee_with_timesheets_cannot_be_deleted() {
    let (pool, admin) = admin_pool("lib_employee_in_use");
    let emp = EmployeeLogic::add(&pool, &admin, &employee_form("Reyes", "Ana")).unwrap();
    TimesheetLogic::add(
        &pool,
        &Config::default(),
        &admin,
        &timesheet_form(emp, "2025-03-03", "8"),
    )
    .unwrap();

    assert!(matches!(
        EmployeeLogic::delete(&pool, &admin, emp),
        Err(AppError::Conflict(_))
    ));
    assert_eq!(count(&pool, "employees"), 1);
}

#[test]
fn unknown_department_reference_is_rejected() {
    let (pool, admin) = admin_pool("lib_unknown_department");
    let err = EmployeeLogic::add(
        &pool,
        &admin,
        &EmployeeForm {
            department_id: Some("7".into()),
            ..employee_form("Reyes", "Ana")
        },
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Department 7 does not exist.");
    assert_eq!(count(&pool, "employees"), 0);
}

#[test]
fn edit_keeps_absent_fields_and_clears_blank_ones() {
    let (pool, admin) = admin_pool("lib_employee_edit");
    let emp = EmployeeLogic::add(
        &pool,
        &admin,
        &EmployeeForm {
            phone: Some("09171234567".into()),
            address: Some("Quezon City".into()),
            monthly_salary: Some("20000".into()),
            ..employee_form("Reyes", "Ana")
        },
    )
    .unwrap();

    EmployeeLogic::edit(
        &pool,
        &admin,
        emp,
        &EmployeeForm {
            phone: Some("".into()),
            monthly_salary: Some("21000.50".into()),
            ..EmployeeForm::default()
        },
    )
    .unwrap();

    let row = EmployeeLogic::show(&pool, &admin, emp).unwrap();
    assert_eq!(row.employee.last_name, "Reyes");
    assert_eq!(row.employee.address.as_deref(), Some("Quezon City"));
    assert_eq!(row.employee.phone, None);
    assert_eq!(row.employee.monthly_salary, Some(dec!(21000.50)));
}

#[test]
fn invalid_names_are_rejected_before_any_write() {
    let (pool, admin) = admin_pool("lib_invalid_name");
    let err = EmployeeLogic::add(&pool, &admin, &employee_form("R3yes", "Ana")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count(&pool, "employees"), 0);
}

#[test]
fn one_timesheet_per_employee_and_day() {
    let (pool, admin) = admin_pool("lib_timesheet_unique");
    let cfg = Config::default();
    let emp = EmployeeLogic::add(&pool, &admin, &employee_form("Reyes", "Ana")).unwrap();
    TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-03", "8")).unwrap();

    let err = TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-03", "9"))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-04", "25"))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count(&pool, "timesheets"), 1);
}

#[test]
fn overtime_is_hours_past_the_standard_day() {
    let (pool, admin) = admin_pool("lib_timesheet_overtime");
    let cfg = Config::default();
    let emp = EmployeeLogic::add(&pool, &admin, &employee_form("Reyes", "Ana")).unwrap();
    TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-03", "10.5")).unwrap();
    TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-04", "6")).unwrap();

    let rows = TimesheetLogic::list(&pool, &admin, Some(emp)).unwrap();
    let overtime: Vec<_> = rows.iter().map(|r| r.timesheet.overtime_hours).collect();
    assert!(overtime.contains(&dec!(2.5)));
    assert!(overtime.contains(&dec!(0)));
}

#[test]
fn deleting_a_priced_timesheet_removes_its_gross_pay() {
    let (mut pool, admin) = admin_pool("lib_timesheet_delete");
    let cfg = Config::default();
    let emp = EmployeeLogic::add(
        &pool,
        &admin,
        &EmployeeForm {
            monthly_salary: Some("17600".into()),
            ..employee_form("Reyes", "Ana")
        },
    )
    .unwrap();
    let ts =
        TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-03", "8")).unwrap();
    PayrollLogic::generate(
        &mut pool,
        &cfg,
        &admin,
        &emp.to_string(),
        "2025-03-01",
        "2025-03-15",
    )
    .unwrap();
    assert_eq!(count(&pool, "gross_pay"), 1);

    TimesheetLogic::delete(&mut pool, &admin, ts).unwrap();
    assert_eq!(count(&pool, "gross_pay"), 0);
    assert_eq!(count(&pool, "timesheets"), 0);
}

#[test]
fn deduction_amount_must_be_numeric() {
    let (pool, admin) = admin_pool("lib_deduction_amount");
    let err = DeductionLogic::add(&pool, &admin, "SSS", "five hundred").unwrap_err();
    assert_eq!(err.to_string(), "Default Amount must be a number.");
    assert_eq!(count(&pool, "deductions"), 0);
}

#[test]
fn one_account_per_employee_and_role() {
    let (pool, admin) = admin_pool("lib_account_per_role");
    let emp = EmployeeLogic::add(&pool, &admin, &employee_form("Reyes", "Ana")).unwrap();
    let form = |username: &str| UserForm {
        employee_id: Some(emp.to_string()),
        username: Some(username.into()),
        password: Some("pw".into()),
        role: Some("employee".into()),
    };

    UserLogic::add(&pool, &admin, &form("ana")).unwrap();
    let before = count(&pool, "users");

    let err = UserLogic::add(&pool, &admin, &form("ana2")).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("already has an account"));
    assert_eq!(count(&pool, "users"), before);

    // a second role for the same employee is fine
    UserLogic::add(
        &pool,
        &admin,
        &UserForm {
            role: Some("admin".into()),
            ..form("ana_admin")
        },
    )
    .unwrap();
    assert_eq!(count(&pool, "users"), before + 1);
}

#[test]
fn usernames_are_unique() {
    let (pool, admin) = admin_pool("lib_unique_username");
    let err = UserLogic::add(
        &pool,
        &admin,
        &UserForm {
            username: Some(common::ADMIN.into()),
            password: Some("pw".into()),
            role: Some("admin".into()),
            ..UserForm::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Username already exists. Choose another.");
}

#[test]
fn employee_accounts_need_an_employee() {
    let (pool, admin) = admin_pool("lib_unlinked_employee_account");
    let err = UserLogic::add(
        &pool,
        &admin,
        &UserForm {
            username: Some("floating".into()),
            password: Some("pw".into()),
            ..UserForm::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn admins_cannot_delete_themselves() {
    let (pool, admin) = admin_pool("lib_delete_self");
    assert!(matches!(
        UserLogic::delete(&pool, &admin, admin.user_id),
        Err(AppError::Conflict(_))
    ));
}

#[test]
fn registration_checks_employee_and_existing_account() {
    let (pool, admin) = admin_pool("lib_register");
    let emp = EmployeeLogic::add(&pool, &admin, &employee_form("Reyes", "Ana")).unwrap();

    let err = AuthLogic::register(&pool, "404", "ghost", "pw").unwrap_err();
    assert_eq!(err.to_string(), "Employee ID does not exist.");

    AuthLogic::register(&pool, &emp.to_string(), "ana", "pw").unwrap();
    let err = AuthLogic::register(&pool, &emp.to_string(), "ana2", "pw").unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let session = AuthLogic::login(&pool, "ana", "pw").unwrap();
    assert_eq!(session.employee_id, Some(emp));
    assert!(!session.is_admin());

    assert!(matches!(
        AuthLogic::login(&pool, "ana", "wrong"),
        Err(AppError::InvalidCredentials)
    ));
}

#[test]
fn employees_cannot_manage_records() {
    let (pool, admin) = admin_pool("lib_employee_forbidden");
    let emp = EmployeeLogic::add(&pool, &admin, &employee_form("Reyes", "Ana")).unwrap();
    let other = EmployeeLogic::add(&pool, &admin, &employee_form("Lim", "Ben")).unwrap();
    AuthLogic::register(&pool, &emp.to_string(), "ana", "pw").unwrap();
    let me = AuthLogic::login(&pool, "ana", "pw").unwrap();

    assert!(matches!(
        DepartmentLogic::add(&pool, &me, "Shadow IT"),
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        EmployeeLogic::list(&pool, &me, None),
        Err(AppError::Forbidden(_))
    ));
    assert!(EmployeeLogic::show(&pool, &me, emp).is_ok());
    assert!(matches!(
        EmployeeLogic::show(&pool, &me, other),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn moving_a_priced_timesheet_reprices_it_for_the_new_employee() {
    let (mut pool, admin) = admin_pool("lib_timesheet_reassign");
    let cfg = Config::default();
    let salaried = |salary: &str, last: &str| EmployeeForm {
        monthly_salary: Some(salary.into()),
        ..employee_form(last, "Ana")
    };
    let a = EmployeeLogic::add(&pool, &admin, &salaried("17600", "Reyes")).unwrap();
    let b = EmployeeLogic::add(&pool, &admin, &salaried("35200", "Lim")).unwrap();
    let ts = TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(a, "2025-03-03", "8")).unwrap();

    PayrollLogic::generate(&mut pool, &cfg, &admin, &a.to_string(), "2025-03-01", "2025-03-15")
        .unwrap();
    let priced = payrolls::gross_pay_for(&pool.conn, ts).unwrap().unwrap();
    assert_eq!(priced.std_hourly_rate, dec!(100.00));

    TimesheetLogic::edit(
        &mut pool,
        &admin,
        ts,
        &TimesheetForm {
            employee_id: Some(b.to_string()),
            ..TimesheetForm::default()
        },
    )
    .unwrap();
    assert!(payrolls::gross_pay_for(&pool.conn, ts).unwrap().is_none());

    let run = PayrollLogic::generate(
        &mut pool,
        &cfg,
        &admin,
        &b.to_string(),
        "2025-03-01",
        "2025-03-15",
    )
    .unwrap();
    assert_eq!(run.gross_pay_created, 1);
    let repriced = payrolls::gross_pay_for(&pool.conn, ts).unwrap().unwrap();
    assert_eq!(repriced.std_hourly_rate, dec!(200.00));

    let (summary, _) = PayrollLogic::show(&pool, &admin, run.payroll_id).unwrap();
    assert_eq!(summary.total_gross_pay, dec!(1600.00));
}

#[test]
fn editing_hours_keeps_existing_rates() {
    let (mut pool, admin) = admin_pool("lib_timesheet_edit_hours");
    let cfg = Config::default();
    let emp = EmployeeLogic::add(
        &pool,
        &admin,
        &EmployeeForm {
            monthly_salary: Some("17600".into()),
            ..employee_form("Reyes", "Ana")
        },
    )
    .unwrap();
    let ts = TimesheetLogic::add(&pool, &cfg, &admin, &timesheet_form(emp, "2025-03-03", "8")).unwrap();
    PayrollLogic::generate(&mut pool, &cfg, &admin, &emp.to_string(), "2025-03-01", "2025-03-15")
        .unwrap();

    TimesheetLogic::edit(
        &mut pool,
        &admin,
        ts,
        &TimesheetForm {
            rendered_hours: Some("9".into()),
            ..TimesheetForm::default()
        },
    )
    .unwrap();

    let gp = payrolls::gross_pay_for(&pool.conn, ts).unwrap().unwrap();
    assert_eq!(gp.std_hourly_rate, dec!(100.00));
}

#[test]
fn position_base_salary_is_optional_but_checked() {
    let (pool, admin) = admin_pool("lib_position_salary");
    let form = |salary: &str| PositionForm {
        name: Some("Clerk".into()),
        base_salary: Some(salary.into()),
        department_id: None,
    };

    let id = PositionLogic::add(&pool, &admin, &form(" ")).unwrap();
    let rows = PositionLogic::list(&pool, &admin, None).unwrap();
    assert_eq!(rows[0].position.id, id);
    assert!(rows[0].position.base_salary.is_zero());

    assert!(matches!(
        PositionLogic::add(&pool, &admin, &form("lots")),
        Err(AppError::InvalidNumber { .. })
    ));
}

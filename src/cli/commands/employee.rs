use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, EmployeeCmd};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::errors::AppResult;
use crate::models::employee::EmployeeRow;
use crate::ui::messages::{header, info, success};
use crate::utils::fmt_money;
use crate::utils::formatting::opt;
use crate::utils::table::Table;

pub(crate) fn print_profile(row: &EmployeeRow) {
    let e = &row.employee;
    header(format!("Employee {}: {}", e.id, e.full_name()));
    let fields = [
        ("Last name", e.last_name.clone()),
        ("First name", e.first_name.clone()),
        ("Email", opt(&e.email)),
        ("Gender", e.gender.map(|g| g.to_db_str().to_string()).unwrap_or_default()),
        ("Age", opt(&e.age)),
        ("Date of birth", opt(&e.dob)),
        ("Address", opt(&e.address)),
        ("Phone", opt(&e.phone)),
        ("Date of hire", opt(&e.date_of_hire)),
        ("Department", opt(&row.department_name)),
        ("Position", opt(&row.position_name)),
        ("Monthly salary", fmt_money(e.monthly_salary)),
    ];
    for (label, value) in fields {
        println!("{:<15} {}", format!("{label}:"), value);
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { action } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;

        match action {
            EmployeeCmd::List { filter } => {
                let rows = EmployeeLogic::list(&pool, &session, filter.as_deref())?;
                if rows.is_empty() {
                    info("No employees found.");
                    return Ok(());
                }
                let mut table = Table::new([
                    "ID", "Last name", "First name", "Email", "Department", "Position", "Salary",
                ]);
                for r in &rows {
                    let e = &r.employee;
                    table.add_row(vec![
                        e.id.to_string(),
                        e.last_name.clone(),
                        e.first_name.clone(),
                        opt(&e.email),
                        opt(&r.department_name),
                        opt(&r.position_name),
                        fmt_money(e.monthly_salary),
                    ]);
                }
                print!("{}", table.render());
            }
            EmployeeCmd::Show { id } => {
                print_profile(&EmployeeLogic::show(&pool, &session, *id)?);
            }
            EmployeeCmd::Add { form } => {
                let id = EmployeeLogic::add(&pool, &session, form)?;
                success(format!("Employee {id} added."));
            }
            EmployeeCmd::Edit { id, form } => {
                EmployeeLogic::edit(&pool, &session, *id, form)?;
                success(format!("Employee {id} updated."));
            }
            EmployeeCmd::Del { id, yes } => {
                if confirm_delete(&format!("employee {id}"), *yes) {
                    EmployeeLogic::delete(&pool, &session, *id)?;
                    success(format!("Employee {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

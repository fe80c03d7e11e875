use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, TimesheetCmd};
use crate::config::Config;
use crate::core::timesheet::TimesheetLogic;
use crate::errors::AppResult;
use crate::models::timesheet::TimesheetRow;
use crate::ui::messages::{info, success};
use crate::utils::fmt_money;
use crate::utils::table::Table;

pub(crate) fn print_timesheets(rows: &[TimesheetRow]) {
    if rows.is_empty() {
        info("No timesheets found.");
        return;
    }
    let mut table = Table::new([
        "ID", "Employee", "Name", "Date", "Standard", "Rendered", "Overtime",
    ]);
    for r in rows {
        let t = &r.timesheet;
        table.add_row(vec![
            t.id.to_string(),
            t.employee_id.to_string(),
            format!("{} {}", r.first_name, r.last_name),
            t.work_date.to_string(),
            fmt_money(Some(t.standard_hours)),
            fmt_money(Some(t.rendered_hours)),
            fmt_money(Some(t.overtime_hours)),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Timesheet { action } = &cli.command {
        let (mut pool, session) = open_session(cli, cfg)?;

        match action {
            TimesheetCmd::List { employee } => {
                print_timesheets(&TimesheetLogic::list(&pool, &session, *employee)?);
            }
            TimesheetCmd::Add { form } => {
                let id = TimesheetLogic::add(&pool, cfg, &session, form)?;
                success(format!("Timesheet {id} added."));
            }
            TimesheetCmd::Edit { id, form } => {
                TimesheetLogic::edit(&mut pool, &session, *id, form)?;
                success(format!("Timesheet {id} updated."));
            }
            TimesheetCmd::Del { id, yes } => {
                if confirm_delete(&format!("timesheet {id}"), *yes) {
                    TimesheetLogic::delete(&mut pool, &session, *id)?;
                    success(format!("Timesheet {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

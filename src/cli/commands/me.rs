use crate::cli::commands::employee::print_profile;
use crate::cli::commands::open_session;
use crate::cli::commands::payroll::print_payrolls;
use crate::cli::commands::timesheet::print_timesheets;
use crate::cli::parser::{Cli, Commands, MeCmd};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::core::payroll::PayrollLogic;
use crate::core::timesheet::TimesheetLogic;
use crate::errors::AppResult;

/// Self-service views; admins may pass `--employee` to look at anyone.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Me { action, employee } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;
        let employee_id = session.target_employee(*employee)?;

        match action {
            MeCmd::Profile => {
                print_profile(&EmployeeLogic::show(&pool, &session, employee_id)?);
            }
            MeCmd::Timesheets => {
                print_timesheets(&TimesheetLogic::list(&pool, &session, Some(employee_id))?);
            }
            MeCmd::Payrolls => {
                print_payrolls(&PayrollLogic::list(&pool, &session, Some(employee_id))?);
            }
        }
    }

    Ok(())
}

use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, PayrollCmd};
use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::errors::AppResult;
use crate::models::payroll::PayrollSummary;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{RESET, color_for_net};
use crate::utils::fmt_money;
use crate::utils::table::Table;

pub(crate) fn print_payrolls(rows: &[PayrollSummary]) {
    if rows.is_empty() {
        info("No payrolls found.");
        return;
    }
    let mut table = Table::new([
        "ID",
        "Employee",
        "Name",
        "Reference",
        "Start",
        "End",
        "Gross",
        "Deductions",
        "Net",
    ]);
    for s in rows {
        table.add_row(vec![
            s.payroll.id.to_string(),
            s.payroll.employee_id.to_string(),
            format!("{} {}", s.first_name, s.last_name),
            s.payroll.reference_no.clone(),
            s.payroll.start_cut_off.to_string(),
            s.payroll.end_cut_off.to_string(),
            fmt_money(Some(s.total_gross_pay)),
            fmt_money(Some(s.total_deduction)),
            fmt_money(Some(s.net_pay)),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Payroll { action } = &cli.command {
        let (mut pool, session) = open_session(cli, cfg)?;

        match action {
            PayrollCmd::Generate {
                employee,
                start,
                end,
            } => {
                let run = PayrollLogic::generate(&mut pool, cfg, &session, employee, start, end)?;
                success(format!(
                    "Payroll {} generated (reference {}).",
                    run.payroll_id, run.reference_no
                ));
                println!("  deductions copied : {}", run.deductions_copied);
                println!("  gross pay rows    : {}", run.gross_pay_created);
                if run.timesheets_skipped > 0 {
                    println!(
                        "  already priced    : {} timesheet(s) kept their rates",
                        run.timesheets_skipped
                    );
                }
            }
            PayrollCmd::List { employee } => {
                print_payrolls(&PayrollLogic::list(&pool, &session, *employee)?);
            }
            PayrollCmd::Show { id } => {
                let (s, deductions) = PayrollLogic::show(&pool, &session, *id)?;
                header(format!("Payroll {} ({})", s.payroll.id, s.payroll.reference_no));
                println!("Employee   : {} {} ({})", s.first_name, s.last_name, s.payroll.employee_id);
                println!("Cut-off    : {} to {}", s.payroll.start_cut_off, s.payroll.end_cut_off);
                println!();

                if deductions.is_empty() {
                    info("No deductions on this payroll.");
                } else {
                    let mut table = Table::new(["ID", "Deduction", "Description", "Amount"]);
                    for d in &deductions {
                        table.add_row(vec![
                            d.id.to_string(),
                            d.deduction_id.to_string(),
                            d.description.clone(),
                            fmt_money(Some(d.amount)),
                        ]);
                    }
                    print!("{}", table.render());
                    println!();
                }

                println!("Gross pay  : {}", fmt_money(Some(s.total_gross_pay)));
                println!("Deductions : {}", fmt_money(Some(s.total_deduction)));
                println!(
                    "Net pay    : {}{}{}",
                    color_for_net(s.net_pay),
                    fmt_money(Some(s.net_pay)),
                    RESET
                );
            }
            PayrollCmd::Del { id, yes } => {
                if confirm_delete(&format!("payroll {id} and its deductions"), *yes) {
                    PayrollLogic::delete(&mut pool, &session, *id)?;
                    success(format!("Payroll {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

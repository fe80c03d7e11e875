use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, DeductionCmd};
use crate::config::Config;
use crate::core::deduction::DeductionLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::fmt_money;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Deduction { action } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;

        match action {
            DeductionCmd::List { filter } => {
                let rows = DeductionLogic::list(&pool, &session, filter.as_deref())?;
                if rows.is_empty() {
                    info("No deductions found.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "Description", "Default amount"]);
                for d in rows {
                    table.add_row(vec![
                        d.id.to_string(),
                        d.description,
                        fmt_money(Some(d.default_amount)),
                    ]);
                }
                print!("{}", table.render());
            }
            DeductionCmd::Add {
                description,
                default_amount,
            } => {
                let id = DeductionLogic::add(&pool, &session, description, default_amount)?;
                success(format!("Deduction {id} added."));
            }
            DeductionCmd::Edit {
                id,
                description,
                default_amount,
            } => {
                DeductionLogic::edit(
                    &pool,
                    &session,
                    *id,
                    description.as_deref(),
                    default_amount.as_deref(),
                )?;
                success(format!("Deduction {id} updated."));
            }
            DeductionCmd::Del { id, yes } => {
                if confirm_delete(&format!("deduction {id}"), *yes) {
                    DeductionLogic::delete(&pool, &session, *id)?;
                    success(format!("Deduction {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

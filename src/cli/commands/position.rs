use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, PositionCmd};
use crate::config::Config;
use crate::core::position::PositionLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::fmt_money;
use crate::utils::formatting::opt;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Position { action } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;

        match action {
            PositionCmd::List { filter } => {
                let rows = PositionLogic::list(&pool, &session, filter.as_deref())?;
                if rows.is_empty() {
                    info("No positions found.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "Name", "Base salary", "Department"]);
                for r in rows {
                    let p = r.position;
                    table.add_row(vec![
                        p.id.to_string(),
                        p.name,
                        fmt_money(Some(p.base_salary)),
                        opt(&r.department_name),
                    ]);
                }
                print!("{}", table.render());
            }
            PositionCmd::Add { form } => {
                let id = PositionLogic::add(&pool, &session, form)?;
                success(format!("Position {id} added."));
            }
            PositionCmd::Edit { id, form } => {
                PositionLogic::edit(&pool, &session, *id, form)?;
                success(format!("Position {id} updated."));
            }
            PositionCmd::Del { id, yes } => {
                if confirm_delete(&format!("position {id}"), *yes) {
                    PositionLogic::delete(&pool, &session, *id)?;
                    success(format!("Position {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

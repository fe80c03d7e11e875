use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, DepartmentCmd};
use crate::config::Config;
use crate::core::department::DepartmentLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Department { action } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;

        match action {
            DepartmentCmd::List { filter } => {
                let rows = DepartmentLogic::list(&pool, &session, filter.as_deref())?;
                if rows.is_empty() {
                    info("No departments found.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "Name"]);
                for d in rows {
                    table.add_row(vec![d.id.to_string(), d.name]);
                }
                print!("{}", table.render());
            }
            DepartmentCmd::Add { name } => {
                let id = DepartmentLogic::add(&pool, &session, name)?;
                success(format!("Department {id} added."));
            }
            DepartmentCmd::Edit { id, name } => {
                DepartmentLogic::edit(&pool, &session, *id, name)?;
                success(format!("Department {id} updated."));
            }
            DepartmentCmd::Del { id, yes } => {
                if confirm_delete(&format!("department {id}"), *yes) {
                    DepartmentLogic::delete(&pool, &session, *id)?;
                    success(format!("Department {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

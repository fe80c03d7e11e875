use crate::cli::commands::{confirm_delete, open_session};
use crate::cli::parser::{Cli, Commands, UserCmd};
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::opt;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;

        match action {
            UserCmd::List { role } => {
                let rows = UserLogic::list(&pool, &session, role.as_deref())?;
                if rows.is_empty() {
                    info("No accounts found.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "Username", "Role", "Employee", "Name"]);
                for r in rows {
                    table.add_row(vec![
                        r.user.id.to_string(),
                        r.user.username,
                        r.user.role.to_string(),
                        opt(&r.user.employee_id),
                        opt(&r.employee_name),
                    ]);
                }
                print!("{}", table.render());
            }
            UserCmd::Add { form } => {
                let id = UserLogic::add(&pool, &session, form)?;
                success(format!("Account {id} created."));
            }
            UserCmd::Edit { id, form } => {
                UserLogic::edit(&pool, &session, *id, form)?;
                success(format!("Account {id} updated."));
            }
            UserCmd::Del { id, yes } => {
                if confirm_delete(&format!("account {id}"), *yes) {
                    UserLogic::delete(&pool, &session, *id)?;
                    success(format!("Account {id} deleted."));
                }
            }
        }
    }

    Ok(())
}

use crate::cli::commands::{authenticate, open_pool};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let session = authenticate(cli, &pool)?;

    match session.employee_id {
        Some(emp) => success(format!(
            "Logged in as {} ({}, employee {}).",
            session.username, session.role, emp
        )),
        None => success(format!("Logged in as {} ({}).", session.username, session.role)),
    }
    Ok(())
}

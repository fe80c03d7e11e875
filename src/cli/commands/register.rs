use crate::cli::commands::open_pool;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        employee_id,
        username,
        password,
    } = &cli.command
    {
        let pool = open_pool(cfg)?;
        let user = AuthLogic::register(&pool, employee_id, username, password)?;
        success(format!(
            "Registration successful! Account '{}' created.",
            user.username
        ));
    }

    Ok(())
}

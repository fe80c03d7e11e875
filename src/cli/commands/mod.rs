pub mod backup;
pub mod config;
pub mod db;
pub mod deduction;
pub mod department;
pub mod employee;
pub mod export;
pub mod init;
pub mod log;
pub mod login;
pub mod me;
pub mod payroll;
pub mod position;
pub mod register;
pub mod search;
pub mod timesheet;
pub mod user;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::access::Session;
use crate::core::auth::AuthLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ask_confirmation, info};
use std::path::Path;

/// Open the configured database; it must have been created by `init`.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    if !Path::new(&cfg.database).exists() {
        return Err(AppError::Config(format!(
            "Database not found: {}. Run `rpayroll init` first.",
            cfg.database
        )));
    }
    Ok(DbPool::new(&cfg.database)?)
}

/// Log in with the global `--user` / `--password` pair.
pub(crate) fn authenticate(cli: &Cli, pool: &DbPool) -> AppResult<Session> {
    let (Some(user), Some(password)) = (cli.user.as_deref(), cli.password.as_deref()) else {
        return Err(AppError::AuthRequired);
    };
    AuthLogic::login(pool, user, password)
}

/// Open the database and log in: the prelude of every record command.
pub(crate) fn open_session(cli: &Cli, cfg: &Config) -> AppResult<(DbPool, Session)> {
    let pool = open_pool(cfg)?;
    let session = authenticate(cli, &pool)?;
    Ok((pool, session))
}

/// `--yes` skips the prompt.
pub(crate) fn confirm_delete(what: &str, yes: bool) -> bool {
    if yes || ask_confirmation(format!("Delete {what}? This action is irreversible.")) {
        return true;
    }
    info("Operation cancelled.");
    false
}

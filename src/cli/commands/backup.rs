use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = &cli.command
    {
        let (pool, session) = open_session(cli, cfg)?;
        BackupLogic::backup(&pool, &session, cfg, file, *compress, *force)?;
    }

    Ok(())
}

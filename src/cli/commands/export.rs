use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        employee,
        force,
    } = &cli.command
    {
        let (pool, session) = open_session(cli, cfg)?;
        ExportLogic::export(&pool, &session, *format, file, *employee, *force)?;
    }
    Ok(())
}

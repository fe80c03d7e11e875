//! rPayroll library root.
//! Exposes the CLI parser, the high-level run() function and the
//! internal layers (db, core, export) used by the integration tests.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as cmd;

    match &cli.command {
        Commands::Init { .. } => cmd::init::handle(cli),
        Commands::Config { .. } => cmd::config::handle(cli, cfg),
        Commands::Db { .. } => cmd::db::handle(cli, cfg),
        Commands::Log { .. } => cmd::log::handle(cli, cfg),
        Commands::Backup { .. } => cmd::backup::handle(cli, cfg),
        Commands::Export { .. } => cmd::export::handle(cli, cfg),
        Commands::Login => cmd::login::handle(cli, cfg),
        Commands::Register { .. } => cmd::register::handle(cli, cfg),
        Commands::Employee { .. } => cmd::employee::handle(cli, cfg),
        Commands::Department { .. } => cmd::department::handle(cli, cfg),
        Commands::Position { .. } => cmd::position::handle(cli, cfg),
        Commands::Timesheet { .. } => cmd::timesheet::handle(cli, cfg),
        Commands::Deduction { .. } => cmd::deduction::handle(cli, cfg),
        Commands::Payroll { .. } => cmd::payroll::handle(cli, cfg),
        Commands::User { .. } => cmd::user::handle(cli, cfg),
        Commands::Search { .. } => cmd::search::handle(cli, cfg),
        Commands::Me { .. } => cmd::me::handle(cli, cfg),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and handed to every command
    let mut cfg = Config::load()?;
    init_tracing(&cfg.log_level);

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    tracing::debug!(database = %cfg.database, "configuration loaded");
    dispatch(&cli, &cfg)
}

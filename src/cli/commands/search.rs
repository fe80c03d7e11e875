use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::search::SearchLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::bold;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { term } = &cli.command {
        let (pool, session) = open_session(cli, cfg)?;
        let hits = SearchLogic::run(&pool, &session, term)?;

        if hits.is_empty() {
            info(format!("No results found for '{}'", term.trim()));
            return Ok(());
        }

        for hit in &hits {
            let fields: Vec<String> = hit
                .fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            println!(
                "{:<10} {:>5}  {}",
                bold(hit.kind.label()),
                hit.id,
                fields.join("  ")
            );
        }
        println!("\n{} result(s)", hits.len());
    }

    Ok(())
}

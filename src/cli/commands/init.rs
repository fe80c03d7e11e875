use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with `--test`)
///  - the SQLite database and all pending migrations
///  - optionally, a bootstrap Admin account
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init {
        admin_user,
        admin_password,
    } = &cli.command
    else {
        return Ok(());
    };

    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rPayroll…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    let applied = init_db(&pool.conn)?;
    success(format!(
        "Database initialized at {} ({} migration(s) applied)",
        &db_path, applied
    ));

    audit(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    );

    if let (Some(user), Some(password)) = (admin_user, admin_password) {
        let id = AuthLogic::bootstrap_admin(&pool, user, password)?;
        success(format!("Admin account '{}' created (id {}).", user.trim(), id));
    }

    println!("🎉 rPayroll initialization completed!");
    Ok(())
}

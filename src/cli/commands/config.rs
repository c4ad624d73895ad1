use crate::config::{Config, migrate};
use crate::core::config::ConfigLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

use crate::cli::parser::Commands;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: run_migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if *check {
            ConfigLogic::check(&path)?;
        }

        if *run_migrate && path.exists() {
            let added = migrate::migrate_config_file(&path)?;
            if !added.is_empty()
                && let Ok(pool) = DbPool::open(&cfg.database)
            {
                ttlog_quiet(
                    &pool.conn,
                    "config",
                    &path.to_string_lossy(),
                    &format!("Added fields: {}", added.join(", ")),
                );
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}

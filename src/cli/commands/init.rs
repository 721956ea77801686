use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::LedgerStore;
use crate::ui::messages::{info, success};
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (defaults, plus any `--data-dir` override)
///  - the `operators/` folder under the data directory
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Init { force } = &cli.command {
        let path = Config::resolve_file(cli.config.as_deref())?;

        cfg.init_at(&path, *force)?;
        success(format!("Config file: {}", path.display()));

        let store = LedgerStore::new(cfg.data_path());
        fs::create_dir_all(store.root())?;
        success(format!("Ledger root: {}", store.root().display()));

        info(format!(
            "Reference lists expected at: {}, {}, {}",
            cfg.operator_list, cfg.machine_list, cfg.item_list
        ));
    }

    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::reference::ReferenceKind;
use crate::store::load_reference_list;
use crate::ui::messages::{error, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- CHECK REFERENCE LISTS ----
        if *check {
            let sources = [
                (ReferenceKind::Operator, cfg.operator_list_path()),
                (ReferenceKind::Machine, cfg.machine_list_path()),
                (ReferenceKind::Item, cfg.item_list_path()),
            ];

            let mut failures = 0;
            for (kind, path) in sources {
                match load_reference_list(&path, kind) {
                    Ok(list) => success(format!("{kind}: {} value(s) in {}", list.len(), path.display())),
                    Err(e) => {
                        error(&e);
                        failures += 1;
                    }
                }
            }

            if failures > 0 {
                return Err(AppError::Config(format!(
                    "{failures} reference list(s) failed to load"
                )));
            }
        }
    }

    Ok(())
}

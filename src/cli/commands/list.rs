use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::LedgerStore;
use crate::ui::messages::{info, warning};
use crate::utils::date::{self, ledger_stamp};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        operator,
        date: date_arg,
        json,
    } = cmd
    {
        let d = match date_arg {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let store = LedgerStore::new(cfg.data_path());
        let rows = match store.list(operator, d) {
            Ok(rows) => rows,
            Err(AppError::NoData(_)) => {
                warning(format!("No data available for {} on {}.", operator, ledger_stamp(d)));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if *json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        let Some((header, records)) = rows.split_first() else {
            warning(format!("Ledger for {} on {} is empty.", operator, ledger_stamp(d)));
            return Ok(());
        };

        let mut headers = vec!["#".to_string()];
        headers.extend(header.iter().cloned());

        let numbered: Vec<Vec<String>> = records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut row = vec![(i + 1).to_string()];
                row.extend(r.iter().cloned());
                row
            })
            .collect();

        print!("{}", Table::fitted(&headers, &numbered).render());
        info(format!("{} record(s) for {} on {}", records.len(), operator, ledger_stamp(d)));
    }

    Ok(())
}

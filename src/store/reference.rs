//! Startup loader for the operator / machine / item lookup tables.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::reference::{ReferenceData, ReferenceKind, ReferenceList};
use csv::ReaderBuilder;
use std::path::Path;

fn reference_error(path: &Path, reason: impl Into<String>) -> AppError {
    AppError::ReferenceData {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Read one lookup table. The file must have a header row containing
/// `kind.column()`; every other column is ignored.
pub fn load_reference_list(path: &Path, kind: ReferenceKind) -> AppResult<ReferenceList> {
    if !path.is_file() {
        return Err(reference_error(path, "file not found"));
    }

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| reference_error(path, e.to_string()))?;

    let headers = rdr
        .headers()
        .map_err(|e| reference_error(path, e.to_string()))?
        .clone();

    let column = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == kind.column())
        .ok_or_else(|| reference_error(path, format!("missing column '{}'", kind.column())))?;

    let mut values = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| reference_error(path, e.to_string()))?;
        if let Some(v) = rec.get(column) {
            values.push(v.to_string());
        }
    }

    let list = ReferenceList::new(kind, values);
    if list.is_empty() {
        tracing::warn!(path = %path.display(), kind = %kind, "reference list is empty");
    } else {
        tracing::debug!(path = %path.display(), kind = %kind, count = list.len(), "reference list loaded");
    }
    Ok(list)
}

/// Load the three lookup tables named in the configuration.
pub fn load_reference_data(cfg: &Config) -> AppResult<ReferenceData> {
    let operators = load_reference_list(&cfg.operator_list_path(), ReferenceKind::Operator)?;
    let machines = load_reference_list(&cfg.machine_list_path(), ReferenceKind::Machine)?;
    let items = load_reference_list(&cfg.item_list_path(), ReferenceKind::Item)?;

    tracing::info!(
        operators = operators.len(),
        machines = machines.len(),
        items = items.len(),
        "reference data loaded"
    );
    Ok(ReferenceData::new(operators, machines, items))
}

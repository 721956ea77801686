//! Daily ledger files: one CSV per operator per day.
//!
//! Layout: `<data_dir>/operators/<operator>/daily_entry_<MM-DD-YY>.csv`.
//! Row 0 is always [`LEDGER_HEADER`](crate::models::record::LEDGER_HEADER);
//! a record's identity is its row position.

use crate::errors::{AppError, AppResult};
use crate::models::record::{LedgerRow, MachineRun, RunDetails, header_row};
use crate::utils::date::ledger_stamp;
use crate::utils::path::is_safe_segment;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const OPERATORS_DIR: &str = "operators";

#[derive(Debug, Clone)]
pub struct LedgerStore {
    root: PathBuf,
}

impl LedgerStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into().join(OPERATORS_DIR),
        }
    }

    /// Directory holding every operator folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic path of a ledger. No filesystem side effects.
    pub fn ledger_path(&self, operator: &str, date: NaiveDate) -> AppResult<PathBuf> {
        if !is_safe_segment(operator) {
            return Err(AppError::InvalidOperator(operator.to_string()));
        }
        Ok(self
            .root
            .join(operator)
            .join(format!("daily_entry_{}.csv", ledger_stamp(date))))
    }

    pub fn exists(&self, operator: &str, date: NaiveDate) -> AppResult<bool> {
        Ok(self.ledger_path(operator, date)?.is_file())
    }

    /// Path of the ledger, creating the folder and the header row if missing.
    pub fn resolve_path(&self, operator: &str, date: NaiveDate) -> AppResult<PathBuf> {
        let path = self.ledger_path(operator, date)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        match fs::metadata(&path) {
            Ok(meta) if meta.len() > 0 => {}
            // A zero-length file has no header yet; replace it.
            Ok(_) => {
                tracing::warn!(path = %path.display(), "empty ledger, writing header");
                rewrite(&path, &[header_row()])?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => create_with_header(&path)?,
            Err(e) => return Err(e.into()),
        }

        Ok(path)
    }

    /// Append one record. No duplicate check.
    pub fn append(&self, operator: &str, date: NaiveDate, details: &RunDetails) -> AppResult<()> {
        let path = self.resolve_path(operator, date)?;
        let run = MachineRun::new(date, operator, details.clone());

        let file = OpenOptions::new().append(true).open(&path)?;
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record(run.to_row())?;
        wtr.flush()?;

        tracing::info!(operator, path = %path.display(), "record appended");
        Ok(())
    }

    /// Every row in file order, header included as row 0.
    pub fn list(&self, operator: &str, date: NaiveDate) -> AppResult<Vec<LedgerRow>> {
        let path = self.ledger_path(operator, date)?;
        if !path.is_file() {
            return Err(AppError::NoData(operator.to_string()));
        }
        read_rows(&path)
    }

    /// A single data row (position >= 1).
    pub fn row(&self, operator: &str, date: NaiveDate, index: usize) -> AppResult<LedgerRow> {
        let mut rows = self.list(operator, date)?;
        check_index(operator, index, rows.len())?;
        Ok(rows.swap_remove(index))
    }

    /// Replace the row at `index` and rewrite the file.
    pub fn update(
        &self,
        operator: &str,
        date: NaiveDate,
        index: usize,
        details: &RunDetails,
    ) -> AppResult<()> {
        let path = self.ledger_path(operator, date)?;
        let mut rows = self.list(operator, date)?;
        check_index(operator, index, rows.len())?;

        rows[index] = MachineRun::new(date, operator, details.clone()).to_row();
        rewrite(&path, &rows)?;

        tracing::info!(operator, index, path = %path.display(), "record updated");
        Ok(())
    }

    /// Remove the row at `index`; later rows move up by one. Returns the removed row.
    pub fn delete(&self, operator: &str, date: NaiveDate, index: usize) -> AppResult<LedgerRow> {
        let path = self.ledger_path(operator, date)?;
        let mut rows = self.list(operator, date)?;
        check_index(operator, index, rows.len())?;

        let removed = rows.remove(index);
        rewrite(&path, &rows)?;

        tracing::info!(operator, index, path = %path.display(), "record deleted");
        Ok(removed)
    }
}

// Row 0 is the header and never addressable.
fn check_index(operator: &str, index: usize, len: usize) -> AppResult<()> {
    if index == 0 || index >= len {
        return Err(AppError::InvalidIndex {
            operator: operator.to_string(),
            index,
        });
    }
    Ok(())
}

fn read_rows(path: &Path) -> AppResult<Vec<LedgerRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Write all rows to a sibling temp file, then rename it over `path`.
fn rewrite(path: &Path, rows: &[LedgerRow]) -> AppResult<()> {
    let tmp = staged(path, rows)?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

/// Like [`rewrite`] but never replaces an existing file. Losing the race to
/// another writer is fine: that file already starts with the header.
fn create_with_header(path: &Path) -> AppResult<()> {
    let tmp = staged(path, &[header_row()])?;
    match tmp.persist_noclobber(path) {
        Ok(_) => {
            tracing::debug!(path = %path.display(), "created ledger");
            Ok(())
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(AppError::Io(e.error)),
    }
}

/// Fully written and synced temp file next to `path`.
fn staged(path: &Path, rows: &[LedgerRow]) -> AppResult<NamedTempFile> {
    let dir = path
        .parent()
        .ok_or_else(|| AppError::Other(format!("ledger has no parent: {}", path.display())))?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(tmp.as_file());
        for row in rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

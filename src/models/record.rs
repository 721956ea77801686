use crate::utils::date::ledger_stamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header row written at position 0 of every daily ledger.
pub const LEDGER_HEADER: [&str; 13] = [
    "Date",
    "Operator",
    "Machine",
    "Item",
    "Setup Time",
    "Machine Cycle Time",
    "Parts Per Cycle",
    "Total Quantity",
    "Job Time",
    "Op #",
    "Notes",
    "Start Time",
    "End time",
];

/// A raw ledger row, exactly as stored in the CSV file.
pub type LedgerRow = Vec<String>;

/// The operator-supplied part of a machine run (everything except Date and Operator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDetails {
    pub machine: String,
    pub item: String,
    pub setup_time: String,
    pub machine_cycle_time: String,
    pub parts_per_cycle: String,
    pub total_quantity: String,
    pub job_time: String,
    pub operation_number: String,
    pub notes: String,
    pub start_time: String,
    pub end_time: String,
}

impl RunDetails {
    /// Rebuild the details from a stored row (columns 2..13).
    /// Short rows yield empty strings for the missing cells.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            machine: cell(2),
            item: cell(3),
            setup_time: cell(4),
            machine_cycle_time: cell(5),
            parts_per_cycle: cell(6),
            total_quantity: cell(7),
            job_time: cell(8),
            operation_number: cell(9),
            notes: cell(10),
            start_time: cell(11),
            end_time: cell(12),
        }
    }
}

/// One complete machine-run record (13 columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineRun {
    pub date: NaiveDate,
    pub operator: String,
    pub details: RunDetails,
}

impl MachineRun {
    pub fn new(date: NaiveDate, operator: &str, details: RunDetails) -> Self {
        Self {
            date,
            operator: operator.to_string(),
            details,
        }
    }

    /// Column values in ledger order.
    pub fn to_row(&self) -> LedgerRow {
        let d = &self.details;
        vec![
            ledger_stamp(self.date),
            self.operator.clone(),
            d.machine.clone(),
            d.item.clone(),
            d.setup_time.clone(),
            d.machine_cycle_time.clone(),
            d.parts_per_cycle.clone(),
            d.total_quantity.clone(),
            d.job_time.clone(),
            d.operation_number.clone(),
            d.notes.clone(),
            d.start_time.clone(),
            d.end_time.clone(),
        ]
    }
}

/// Header row as owned strings.
pub fn header_row() -> LedgerRow {
    LEDGER_HEADER.iter().map(|h| h.to_string()).collect()
}

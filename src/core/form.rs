//! Machine-run form: field definitions and pure validation.
//!
//! Validation only checks presence and, for Machine/Item, membership in the
//! reference lists. Values are kept exactly as typed; numeric-looking fields
//! stay text.

use crate::models::record::RunDetails;
use crate::models::reference::{ReferenceData, ReferenceKind};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Machine,
    Item,
    SetupTime,
    MachineCycleTime,
    PartsPerCycle,
    TotalQuantity,
    JobTime,
    OperationNumber,
    Notes,
    StartTime,
    EndTime,
}

impl Field {
    /// Form order.
    pub const ALL: [Field; 11] = [
        Field::Machine,
        Field::Item,
        Field::SetupTime,
        Field::MachineCycleTime,
        Field::PartsPerCycle,
        Field::TotalQuantity,
        Field::JobTime,
        Field::OperationNumber,
        Field::Notes,
        Field::StartTime,
        Field::EndTime,
    ];

    /// Name of the HTML input / urlencoded key.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Machine => "machine",
            Field::Item => "item",
            Field::SetupTime => "setup_time",
            Field::MachineCycleTime => "machine_cycle_time",
            Field::PartsPerCycle => "parts_per_cycle",
            Field::TotalQuantity => "total_quantity",
            Field::JobTime => "job_time",
            Field::OperationNumber => "operation_number",
            Field::Notes => "notes",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Machine => "Machine",
            Field::Item => "Item",
            Field::SetupTime => "Setup Time",
            Field::MachineCycleTime => "Machine Cycle Time",
            Field::PartsPerCycle => "Parts Per Cycle",
            Field::TotalQuantity => "Total Quantity",
            Field::JobTime => "Job Time",
            Field::OperationNumber => "Op #",
            Field::Notes => "Notes",
            Field::StartTime => "Start Time",
            Field::EndTime => "End time",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Notes | Field::StartTime | Field::EndTime)
    }

    /// Reference list the value must come from, if any.
    pub fn choices(&self) -> Option<ReferenceKind> {
        match self {
            Field::Machine => Some(ReferenceKind::Machine),
            Field::Item => Some(ReferenceKind::Item),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Missing,
    NotAChoice,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing => f.write_str("This field is required."),
            FieldError::NotAChoice => f.write_str("Not a valid choice."),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    fn insert(&mut self, field: Field, err: FieldError) {
        self.errors.insert(field, err);
    }
}

/// Raw submitted values keyed by field. Unknown keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    values: BTreeMap<Field, String>,
}

impl Submission {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .filter_map(|(k, v)| Field::from_key(k.as_ref()).map(|f| (f, v.into())))
            .collect();
        Self { values }
    }

    /// Prefill for the edit form.
    pub fn from_details(d: &RunDetails) -> Self {
        Self::from_pairs([
            ("machine", d.machine.clone()),
            ("item", d.item.clone()),
            ("setup_time", d.setup_time.clone()),
            ("machine_cycle_time", d.machine_cycle_time.clone()),
            ("parts_per_cycle", d.parts_per_cycle.clone()),
            ("total_quantity", d.total_quantity.clone()),
            ("job_time", d.job_time.clone()),
            ("operation_number", d.operation_number.clone()),
            ("notes", d.notes.clone()),
            ("start_time", d.start_time.clone()),
            ("end_time", d.end_time.clone()),
        ])
    }

    /// Submitted value, or "" when absent.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }
}

/// Accept the submission or report every failing field.
pub fn validate(sub: &Submission, refs: &ReferenceData) -> Result<RunDetails, FormErrors> {
    let mut errors = FormErrors::default();

    for field in Field::ALL {
        let value = sub.value(field);
        if field.is_required() && value.trim().is_empty() {
            errors.insert(field, FieldError::Missing);
            continue;
        }
        if let Some(kind) = field.choices()
            && !refs.list(kind).contains(value)
        {
            errors.insert(field, FieldError::NotAChoice);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let v = |f: Field| sub.value(f).to_string();
    Ok(RunDetails {
        machine: v(Field::Machine),
        item: v(Field::Item),
        setup_time: v(Field::SetupTime),
        machine_cycle_time: v(Field::MachineCycleTime),
        parts_per_cycle: v(Field::PartsPerCycle),
        total_quantity: v(Field::TotalQuantity),
        job_time: v(Field::JobTime),
        operation_number: v(Field::OperationNumber),
        notes: v(Field::Notes),
        start_time: v(Field::StartTime),
        end_time: v(Field::EndTime),
    })
}

use crate::core::Submit;
use crate::core::form::{Submission, validate};
use crate::errors::AppResult;
use crate::models::reference::ReferenceData;
use crate::store::LedgerStore;
use chrono::NaiveDate;

/// High-level business logic for adding a machine run.
pub struct AddLogic;

impl AddLogic {
    pub fn apply(
        store: &LedgerStore,
        refs: &ReferenceData,
        operator: &str,
        date: NaiveDate,
        submission: &Submission,
    ) -> AppResult<Submit> {
        // Reject unsafe names before looking at the form.
        store.ledger_path(operator, date)?;

        match validate(submission, refs) {
            Ok(details) => {
                store.append(operator, date, &details)?;
                Ok(Submit::Saved)
            }
            Err(errors) => {
                tracing::debug!(operator, invalid = errors.len(), "add rejected");
                Ok(Submit::Rejected(errors))
            }
        }
    }
}

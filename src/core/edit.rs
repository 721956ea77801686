use crate::core::Submit;
use crate::core::form::{Submission, validate};
use crate::errors::AppResult;
use crate::models::record::RunDetails;
use crate::models::reference::ReferenceData;
use crate::store::LedgerStore;
use chrono::NaiveDate;

/// High-level business logic for editing a machine run in place.
pub struct EditLogic;

impl EditLogic {
    /// Current values of the record at `index`, for prefilling the form.
    pub fn load(
        store: &LedgerStore,
        operator: &str,
        date: NaiveDate,
        index: usize,
    ) -> AppResult<Submission> {
        let row = store.row(operator, date, index)?;
        Ok(Submission::from_details(&RunDetails::from_row(&row)))
    }

    /// The target must exist before the form is even looked at: a stale
    /// index is reported as such, not as a validation failure.
    pub fn apply(
        store: &LedgerStore,
        refs: &ReferenceData,
        operator: &str,
        date: NaiveDate,
        index: usize,
        submission: &Submission,
    ) -> AppResult<Submit> {
        store.row(operator, date, index)?;

        match validate(submission, refs) {
            Ok(details) => {
                store.update(operator, date, index, &details)?;
                Ok(Submit::Saved)
            }
            Err(errors) => {
                tracing::debug!(operator, index, invalid = errors.len(), "edit rejected");
                Ok(Submit::Rejected(errors))
            }
        }
    }
}

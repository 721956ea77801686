use crate::errors::AppResult;
use crate::models::record::LedgerRow;
use crate::store::LedgerStore;
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove the record at `index`. Later records shift up one position.
    pub fn apply(
        store: &LedgerStore,
        operator: &str,
        date: NaiveDate,
        index: usize,
    ) -> AppResult<LedgerRow> {
        store.delete(operator, date, index)
    }
}

pub mod add;
pub mod del;
pub mod edit;
pub mod form;

use form::FormErrors;

/// Result of a form submission that reached the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    /// Validated and written to the ledger.
    Saved,
    /// Rejected by validation; nothing was written.
    Rejected(FormErrors),
}

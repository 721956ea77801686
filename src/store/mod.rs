pub mod ledger;
pub mod reference;

pub use ledger::LedgerStore;
pub use reference::{load_reference_data, load_reference_list};

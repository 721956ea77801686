pub mod record;
pub mod reference;

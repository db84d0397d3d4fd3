pub mod tax_record;

pub use tax_record::{RecordKind, TaxRecord};

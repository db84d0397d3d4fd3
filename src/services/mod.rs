pub mod tax_records;

pub use tax_records::{ServiceError, TaxRecordService};

pub mod tax_records;

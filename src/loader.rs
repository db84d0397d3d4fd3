use std::collections::BTreeMap;
use std::io::Read;

use crate::domain::{RecordKind, TaxRecord};
use crate::services::{ServiceError, TaxRecordService};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when importing tax records.
#[derive(Debug, Error)]
pub enum TaxRecordLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl From<csv::Error> for TaxRecordLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxRecordLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a tax records CSV file.
///
/// Older exports name the tax column `IncomeTax` or `WealthTax`; both are
/// accepted in place of `Tax`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxRecordCsvRow {
    #[serde(rename = "Municipality")]
    pub municipality: String,
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Tax", alias = "IncomeTax", alias = "WealthTax")]
    pub tax: i64,
}

impl From<TaxRecordCsvRow> for TaxRecord {
    fn from(row: TaxRecordCsvRow) -> Self {
        TaxRecord::new(row.municipality.trim(), row.year, row.tax)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub inserted_by_kind: BTreeMap<RecordKind, usize>,
}

pub struct TaxRecordLoader;

impl TaxRecordLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxRecord>, TaxRecordLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let row: TaxRecordCsvRow = result?;
            records.push(row.into());
        }

        Ok(records)
    }

    /// Inserts every record through the service. Records whose
    /// (municipality, year) is already stored are skipped, not overwritten.
    pub async fn load(
        service: &TaxRecordService,
        records: &[TaxRecord],
    ) -> Result<LoadSummary, TaxRecordLoaderError> {
        let mut summary = LoadSummary::default();

        for record in records {
            match service
                .create(&record.municipality, record.year, record.tax)
                .await
            {
                Ok(_) => {
                    summary.inserted += 1;
                    *summary.inserted_by_kind.entry(record.kind()).or_insert(0) += 1;
                }
                Err(ServiceError::Conflict(_)) => {
                    debug!(%record, "already stored, skipping");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(summary)
    }
}

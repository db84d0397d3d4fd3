use crate::domain::TaxRecord;
use serde::{Deserialize, Serialize};

// column names are kept capitalised on the wire, as stored in the table

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct JsonTaxRecord {
    #[serde(rename = "Municipality")]
    pub municipality: String,
    #[serde(rename = "Tax")]
    pub tax: i64,
    #[serde(rename = "Year")]
    pub year: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct JsonMunicipalityTax {
    #[serde(rename = "Municipality")]
    pub municipality: String,
    #[serde(rename = "Tax")]
    pub tax: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct JsonYearTax {
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Tax")]
    pub tax: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonSuccess {
    pub success: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonError {
    pub detail: String,
}

impl From<TaxRecord> for JsonTaxRecord {
    fn from(record: TaxRecord) -> Self {
        JsonTaxRecord {
            municipality: record.municipality,
            tax: record.tax,
            year: record.year,
        }
    }
}

impl From<TaxRecord> for JsonMunicipalityTax {
    fn from(record: TaxRecord) -> Self {
        JsonMunicipalityTax {
            municipality: record.municipality,
            tax: record.tax,
        }
    }
}

impl From<TaxRecord> for JsonYearTax {
    fn from(record: TaxRecord) -> Self {
        JsonYearTax {
            year: record.year,
            tax: record.tax,
        }
    }
}

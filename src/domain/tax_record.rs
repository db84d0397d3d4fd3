use derive_more::derive::Display;

pub const DISTRICT_PREFIX: &str = "Bezirk";
pub const REGION_PREFIX: &str = "Region";
pub const CANTON_MARKER: &str = "Kanton";

/// One row of the `tax_records` table. `tax` is in kCHF.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{municipality} ({year}): {tax} kCHF")]
pub struct TaxRecord {
    pub municipality: String,
    pub year: i64,
    pub tax: i64,
}

impl TaxRecord {
    pub fn new(municipality: impl Into<String>, year: i64, tax: i64) -> Self {
        Self {
            municipality: municipality.into(),
            year,
            tax,
        }
    }

    pub fn kind(&self) -> RecordKind {
        RecordKind::from_name(&self.municipality)
    }
}

/// What a row's name stands for: a single municipality or one of the
/// aggregate rows (district, region, the whole canton).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum RecordKind {
    #[display("municipality")]
    Municipality,
    #[display("district")]
    District,
    #[display("region")]
    Region,
    #[display("canton")]
    Canton,
}

impl RecordKind {
    pub fn from_name(name: &str) -> Self {
        if name.starts_with(DISTRICT_PREFIX) {
            RecordKind::District
        } else if name.starts_with(REGION_PREFIX) {
            RecordKind::Region
        } else if name.contains(CANTON_MARKER) {
            RecordKind::Canton
        } else {
            RecordKind::Municipality
        }
    }

    pub fn is_aggregate(self) -> bool {
        self != RecordKind::Municipality
    }
}

use crate::database::{InsertOutcome, RepositoryError, TaxRecordRepository};
use crate::domain::TaxRecord;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Request-level operations on the tax records table.
///
/// Holds no state of its own besides the repository; every call maps to one
/// statement (plus, for deletes, one follow-up existence probe).
pub struct TaxRecordService {
    repo: Box<dyn TaxRecordRepository>,
}

impl TaxRecordService {
    pub fn new(repo: Box<dyn TaxRecordRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<TaxRecord>, ServiceError> {
        let records = self.repo.list_all().await?;
        non_empty(records, || "No data found".to_string())
    }

    pub async fn get_by_year(&self, year: i64) -> Result<Vec<TaxRecord>, ServiceError> {
        let records = self.repo.find_by_year(year).await?;
        non_empty(records, || format!("No data found for year {}", year))
    }

    /// Aggregate rows ("Bezirk ..." / "Region ...") never match, even when
    /// named exactly.
    pub async fn get_by_municipality(&self, name: &str) -> Result<Vec<TaxRecord>, ServiceError> {
        let records = self.repo.find_by_municipality(name).await?;
        non_empty(records, || format!("No data found for municipality {}", name))
    }

    pub async fn get_by_district(&self, district: &str) -> Result<Vec<TaxRecord>, ServiceError> {
        let records = self.repo.find_by_district(district).await?;
        non_empty(records, || format!("No data found for district {}", district))
    }

    pub async fn get_canton(&self) -> Result<Vec<TaxRecord>, ServiceError> {
        let records = self.repo.find_canton().await?;
        non_empty(records, || "No data found for the canton".to_string())
    }

    pub async fn create(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<String, ServiceError> {
        let record = TaxRecord::new(municipality, year, tax);

        match self.repo.insert(&record).await? {
            InsertOutcome::Inserted => {
                info!(%record, "tax record created");
                Ok(format!(
                    "Entry for {} in {} with tax {} kCHF created",
                    municipality, year, tax
                ))
            }
            InsertOutcome::AlreadyExists => Err(ServiceError::Conflict(format!(
                "Entry for {} in {} already exists",
                municipality, year
            ))),
        }
    }

    pub async fn update_tax(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<String, ServiceError> {
        let updated = self.repo.update_tax(municipality, year, tax).await?;
        if updated == 0 {
            return Err(missing_entry(municipality, year));
        }

        info!(municipality, year, tax, "tax updated");
        Ok(format!(
            "Tax of {} in {} updated to {} kCHF",
            municipality, year, tax
        ))
    }

    /// Moves the (municipality, year_old) entry to year_new. Only that
    /// municipality's row is touched; earlier versions of this API moved
    /// every row of year_old, whatever the municipality.
    pub async fn update_year(
        &self,
        municipality: &str,
        year_old: i64,
        year_new: i64,
    ) -> Result<String, ServiceError> {
        let updated = match self.repo.update_year(municipality, year_old, year_new).await {
            Ok(count) => count,
            Err(RepositoryError::Duplicate) => {
                return Err(ServiceError::Conflict(format!(
                    "Entry for {} in {} already exists",
                    municipality, year_new
                )));
            }
            Err(e) => return Err(e.into()),
        };
        if updated == 0 {
            return Err(missing_entry(municipality, year_old));
        }

        info!(municipality, year_old, year_new, "year updated");
        Ok(format!(
            "Year of {} updated from {} to {}",
            municipality, year_old, year_new
        ))
    }

    /// Deletes the row matching all three fields. An existing
    /// (municipality, year) with a different tax is left alone but still
    /// reported as success.
    pub async fn delete(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<String, ServiceError> {
        let deleted = self.repo.delete(municipality, year, tax).await?;
        if deleted == 0 {
            if !self.repo.exists(municipality, year).await? {
                return Err(missing_entry(municipality, year));
            }
            debug!(municipality, year, tax, "tax value did not match, nothing deleted");
        } else {
            info!(municipality, year, tax, "tax record deleted");
        }

        Ok(format!("Entry for {} in {} deleted", municipality, year))
    }
}

fn missing_entry(municipality: &str, year: i64) -> ServiceError {
    ServiceError::NotFound(format!("No entry for {} in {}", municipality, year))
}

fn non_empty(
    records: Vec<TaxRecord>,
    detail: impl FnOnce() -> String,
) -> Result<Vec<TaxRecord>, ServiceError> {
    if records.is_empty() {
        let detail = detail();
        debug!(%detail, "empty result");
        return Err(ServiceError::NotFound(detail));
    }
    Ok(records)
}

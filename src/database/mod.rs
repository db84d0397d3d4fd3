use crate::domain::TaxRecord;
use async_trait::async_trait;
use thiserror::Error;

pub mod sqlite;

#[derive(Debug, Error)]
pub enum RepositoryError {
    // (Municipality, Year) already taken
    #[error("Record with the same municipality and year already exists")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

// a tax record repository is shared between request handlers; sqlx::Pool is thread safe.
// every mutation is a single statement so the natural key check and the write cannot be
// interleaved by another request.
#[async_trait]
pub trait TaxRecordRepository: Send + Sync {
    // reads, all ordered by year descending
    async fn list_all(&self) -> Result<Vec<TaxRecord>, RepositoryError>;
    async fn find_by_year(&self, year: i64) -> Result<Vec<TaxRecord>, RepositoryError>;
    async fn find_by_municipality(&self, name: &str) -> Result<Vec<TaxRecord>, RepositoryError>;
    async fn find_by_district(&self, district: &str) -> Result<Vec<TaxRecord>, RepositoryError>;
    async fn find_canton(&self) -> Result<Vec<TaxRecord>, RepositoryError>;
    async fn exists(&self, municipality: &str, year: i64) -> Result<bool, RepositoryError>;

    // write operations, returning rows affected where the caller needs to tell "absent" apart
    async fn insert(&self, record: &TaxRecord) -> Result<InsertOutcome, RepositoryError>;
    async fn update_tax(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<u64, RepositoryError>;
    async fn update_year(
        &self,
        municipality: &str,
        year_old: i64,
        year_new: i64,
    ) -> Result<u64, RepositoryError>;
    async fn delete(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<u64, RepositoryError>;
}

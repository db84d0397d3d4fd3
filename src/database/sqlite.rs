use crate::database::{InsertOutcome, RepositoryError, TaxRecordRepository};
use crate::domain::TaxRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

#[derive(sqlx::FromRow)]
struct DbTaxRecord {
    #[sqlx(rename = "Municipality")]
    municipality: String,
    #[sqlx(rename = "Year")]
    year: i64,
    #[sqlx(rename = "Tax")]
    tax: i64,
}

impl From<DbTaxRecord> for TaxRecord {
    fn from(row: DbTaxRecord) -> Self {
        TaxRecord {
            municipality: row.municipality,
            year: row.year,
            tax: row.tax,
        }
    }
}

/// Opens a pool on `database_url`, creating the file first when asked to.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    create_if_missing: bool,
) -> Result<Pool<Sqlite>> {
    // verify db exists
    if create_if_missing && !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!(database_url, "database not found, creating");
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", database_url))?;
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", database_url))
}

pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxRecordRepository for SqliteRepository {
    async fn list_all(&self) -> Result<Vec<TaxRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DbTaxRecord>(
            r#"
            SELECT "Municipality", "Year", "Tax" FROM tax_records
            ORDER BY "Year" DESC, "Municipality" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaxRecord::from).collect())
    }

    async fn find_by_year(&self, year: i64) -> Result<Vec<TaxRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DbTaxRecord>(
            r#"
            SELECT "Municipality", "Year", "Tax" FROM tax_records
            WHERE "Year" = ?
            ORDER BY "Year" DESC, "Municipality" ASC
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaxRecord::from).collect())
    }

    async fn find_by_municipality(&self, name: &str) -> Result<Vec<TaxRecord>, RepositoryError> {
        // GLOB is case sensitive, unlike LIKE
        let rows = sqlx::query_as::<_, DbTaxRecord>(
            r#"
            SELECT "Municipality", "Year", "Tax" FROM tax_records
            WHERE "Municipality" = ?
              AND "Municipality" NOT GLOB 'Bezirk*'
              AND "Municipality" NOT GLOB 'Region*'
            ORDER BY "Year" DESC, "Municipality" ASC
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaxRecord::from).collect())
    }

    async fn find_by_district(&self, district: &str) -> Result<Vec<TaxRecord>, RepositoryError> {
        // instr() keeps '%' and '_' in the district literal
        let rows = sqlx::query_as::<_, DbTaxRecord>(
            r#"
            SELECT "Municipality", "Year", "Tax" FROM tax_records
            WHERE "Municipality" GLOB 'Bezirk*'
              AND instr("Municipality", ?) > 0
            ORDER BY "Year" DESC, "Municipality" ASC
            "#,
        )
        .bind(district)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaxRecord::from).collect())
    }

    async fn find_canton(&self) -> Result<Vec<TaxRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DbTaxRecord>(
            r#"
            SELECT "Municipality", "Year", "Tax" FROM tax_records
            WHERE instr("Municipality", 'Kanton') > 0
            ORDER BY "Year" DESC, "Municipality" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaxRecord::from).collect())
    }

    async fn exists(&self, municipality: &str, year: i64) -> Result<bool, RepositoryError> {
        let found: Option<i64> = sqlx::query_scalar(
            r#"SELECT 1 FROM tax_records WHERE "Municipality" = ? AND "Year" = ? LIMIT 1"#,
        )
        .bind(municipality)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    async fn insert(&self, record: &TaxRecord) -> Result<InsertOutcome, RepositoryError> {
        // the unique index turns a second insert of the same key into a no-op
        let result = sqlx::query(
            r#"
            INSERT INTO tax_records ("Municipality", "Year", "Tax")
            VALUES (?, ?, ?)
            ON CONFLICT ("Municipality", "Year") DO NOTHING
            "#,
        )
        .bind(&record.municipality)
        .bind(record.year)
        .bind(record.tax)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn update_tax(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE tax_records SET "Tax" = ? WHERE "Municipality" = ? AND "Year" = ?"#,
        )
        .bind(tax)
        .bind(municipality)
        .bind(year)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update_year(
        &self,
        municipality: &str,
        year_old: i64,
        year_new: i64,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE tax_records SET "Year" = ? WHERE "Municipality" = ? AND "Year" = ?"#,
        )
        .bind(year_new)
        .bind(municipality)
        .bind(year_old)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(
        &self,
        municipality: &str,
        year: i64,
        tax: i64,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"DELETE FROM tax_records WHERE "Municipality" = ? AND "Year" = ? AND "Tax" = ?"#,
        )
        .bind(municipality)
        .bind(year)
        .bind(tax)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

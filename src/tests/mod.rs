mod unit_config;

use crate::database::sqlite::{run_migrations, SqliteRepository};
use crate::database::TaxRecordRepository;
use crate::domain::TaxRecord;
use crate::services::TaxRecordService;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

// create a sqlite database in memory to test against.
// a single connection, since every in-memory connection is its own database
pub async fn setup_test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    run_migrations(&pool).await.expect("Failed to run migrations");

    pool
}

pub async fn setup_test_repo(seed: &[TaxRecord]) -> SqliteRepository {
    let repo = SqliteRepository::new(setup_test_pool().await);
    for record in seed {
        repo.insert(record).await.expect("Should seed record");
    }
    repo
}

pub async fn setup_test_service(seed: &[TaxRecord]) -> TaxRecordService {
    TaxRecordService::new(Box::new(setup_test_repo(seed).await))
}

// a small slice of the canton: municipalities, district and region aggregates, the canton row
pub fn zurich_seed() -> Vec<TaxRecord> {
    vec![
        TaxRecord::new("Zürich", 2020, 100),
        TaxRecord::new("Zürich", 2021, 110),
        TaxRecord::new("Horgen", 2021, 40),
        TaxRecord::new("Adliswil", 2020, 25),
        TaxRecord::new("Bezirk Horgen", 2020, 300),
        TaxRecord::new("Bezirk Horgen", 2021, 320),
        TaxRecord::new("Bezirk Zürich", 2021, 900),
        TaxRecord::new("Region Zimmerberg", 2021, 280),
        TaxRecord::new("Kanton Zürich", 2020, 5000),
        TaxRecord::new("Kanton Zürich", 2021, 5200),
    ]
}

use async_trait::async_trait;
use postgres_models::connection::{Pool, WithConnectionError, with_connection};
use postgres_models::ddl;
use postgres_models::models::locations::{Location, NewLocation};
use postgres_models::models::measurements::{Measurement, NewMeasurement};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Failed to get database connection: {0}")]
    Pool(String),
}

impl From<WithConnectionError<diesel::result::Error>> for StoreError {
    fn from(err: WithConnectionError<diesel::result::Error>) -> Self {
        match err {
            WithConnectionError::Pool(e) => StoreError::Pool(e.to_string()),
            WithConnectionError::Operation(e) => StoreError::Database(e),
        }
    }
}

/// Persistence boundary for the two dashboard tables.
///
/// Rows are only ever appended in bulk or wholesale-deleted via [`reset`];
/// there is no update path and no deduplication.
///
/// [`reset`]: AqStore::reset
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AqStore: Send + Sync {
    async fn insert_measurements(
        &self,
        rows: Vec<NewMeasurement>,
    ) -> Result<usize, StoreError>;

    async fn list_measurements(&self) -> Result<Vec<Measurement>, StoreError>;

    async fn insert_locations(
        &self,
        rows: Vec<NewLocation>,
    ) -> Result<usize, StoreError>;

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError>;

    /// Drop and recreate both tables.
    async fn reset(&self) -> Result<(), StoreError>;

    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Postgres-backed store over a bb8 connection pool. Each operation holds a
/// pooled connection only for its own duration.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AqStore for PgStore {
    async fn insert_measurements(
        &self,
        rows: Vec<NewMeasurement>,
    ) -> Result<usize, StoreError> {
        let inserted = with_connection(&self.pool, |mut conn| async move {
            Measurement::insert_many(rows, &mut conn).await
        })
        .await?;
        Ok(inserted)
    }

    async fn list_measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        let rows = with_connection(&self.pool, |mut conn| async move {
            Measurement::query_all(&mut conn).await
        })
        .await?;
        Ok(rows)
    }

    async fn insert_locations(
        &self,
        rows: Vec<NewLocation>,
    ) -> Result<usize, StoreError> {
        let inserted = with_connection(&self.pool, |mut conn| async move {
            Location::insert_many(rows, &mut conn).await
        })
        .await?;
        Ok(inserted)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let rows = with_connection(&self.pool, |mut conn| async move {
            Location::query_all(&mut conn).await
        })
        .await?;
        Ok(rows)
    }

    async fn reset(&self) -> Result<(), StoreError> {
        with_connection(&self.pool, |mut conn| async move {
            ddl::drop_all(&mut conn).await?;
            ddl::create_all(&mut conn).await
        })
        .await?;
        tracing::info!("dropped and recreated dashboard tables");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        use diesel_async::RunQueryDsl;

        with_connection(&self.pool, |mut conn| async move {
            diesel::sql_query("SELECT 1").execute(&mut conn).await
        })
        .await?;
        Ok(())
    }
}

use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::time::Duration;
use tracing::Instrument;

pub type Pool = bb8::Pool<AsyncPgConnection>;
pub type PooledConnection = bb8::PooledConnection<'static, AsyncPgConnection>;

pub const MAX_POOL_SIZE: u32 = 16;

pub async fn establish_connection(
    db_url: String,
) -> Result<Pool, anyhow::Error> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
    let pool = bb8::Pool::builder()
        .max_size(MAX_POOL_SIZE)
        .connection_timeout(Duration::from_secs(10))
        .idle_timeout(Some(Duration::from_secs(180)))
        .retry_connection(true)
        .max_lifetime(Some(Duration::from_secs(3600)))
        .build(config)
        .await?;

    // Sanity check before handing the pool out
    let mut conn = pool.get_owned().await?;
    diesel::sql_query("SELECT 1").execute(&mut conn).await?;

    Ok(pool)
}

/// Execute a database operation with a scoped connection.
///
/// The connection is acquired from the pool only when this function is called
/// and automatically returned to the pool when the operation completes, so
/// callers never hold a connection for their entire lifecycle.
pub async fn with_connection<F, Fut, T, E>(
    pool: &Pool,
    operation: F,
) -> Result<T, WithConnectionError<E>>
where
    F: FnOnce(PooledConnection) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let pool_state = pool.state();
    let acquire_span = tracing::info_span!(
        "acquiring_pooled_connection",
        pool.connections = pool_state.connections,
        pool.idle_connections = pool_state.idle_connections,
    );

    let conn =
        async { pool.get_owned().await.map_err(WithConnectionError::Pool) }
            .instrument(acquire_span)
            .await?;

    let hold_span = tracing::info_span!("holding_db_connection");
    async {
        operation(conn)
            .await
            .map_err(WithConnectionError::Operation)
    }
    .instrument(hold_span)
    .await
}

/// Error type for with_connection that distinguishes between pool and operation errors
#[derive(Debug)]
pub enum WithConnectionError<E> {
    /// Error acquiring connection from the pool
    Pool(diesel_async::pooled_connection::bb8::RunError),
    /// Error from the database operation itself
    Operation(E),
}

impl<E: std::fmt::Display> std::fmt::Display for WithConnectionError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WithConnectionError::Pool(e) => {
                write!(f, "Failed to acquire connection: {}", e)
            }
            WithConnectionError::Operation(e) => {
                write!(f, "Database operation failed: {}", e)
            }
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error
    for WithConnectionError<E>
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WithConnectionError::Pool(e) => Some(e),
            WithConnectionError::Operation(e) => Some(e),
        }
    }
}

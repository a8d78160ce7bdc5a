//! Programmatic schema management.
//!
//! The dashboard owns exactly two flat tables and recreates them wholesale on
//! refresh, so the schema is issued as plain DDL instead of migration files.

use diesel_async::{AsyncPgConnection, RunQueryDsl};

const CREATE_MEASUREMENTS: &str = "\
    CREATE TABLE IF NOT EXISTS measurements ( \
        id SERIAL PRIMARY KEY, \
        recorded_at VARCHAR(25) NOT NULL, \
        value DOUBLE PRECISION NOT NULL \
    )";

const CREATE_LOCATIONS: &str = "\
    CREATE TABLE IF NOT EXISTS locations ( \
        id SERIAL PRIMARY KEY, \
        city TEXT, \
        country TEXT, \
        latitude DOUBLE PRECISION, \
        longitude DOUBLE PRECISION, \
        measurement_count INTEGER \
    )";

const DROP_MEASUREMENTS: &str = "DROP TABLE IF EXISTS measurements";
const DROP_LOCATIONS: &str = "DROP TABLE IF EXISTS locations";

/// Create both tables if they do not exist yet.
pub async fn create_all(
    conn: &mut AsyncPgConnection,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(CREATE_MEASUREMENTS).execute(conn).await?;
    diesel::sql_query(CREATE_LOCATIONS).execute(conn).await?;
    tracing::debug!("ensured measurements and locations tables exist");
    Ok(())
}

/// Drop both tables. Pair with [`create_all`] for a destructive reset.
pub async fn drop_all(
    conn: &mut AsyncPgConnection,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(DROP_MEASUREMENTS).execute(conn).await?;
    diesel::sql_query(DROP_LOCATIONS).execute(conn).await?;
    tracing::debug!("dropped measurements and locations tables");
    Ok(())
}

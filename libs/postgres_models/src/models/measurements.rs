use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, serde::Serialize)]
#[diesel(table_name = crate::schema::measurements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Measurement {
    pub id: i32,
    pub recorded_at: String,
    pub value: f64,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::measurements)]
pub struct NewMeasurement {
    pub recorded_at: String,
    pub value: f64,
}

impl Measurement {
    /// Bulk insert measurement rows. Repeated timestamps are appended as-is,
    /// there is no uniqueness constraint on this table.
    pub async fn insert_many(
        rows: Vec<NewMeasurement>,
        conn: &mut AsyncPgConnection,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::measurements::dsl::*;

        diesel::insert_into(measurements)
            .values(&rows)
            .execute(conn)
            .await
    }

    /// Every stored row, in insertion order.
    pub async fn query_all(
        conn: &mut AsyncPgConnection,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::measurements::dsl::*;

        measurements.order(id.asc()).load(conn).await
    }

    /// Count total rows in the table.
    pub async fn count(
        conn: &mut AsyncPgConnection,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::measurements::dsl::*;

        measurements.count().get_result(conn).await
    }
}

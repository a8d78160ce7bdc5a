use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, serde::Serialize)]
#[diesel(table_name = crate::schema::locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Location {
    pub id: i32,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub measurement_count: Option<i32>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::locations)]
pub struct NewLocation {
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub measurement_count: Option<i32>,
}

impl Location {
    /// Bulk insert location rows.
    pub async fn insert_many(
        rows: Vec<NewLocation>,
        conn: &mut AsyncPgConnection,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::locations::dsl::*;

        diesel::insert_into(locations)
            .values(&rows)
            .execute(conn)
            .await
    }

    /// Every stored row, in insertion order.
    pub async fn query_all(
        conn: &mut AsyncPgConnection,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::locations::dsl::*;

        locations.order(id.asc()).load(conn).await
    }

    /// Count total rows in the table.
    pub async fn count(
        conn: &mut AsyncPgConnection,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::locations::dsl::*;

        locations.count().get_result(conn).await
    }
}

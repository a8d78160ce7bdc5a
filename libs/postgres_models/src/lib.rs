pub mod connection;
pub mod ddl;
pub mod models;
pub mod schema;

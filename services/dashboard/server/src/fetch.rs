//! Fetch-and-persist flows for the two dashboard tables.
//!
//! Both functions call the upstream, bulk-insert the mapped rows, then read
//! the FULL table back so the caller renders everything stored so far, not
//! just the new rows. Repeated calls append duplicates; only `/refresh`
//! clears the tables.

use openaq_client::models::{LocationEntry, MeasurementEntry};
use openaq_client::{OpenAqClient, OpenAqError};
use postgres_models::models::locations::{Location, NewLocation};
use postgres_models::models::measurements::{Measurement, NewMeasurement};

use crate::store::{AqStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("OpenAQ responded with status {0}")]
    UpstreamStatus(u16),

    #[error("OpenAQ request failed: {0}")]
    Upstream(#[source] OpenAqError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn classify(err: OpenAqError) -> FetchError {
    match err {
        OpenAqError::UnexpectedStatus(status) => {
            FetchError::UpstreamStatus(status)
        }
        other => FetchError::Upstream(other),
    }
}

pub fn measurement_rows(entries: &[MeasurementEntry]) -> Vec<NewMeasurement> {
    entries
        .iter()
        .map(|entry| NewMeasurement {
            recorded_at: entry.date.utc.clone(),
            value: entry.value,
        })
        .collect()
}

pub fn location_rows(entries: &[LocationEntry]) -> Vec<NewLocation> {
    entries
        .iter()
        .map(|entry| {
            let coordinates = entry.coordinates.clone().unwrap_or_default();
            NewLocation {
                city: entry.city.clone(),
                country: entry.country.clone(),
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
                measurement_count: entry.count,
            }
        })
        .collect()
}

/// Pull measurements for the configured city/parameter, persist them and
/// return every stored measurement row.
pub async fn sync_measurements(
    client: &OpenAqClient,
    store: &dyn AqStore,
    city: &str,
    parameter: &str,
) -> Result<Vec<Measurement>, FetchError> {
    let page = client
        .measurements(city, parameter)
        .await
        .map_err(classify)?;

    let rows = measurement_rows(&page.results);
    let inserted = store.insert_measurements(rows).await?;
    tracing::info!(city, parameter, inserted, "stored measurement rows");

    Ok(store.list_measurements().await?)
}

/// Pull station metadata, persist it and return every stored location row.
pub async fn sync_locations(
    client: &OpenAqClient,
    store: &dyn AqStore,
) -> Result<Vec<Location>, FetchError> {
    let page = client.locations().await.map_err(classify)?;

    let rows = location_rows(&page.results);
    let inserted = store.insert_locations(rows).await?;
    tracing::info!(inserted, "stored location rows");

    Ok(store.list_locations().await?)
}

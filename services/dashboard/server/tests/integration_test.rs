use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashboard_api::store::{AqStore, StoreError};
use dashboard_api::{AppState, Config, routes};
use openaq_client::OpenAqClient;
use postgres_models::models::locations::{Location, NewLocation};
use postgres_models::models::measurements::{Measurement, NewMeasurement};

/// In-memory stand-in for the Postgres store, with the same append-only /
/// wholesale-reset semantics.
#[derive(Default)]
struct MemoryStore {
    measurements: RwLock<Vec<Measurement>>,
    locations: RwLock<Vec<Location>>,
}

impl MemoryStore {
    fn measurement_count(&self) -> usize {
        self.measurements.read().unwrap().len()
    }

    fn location_count(&self) -> usize {
        self.locations.read().unwrap().len()
    }

    fn seed_measurement(&self, recorded_at: &str, value: f64) {
        let mut rows = self.measurements.write().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(Measurement {
            id,
            recorded_at: recorded_at.to_string(),
            value,
        });
    }
}

#[async_trait]
impl AqStore for MemoryStore {
    async fn insert_measurements(
        &self,
        new_rows: Vec<NewMeasurement>,
    ) -> Result<usize, StoreError> {
        let mut rows = self.measurements.write().unwrap();
        let inserted = new_rows.len();
        for row in new_rows {
            let id = rows.len() as i32 + 1;
            rows.push(Measurement {
                id,
                recorded_at: row.recorded_at,
                value: row.value,
            });
        }
        Ok(inserted)
    }

    async fn list_measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        Ok(self.measurements.read().unwrap().clone())
    }

    async fn insert_locations(
        &self,
        new_rows: Vec<NewLocation>,
    ) -> Result<usize, StoreError> {
        let mut rows = self.locations.write().unwrap();
        let inserted = new_rows.len();
        for row in new_rows {
            let id = rows.len() as i32 + 1;
            rows.push(Location {
                id,
                city: row.city,
                country: row.country,
                latitude: row.latitude,
                longitude: row.longitude,
                measurement_count: row.measurement_count,
            });
        }
        Ok(inserted)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.locations.read().unwrap().clone())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        self.measurements.write().unwrap().clear();
        self.locations.write().unwrap().clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn build_test_server(
    upstream_url: &str,
    store: Arc<MemoryStore>,
) -> TestServer {
    let config = Config {
        database_url: "postgresql://unused".to_string(),
        api_service_port: "0".to_string(),
        log_format: String::new(),
        openaq_base_url: upstream_url.to_string(),
        openaq_city: "Los Angeles".to_string(),
        openaq_parameter: "pm25".to_string(),
    };

    let state = AppState {
        store,
        client: Arc::new(OpenAqClient::with_base_url(upstream_url)),
        config: Arc::new(config),
    };

    TestServer::new(routes::app(state)).unwrap()
}

fn measurements_body() -> serde_json::Value {
    json!({
        "results": [
            { "date": { "utc": "2017-09-25T15:00:00Z" }, "value": 12.3 },
            { "date": { "utc": "2017-09-25T14:00:00Z" }, "value": 9.0 }
        ]
    })
}

fn locations_body() -> serde_json::Value {
    json!({
        "results": [
            {
                "city": "Los Angeles",
                "country": "US",
                "coordinates": { "latitude": 34.05, "longitude": -118.24 },
                "count": 4242
            }
        ]
    })
}

async fn mount_upstream(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/measurements"))
        .and(query_param("city", "Los Angeles"))
        .and(query_param("parameter", "pm25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(measurements_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(locations_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_home_persists_and_renders_all_rows() {
    let upstream = MockServer::start().await;
    mount_upstream(&upstream).await;

    let store = Arc::new(MemoryStore::default());
    store.seed_measurement("2017-09-25T13:00:00Z", 7.5);
    let server = build_test_server(&upstream.uri(), store.clone());

    let response = server.get("/").await;
    response.assert_status_ok();

    // Two new rows on top of the pre-existing one
    assert_eq!(store.measurement_count(), 3);

    let html = response.text();
    assert!(html.contains("2017-09-25T15:00:00Z"));
    assert!(html.contains("12.3"));
    assert!(html.contains("2017-09-25T13:00:00Z"));
    assert_eq!(html.matches("<tr><td>").count(), 3);
}

#[tokio::test]
async fn test_repeated_fetches_accumulate_duplicates() {
    let upstream = MockServer::start().await;
    mount_upstream(&upstream).await;

    let store = Arc::new(MemoryStore::default());
    let server = build_test_server(&upstream.uri(), store.clone());

    server.get("/").await.assert_status_ok();
    server.get("/").await.assert_status_ok();

    // No dedup: the same two entries are appended twice
    assert_eq!(store.measurement_count(), 4);
}

#[tokio::test]
async fn test_upstream_non_200_renders_fallback_and_inserts_nothing() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/measurements"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let store = Arc::new(MemoryStore::default());
    let server = build_test_server(&upstream.uri(), store.clone());

    let response = server.get("/").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.text(), "Something went wrong!");
    assert_eq!(store.measurement_count(), 0);
}

#[tokio::test]
async fn test_refresh_leaves_only_the_latest_fetch() {
    let upstream = MockServer::start().await;
    mount_upstream(&upstream).await;

    let store = Arc::new(MemoryStore::default());
    let server = build_test_server(&upstream.uri(), store.clone());

    // Two fetches accumulate duplicates, refresh resets to a single fetch
    server.get("/").await.assert_status_ok();
    server.get("/").await.assert_status_ok();
    assert_eq!(store.measurement_count(), 4);

    let response = server.get("/refresh").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Data refreshed!");

    assert_eq!(store.measurement_count(), 2);
    assert_eq!(store.location_count(), 1);
}

#[tokio::test]
async fn test_locations_mapping_matches_upstream_fields() {
    let upstream = MockServer::start().await;
    mount_upstream(&upstream).await;

    let store = Arc::new(MemoryStore::default());
    let server = build_test_server(&upstream.uri(), store.clone());

    let response = server.get("/locations").await;
    response.assert_status_ok();

    let stored = store.locations.read().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].city.as_deref(), Some("Los Angeles"));
    assert_eq!(stored[0].country.as_deref(), Some("US"));
    assert_eq!(stored[0].latitude, Some(34.05));
    assert_eq!(stored[0].longitude, Some(-118.24));
    assert_eq!(stored[0].measurement_count, Some(4242));

    let html = response.text();
    assert!(html.contains("Los Angeles"));
    assert!(html.contains("4242"));
}

#[tokio::test]
async fn test_health_reports_postgres_component() {
    let upstream = MockServer::start().await;
    let store = Arc::new(MemoryStore::default());
    let server = build_test_server(&upstream.uri(), store);

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["postgres"]["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let upstream = MockServer::start().await;
    let store = Arc::new(MemoryStore::default());
    let server = build_test_server(&upstream.uri(), store);

    let response = server.get("/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Not Found");
}

//! # Air-Quality Dashboard API
//!
//! Pulls measurements and station metadata from OpenAQ into Postgres and
//! serves them as two HTML pages plus a destructive `/refresh` endpoint.

use std::sync::Arc;

use openaq_client::OpenAqClient;

use crate::store::AqStore;

pub mod fetch;
pub mod handlers;
pub mod health;
pub mod routes;
pub mod store;
pub mod views;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AqStore>,
    pub client: Arc<OpenAqClient>,
    pub config: Arc<Config>,
}

#[derive(serde::Deserialize)]
pub struct Config {
    // Db config
    pub database_url: String,

    // Service port
    #[serde(default = "default_api_service_port")]
    pub api_service_port: String,

    // Loggers
    #[serde(default)]
    pub log_format: String,

    // Upstream OpenAQ API
    #[serde(default = "default_openaq_base_url")]
    pub openaq_base_url: String,
    #[serde(default = "default_openaq_city")]
    pub openaq_city: String,
    #[serde(default = "default_openaq_parameter")]
    pub openaq_parameter: String,
}

fn default_api_service_port() -> String {
    "8080".to_string()
}

fn default_openaq_base_url() -> String {
    openaq_client::client::DEFAULT_BASE_URL.to_string()
}

fn default_openaq_city() -> String {
    "Los Angeles".to_string()
}

fn default_openaq_parameter() -> String {
    "pm25".to_string()
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        // Load .env file if present (useful when running outside docker-compose)
        match dotenv::dotenv() {
            Ok(path) => eprintln!("Loaded .env from: {}", path.display()),
            Err(e) => eprintln!("dotenv warning: {e}"),
        }

        envy::from_env::<Config>()
    }
}

use reqwest::StatusCode;

use crate::{
    error::{OpenAqClientResult, OpenAqError},
    models::*,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openaq.org/v1";

pub struct OpenAqClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAqClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different host, e.g. a mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            http_client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Measurements for a named city and pollutant parameter.
    pub async fn measurements(
        &self,
        city: &str,
        parameter: &str,
    ) -> OpenAqClientResult<Page<MeasurementEntry>> {
        let url = format!("{}/measurements", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("city", city), ("parameter", parameter)])
            .send()
            .await
            .map_err(OpenAqError::Request)?;

        Self::decode_page(response).await
    }

    /// Station metadata for every known location.
    pub async fn locations(
        &self,
    ) -> OpenAqClientResult<Page<LocationEntry>> {
        let url = format!("{}/locations", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(OpenAqError::Request)?;

        Self::decode_page(response).await
    }

    async fn decode_page<T>(
        response: reqwest::Response,
    ) -> OpenAqClientResult<Page<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(OpenAqError::UnexpectedStatus(status.as_u16()));
        }

        response.json::<Page<T>>().await.map_err(OpenAqError::Decode)
    }
}

impl Default for OpenAqClient {
    fn default() -> Self {
        Self::new()
    }
}

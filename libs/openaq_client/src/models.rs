use serde::Deserialize;

/// A `results` page as returned by every OpenAQ v1 endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementEntry {
    pub date: MeasurementDate,
    pub value: f64,
    pub parameter: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementDate {
    pub utc: String,
    pub local: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationEntry {
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub count: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

//! VBB REST HTTP client.
//!
//! Provides async methods for station search and departure boards against
//! `v6.vbb.transport.rest` (or any compatible `hafas-rest-api` instance).

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Departure, DepartureQuery, Product, Station, StationId};

use super::TransitProvider;
use super::convert::{convert_departures, convert_location, convert_locations};
use super::error::TransitError;
use super::types::{DeparturesResponse, LocationDto};

/// Default base URL for the VBB REST API.
pub const DEFAULT_BASE_URL: &str = "https://v6.vbb.transport.rest";

/// Default departure window in minutes.
const DEFAULT_WINDOW_MINS: u32 = 120;

/// Default number of candidates requested from a station search.
const DEFAULT_SEARCH_RESULTS: usize = 5;

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API (defaults to production VBB REST)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How far ahead of `when` to look for departures (minutes)
    pub window_mins: u32,
    /// Number of candidates to request when searching stations
    pub search_results: usize,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            window_mins: DEFAULT_WINDOW_MINS,
            search_results: DEFAULT_SEARCH_RESULTS,
            user_agent: concat!("vbb-departures/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing or self-hosted instances).
    ///
    /// A trailing slash is removed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the departure window.
    pub fn with_window(mut self, mins: u32) -> Self {
        self.window_mins = mins;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// VBB REST API client.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
    window_mins: u32,
    search_results: usize,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, TransitError> {
        let mut headers = HeaderMap::new();

        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| TransitError::InvalidConfig("invalid User-Agent".to_string()))?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            window_mins: config.window_mins,
            search_results: config.search_results,
        })
    }

    /// GET a path and return the body of a successful response.
    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, TransitError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

/// Decode a JSON body, keeping an excerpt of it on failure.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, TransitError> {
    serde_json::from_str(body).map_err(|e| TransitError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

/// Query parameters for `GET /locations`.
fn search_params(query: &str, results: usize) -> Vec<(&'static str, String)> {
    vec![
        ("query", query.to_string()),
        ("results", results.to_string()),
        ("stops", "true".to_string()),
        ("addresses", "false".to_string()),
        ("poi", "false".to_string()),
        ("fuzzy", "true".to_string()),
    ]
}

/// Query parameters for `GET /stops/{id}/departures`.
///
/// Every product gets an explicit flag so the server-side defaults never
/// widen the filter.
fn departure_params(query: &DepartureQuery, window_mins: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("when", query.when.to_rfc3339()),
        ("results", query.results.to_string()),
        ("duration", window_mins.to_string()),
        ("remarks", "false".to_string()),
    ];

    for product in Product::ALL {
        params.push((product.as_str(), query.products.contains(product).to_string()));
    }

    params
}

impl TransitProvider for TransitClient {
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, TransitError> {
        let body = self
            .get_text("/locations", &search_params(query, self.search_results))
            .await?;
        let locations: Vec<LocationDto> = decode(&body)?;

        Ok(convert_locations(&locations))
    }

    async fn station(&self, id: &StationId) -> Result<Option<Station>, TransitError> {
        let path = format!("/stops/{}", id.as_str());

        let body = match self.get_text(&path, &[]).await {
            Ok(body) => body,
            Err(TransitError::Api { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let location: LocationDto = decode(&body)?;

        Ok(convert_location(&location))
    }

    async fn departures(&self, query: &DepartureQuery) -> Result<Vec<Departure>, TransitError> {
        let path = format!("/stops/{}/departures", query.station.as_str());

        let body = self
            .get_text(&path, &departure_params(query, self.window_mins))
            .await?;
        let response: DeparturesResponse = decode(&body)?;

        let mut departures = convert_departures(&response.departures);
        departures.truncate(query.results);

        debug!(
            station = %query.station,
            count = departures.len(),
            "fetched departures"
        );
        Ok(departures)
    }
}

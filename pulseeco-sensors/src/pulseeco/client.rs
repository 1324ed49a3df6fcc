//! Pulse.eco HTTP client.
//!
//! Provides async methods for the two read-only REST endpoints this crate
//! needs. Handles per-city base URLs, optional basic authentication and
//! bounding of concurrent requests.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Reading, Station};
use crate::entry::ConnectionParams;

use super::api::{DataRawQuery, PulseEcoApi};
use super::convert::{convert_data_raw, convert_sensors};
use super::error::PulseEcoError;
use super::types::{DataRawDto, SensorDto};

/// Connections kept per host, sized for one request per selected station.
const DEFAULT_POOL_SIZE: usize = 50;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Pulse.eco client.
#[derive(Debug, Clone)]
pub struct PulseEcoConfig {
    /// City subdomain, e.g. `skopje`
    pub city: String,
    /// Basic-auth `(username, password)`, sent only when set
    pub credentials: Option<(String, String)>,
    /// Base URL override (defaults to `https://{city}.pulse.eco/rest`)
    pub base_url: Option<String>,
    /// Pooled connections and maximum concurrent requests
    pub pool_size: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PulseEcoConfig {
    /// Create a new anonymous config for the given city.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            credentials: None,
            base_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build a config from stored connection parameters.
    ///
    /// Credentials are used only when both username and password are present.
    pub fn from_params(params: &ConnectionParams) -> Self {
        let config = Self::new(params.city.trim().to_lowercase());
        match params.credentials() {
            Some((username, password)) => config.with_credentials(username, password),
            None => config,
        }
    }

    /// Authenticate with basic auth.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the connection pool size.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The base URL requests are sent to.
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.pulse.eco/rest", self.city),
        }
    }
}

/// Pulse.eco REST client.
///
/// Cheap to clone; clones share the connection pool and the request
/// semaphore, so one client serves every sensor of a configuration entry.
#[derive(Debug, Clone)]
pub struct PulseEcoClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    semaphore: Arc<Semaphore>,
}

impl PulseEcoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PulseEcoConfig) -> Result<Self, PulseEcoError> {
        if config.base_url.is_none() {
            validate_city(&config.city)?;
        }

        if config.pool_size == 0 {
            return Err(PulseEcoError::InvalidConfig(
                "pool size must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_size)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.resolved_base_url(),
            credentials: config.credentials,
            semaphore: Arc::new(Semaphore::new(config.pool_size)),
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, PulseEcoError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| PulseEcoError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "pulse.eco request");

        let mut request = self.http.get(&url).query(query);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PulseEcoError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PulseEcoError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PulseEcoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PulseEcoError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl PulseEcoApi for PulseEcoClient {
    async fn sensors(&self) -> Result<Vec<Station>, PulseEcoError> {
        let dtos: Vec<SensorDto> = self.get_json("sensor", &[]).await?;
        Ok(convert_sensors(&dtos))
    }

    async fn data_raw(&self, query: &DataRawQuery) -> Result<Vec<Reading>, PulseEcoError> {
        let dtos: Vec<DataRawDto> = self.get_json("dataRaw", &query.query_params()).await?;
        Ok(convert_data_raw(&dtos))
    }
}

/// The city becomes a DNS label, so it must be one.
fn validate_city(city: &str) -> Result<(), PulseEcoError> {
    if city.is_empty() {
        return Err(PulseEcoError::InvalidConfig(
            "city must not be empty".to_string(),
        ));
    }

    if !city
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(PulseEcoError::InvalidConfig(format!(
            "city {city:?} must be lowercase letters, digits or '-'"
        )));
    }

    Ok(())
}

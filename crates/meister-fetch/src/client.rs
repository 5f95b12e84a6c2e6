//! Request building and payload retrieval

use std::time::Duration;

use meister_config::{resolve_string, EnvSource, ProcessEnv, API_KEY_VAR, BASE_URL_VAR};
use meister_core::{Payload, PayloadSource};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{FetchError, FetchResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Endpoint path appended to the base URL
pub const WEATHER_PATH: &str = "weather";

/// One fetch call: the location plus optional explicit credentials
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub location: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Resolved API credentials
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    base_url: String,
}

impl Credentials {
    /// Explicit values first, then `WEATHER_MEISTER_API_KEY` / `WEATHER_MEISTER_BASE_URL`
    pub fn resolve(
        api_key: Option<&str>,
        base_url: Option<&str>,
        env: &dyn EnvSource,
    ) -> FetchResult<Self> {
        let api_key =
            resolve_string(api_key, API_KEY_VAR, env).ok_or(FetchError::Configuration(API_KEY_VAR))?;
        let base_url = resolve_string(base_url, BASE_URL_VAR, env)
            .ok_or(FetchError::Configuration(BASE_URL_VAR))?;
        Ok(Self { api_key, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), WEATHER_PATH)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// HTTP client bound to one set of credentials
#[derive(Debug, Clone)]
pub struct MeisterClient {
    http: Client,
    credentials: Credentials,
}

impl MeisterClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> FetchResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, credentials })
    }

    /// GET `{base_url}/weather?location=..&api_key=..`
    pub async fn fetch_payload(&self, location: &str) -> FetchResult<Payload> {
        let url = self.credentials.endpoint();
        debug!(%url, %location, "fetching weather payload");

        let resp = self
            .http
            .get(&url)
            .query(&[("location", location), ("api_key", self.credentials.api_key.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                warn!(error = %e, %location, "weather fetch failed");
                e
            })?;

        let body = resp.bytes().await.map_err(reqwest::Error::without_url)?;
        match serde_json::from_slice::<Value>(&body)? {
            Value::Object(payload) => Ok(payload),
            other => Err(FetchError::DataFormat(json_kind(&other))),
        }
    }
}

#[async_trait::async_trait]
impl PayloadSource for MeisterClient {
    async fn fetch(&self, location: &str) -> anyhow::Result<Payload> {
        Ok(self.fetch_payload(location).await?)
    }
}

/// Resolve credentials from `request` then `env`, and fetch one payload
pub async fn fetch_with_env(request: &FetchRequest, env: &dyn EnvSource) -> FetchResult<Payload> {
    let credentials = Credentials::resolve(
        request.api_key.as_deref(),
        request.base_url.as_deref(),
        env,
    )?;
    MeisterClient::new(credentials, request.timeout)?
        .fetch_payload(&request.location)
        .await
}

/// Fetch one payload, falling back to the process environment for credentials
pub async fn fetch(request: &FetchRequest) -> FetchResult<Payload> {
    fetch_with_env(request, &ProcessEnv).await
}

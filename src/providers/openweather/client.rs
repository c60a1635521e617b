//! Resilient HTTP client for the OpenWeather API.
//!
//! Every logical request goes through [`with_retry()`]: 5xx responses,
//! timeouts and transport failures are retried with exponential backoff;
//! any other failure is classified once and returned immediately. Callers
//! never see a raw transport error, only the
//! [`VedrfolnirError`] taxonomy.
//!
//! The API key is attached as the `appid` query parameter on every request
//! and is stripped from anything that ends up in an error or a log line.
//! See: <https://openweathermap.org/current>

use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::providers::retry::{RetryConfig, RetryFailure, with_retry};
use crate::{Result, VedrfolnirError, telemetry};

/// Default base URL for the OpenWeather API
pub const DEFAULT_HOST: &str = "https://api.openweathermap.org";

/// Overall timeout for a single HTTP attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameter carrying the API key.
pub const AUTH_PARAM: &str = "appid";

/// Parameters never echoed back to callers.
const SENSITIVE_PARAMS: &[&str] = &[AUTH_PARAM];

/// Longest error body excerpt written to the debug log.
const LOG_BODY_LIMIT: usize = 200;

const PROVIDER_NAME: &str = "openweather";

/// Client for the OpenWeather REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    host: String,
    http: Client,
    retry: RetryConfig,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("host", &self.host)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a client with the default 30s timeout and retry policy.
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, host, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-attempt timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        host: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            VedrfolnirError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            host: host.into().trim_end_matches('/').to_string(),
            http,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Retry policy applied to every request.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Issue a GET and decode the JSON body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        self.request(Method::GET, path, params).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        query.push((AUTH_PARAM.to_string(), self.api_key.clone()));

        let method_ref = &method;
        let query_ref = query.as_slice();
        let outcome = with_retry(
            &self.retry,
            PROVIDER_NAME,
            VedrfolnirError::is_transient,
            |_attempt| self.send_once(method_ref, path, query_ref),
        )
        .await;

        match outcome {
            Ok(value) => Ok(value),
            Err(RetryFailure::Fatal(e)) => Err(e),
            Err(RetryFailure::Exhausted { attempts, last }) => {
                debug!(%method, path, attempts, error = %last, "[OpenWeather] retries exhausted");
                Err(VedrfolnirError::UpstreamFailure {
                    method: method.to_string(),
                    path: path.to_string(),
                    attempts,
                })
            }
        }
    }

    /// One HTTP attempt, with the response classified into success,
    /// a transient error, or a permanent error.
    async fn send_once<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.host, path);
        debug!(%method, path, "[OpenWeather] request");

        let start = Instant::now();
        let sent = self
            .http
            .request(method.clone(), &url)
            .query(query)
            .send()
            .await;
        metrics::histogram!(telemetry::UPSTREAM_DURATION_SECONDS, "provider" => PROVIDER_NAME)
            .record(start.elapsed().as_secs_f64());

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "provider" => PROVIDER_NAME,
                    "status" => "error",
                )
                .increment(1);
                return Err(transport_error(e));
            }
        };

        let status = response.status().as_u16();
        metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
            "provider" => PROVIDER_NAME,
            "status" => status.to_string(),
        )
        .increment(1);

        if response.status().is_success() {
            debug!(%method, path, status, "[OpenWeather] success");
            let body = response.bytes().await.map_err(transport_error)?;
            return serde_json::from_slice(&body)
                .map_err(|e| VedrfolnirError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        debug!(
            %method,
            path,
            status,
            body = truncate(&body, LOG_BODY_LIMIT),
            "[OpenWeather] error"
        );
        Err(classify_status(status, method, path, query))
    }
}

/// Map a non-2xx status to an error.
///
/// 400/401/404 map to their domain errors, other sub-500 statuses become an
/// `UpstreamFailure` with zero retries, and 5xx becomes the transient
/// `ServerError`.
pub fn classify_status(
    status: u16,
    method: &Method,
    path: &str,
    query: &[(String, String)],
) -> VedrfolnirError {
    match status {
        400 => VedrfolnirError::BadRequest,
        401 => VedrfolnirError::Unauthorized,
        404 => VedrfolnirError::NotFound {
            query: format_params(&sanitize_params(query)),
        },
        s if s < 500 => VedrfolnirError::UpstreamFailure {
            method: method.to_string(),
            path: path.to_string(),
            attempts: 0,
        },
        s => VedrfolnirError::ServerError { status: s },
    }
}

/// Drop credential-bearing parameters.
pub fn sanitize_params(params: &[(String, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(k, _)| !SENSITIVE_PARAMS.contains(&k.as_str()))
        .cloned()
        .collect()
}

fn format_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// reqwest errors embed the request URL, which carries the API key.
fn transport_error(err: reqwest::Error) -> VedrfolnirError {
    if err.is_timeout() {
        VedrfolnirError::Timeout
    } else {
        VedrfolnirError::Http(err.without_url().to_string())
    }
}

fn truncate(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

//! HTTP client configuration.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use url::Url;

use crate::request::{headers, RequestBuilder};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Enable gzip decompression.
    pub gzip: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(20),
            user_agent: format!("loco-sync/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
        }
    }
}

/// Build a configured HTTP client.
pub fn build_client(config: &HttpConfig, defaults: &RequestBuilder) -> Result<Client, HttpError> {
    let mut builder = ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .default_headers(defaults.headers().clone());

    if config.gzip {
        builder = builder.gzip(true);
    }

    builder.build().map_err(HttpError::ClientBuild)
}

/// HTTP errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    #[error("server error: {status} from {url}")]
    ServerError { status: u16, url: String, body: String },

    #[error("client error: {status} from {url}: {body}")]
    ClientError { status: u16, url: String, body: String },
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Request(e)
        }
    }
}

/// Authenticated client for one API base URL.
///
/// Every request is attempted exactly once; non-2xx responses become errors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    defaults: RequestBuilder,
}

impl HttpClient {
    /// Create a new HTTP client with custom config and default headers.
    pub fn with_config(config: HttpConfig, defaults: RequestBuilder) -> Result<Self, HttpError> {
        let inner = build_client(&config, &defaults)?;
        Ok(Self { inner, defaults })
    }

    /// Endpoint URL below the configured base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, HttpError> {
        self.defaults.endpoint(segments)
    }

    /// Make a GET request with query parameters.
    pub async fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<reqwest::Response, HttpError> {
        tracing::debug!(url = %url, "GET");
        let response = self
            .inner
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(HttpError::from)?;
        tracing::debug!(status = %response.status(), url = %url, "GET response");
        Self::check_response(response).await
    }

    /// Make a POST request with a raw text body.
    pub async fn post_text(&self, url: Url, body: String) -> Result<reqwest::Response, HttpError> {
        tracing::debug!(url = %url, "POST");
        let response = self
            .inner
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, headers::CONTENT_TYPE_TEXT)
            .body(body)
            .send()
            .await
            .map_err(HttpError::from)?;
        tracing::debug!(status = %response.status(), url = %url, "POST response");
        Self::check_response(response).await
    }

    /// Make a PATCH request with JSON body.
    pub async fn patch_json<T: Serialize>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<reqwest::Response, HttpError> {
        tracing::debug!(url = %url, "PATCH");
        let response = self
            .inner
            .patch(url.clone())
            .json(body)
            .send()
            .await
            .map_err(HttpError::from)?;
        tracing::debug!(status = %response.status(), url = %url, "PATCH response");
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(HttpError::RateLimited { retry_after });
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            Err(HttpError::ServerError {
                status: status.as_u16(),
                url,
                body,
            })
        } else {
            Err(HttpError::ClientError {
                status: status.as_u16(),
                url,
                body,
            })
        }
    }
}

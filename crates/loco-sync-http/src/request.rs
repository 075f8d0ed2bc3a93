//! HTTP request types and builders.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

use crate::client::HttpError;

/// Common HTTP headers.
pub mod headers {
    pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
    /// Authorization scheme used by the Loco API.
    pub const LOCO_AUTH_SCHEME: &str = "Loco";
}

/// Default headers and base URL shared by every request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    headers: HeaderMap,
    base_url: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
            base_url: None,
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add Loco API key authorization (`Authorization: Loco <key>`).
    pub fn loco_auth(mut self, key: impl AsRef<str>) -> Self {
        let value = format!("{} {}", headers::LOCO_AUTH_SCHEME, key.as_ref());
        if let Ok(mut value) = HeaderValue::try_from(value) {
            value.set_sensitive(true);
            self.headers.insert(AUTHORIZATION, value);
        }
        self
    }

    /// Get the built headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// Each segment is percent-encoded, so asset ids containing `/`, spaces or
    /// `%` stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, HttpError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| HttpError::InvalidUrl("no base URL configured".to_string()))?;
        let mut url = Url::parse(base).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidUrl(format!("{base}: cannot be a base")))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

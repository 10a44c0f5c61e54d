//! Transport.
//!
//! One `reqwest` client bound to the service's base address, speaking JSON by default.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};

use crate::errors::ClientError;

/// HTTP client configured with a base address and JSON content type.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // Validate once up front so request building only fails on bad paths
        Url::parse(base_url)
            .map_err(|e| ClientError::Configuration(format!("Invalid base URL {}: {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        // Form and multipart bodies set their own content type, which takes precedence
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a service path against the base address, keeping any base path prefix.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| ClientError::Configuration(format!("Invalid URL {}: {}", joined, e)))
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.url(path)?))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        self.request(Method::DELETE, path)
    }
}

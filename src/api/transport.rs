// src/api/transport.rs
//! The HTTP boundary of the client.
//!
//! [`Transport`] turns a [`WireRequest`] into a [`WireResponse`] and knows
//! nothing about Notion semantics beyond authentication headers. Status
//! codes are returned, not interpreted; mapping them to errors is the
//! client's job.

use super::endpoint::Method;
use crate::config::ClientConfig;
use crate::constants::API_VERSION_HEADER;
use crate::error::{AppError, Result};
use reqwest::blocking::Client;
use reqwest::header;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A request ready to be sent: path relative to the base URL, query pairs
/// and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl WireRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// What came back, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the Notion API.
pub trait Transport: Send + Sync {
    fn send(&self, request: &WireRequest) -> Result<WireResponse>;
}

/// Blocking reqwest transport with auth headers, a per-request timeout and
/// a fixed number of retries for connection failures.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    retries: u32,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, token: &str) -> Result<Self> {
        let base_url = config.validate()?;
        let client = Client::builder()
            .default_headers(Self::create_headers(token, &config.api_version)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url,
            retries: config.retries,
        })
    }

    fn create_headers(token: &str, api_version: &str) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header)
                .map_err(|e| AppError::Config(format!("Invalid API token format: {}", e)))?,
        );

        headers.insert(
            API_VERSION_HEADER,
            header::HeaderValue::from_str(api_version)
                .map_err(|e| AppError::Config(format!("Invalid API version: {}", e)))?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn build(&self, request: &WireRequest) -> Result<reqwest::blocking::RequestBuilder> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|e| AppError::Config(format!("Invalid endpoint '{}': {}", request.path, e)))?;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        let mut attempt = 0;
        loop {
            log::debug!("{} {}", request.method, request.path);
            match self.build(request)?.send() {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let headers = response
                        .headers()
                        .iter()
                        .map(|(name, value)| {
                            (
                                name.as_str().to_string(),
                                String::from_utf8_lossy(value.as_bytes()).into_owned(),
                            )
                        })
                        .collect();
                    let body = response.text()?;
                    log::debug!("{} {} -> {}", request.method, request.path, status);
                    return Ok(WireResponse {
                        status,
                        headers,
                        body,
                    });
                }
                Err(e) if attempt < self.retries && (e.is_timeout() || e.is_connect()) => {
                    attempt += 1;
                    log::warn!(
                        "{} {} failed ({}), retry {}/{}",
                        request.method,
                        request.path,
                        e,
                        attempt,
                        self.retries
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

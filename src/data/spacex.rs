//! SpaceX v4 REST API client
//!
//! This module issues read-only requests to the upstream API and decodes the
//! JSON bodies into raw key/value records. Type normalization into the record
//! models happens one layer up, in the repository.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use super::RawRecord;

/// Base URL for the SpaceX v4 API
const SPACEX_BASE_URL: &str = "https://api.spacexdata.com/v4";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Descriptive client identifier sent with every request
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching from the upstream API
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection error, timeout, bad body)
    #[error("request to '{path}' failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status
    #[error("'{path}' returned HTTP {status}")]
    Status { path: String, status: StatusCode },

    /// The body decoded but did not have the expected JSON shape
    #[error("unexpected response from '{path}': expected {expected}")]
    UnexpectedShape { path: String, expected: &'static str },
}

/// Client for the SpaceX v4 REST API
///
/// Exposes one "list all" and one "get by id" operation per resource
/// collection. Each call performs a single outbound request with a bounded
/// timeout and never returns partial data to mask a failure.
#[derive(Debug, Clone)]
pub struct SpaceXClient {
    client: Client,
    base_url: String,
}

impl Default for SpaceXClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceXClient {
    /// Create a new client against the production API
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: SPACEX_BASE_URL.to_string(),
        }
    }

    /// Create a new client against a custom base URL
    ///
    /// Useful for testing against a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch all launches as raw records
    pub async fn launches(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.get_collection("launches").await
    }

    /// Fetch a single launch by its upstream id
    pub async fn launch(&self, id: &str) -> Result<RawRecord, FetchError> {
        self.get_record(&format!("launches/{id}")).await
    }

    /// Fetch all rockets as raw records
    pub async fn rockets(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.get_collection("rockets").await
    }

    /// Fetch a single rocket by its upstream id
    pub async fn rocket(&self, id: &str) -> Result<RawRecord, FetchError> {
        self.get_record(&format!("rockets/{id}")).await
    }

    /// Fetch all launchpads as raw records
    pub async fn launchpads(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.get_collection("launchpads").await
    }

    /// Fetch a single launchpad by its upstream id
    pub async fn launchpad(&self, id: &str) -> Result<RawRecord, FetchError> {
        self.get_record(&format!("launchpads/{id}")).await
    }

    /// Perform one GET against `base_url/path` and decode the body as JSON
    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header(header::USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status,
            });
        }

        response.json().await.map_err(|source| FetchError::Request {
            path: path.to_string(),
            source,
        })
    }

    /// Fetch a path expected to return a JSON array of objects
    async fn get_collection(&self, path: &str) -> Result<Vec<RawRecord>, FetchError> {
        match self.get_json(path).await? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record),
                    _ => Err(FetchError::UnexpectedShape {
                        path: path.to_string(),
                        expected: "an array of objects",
                    }),
                })
                .collect(),
            _ => Err(FetchError::UnexpectedShape {
                path: path.to_string(),
                expected: "an array of objects",
            }),
        }
    }

    /// Fetch a path expected to return a single JSON object
    async fn get_record(&self, path: &str) -> Result<RawRecord, FetchError> {
        match self.get_json(path).await? {
            Value::Object(record) => Ok(record),
            _ => Err(FetchError::UnexpectedShape {
                path: path.to_string(),
                expected: "a single object",
            }),
        }
    }
}

//! services/client/src/adapters/http.rs
//!
//! The shared HTTP plumbing behind every planner service adapter: one
//! `reqwest::Client`, the service base URL and the mapping from transport and
//! status failures onto `PortError`.

use crate::adapters::protocol::ErrorResponse;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use travel_planner_core::ports::{PortError, PortResult};

/// A cheap-to-clone handle on the planner service.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ServiceClient {
    /// Creates a client for the service at `base_url`; every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PortResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `body` as JSON and returns the response once its status is a success.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> PortResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = service_error(response).await;
        warn!("POST {} failed: {}", url, error);
        Err(error)
    }

    /// Reads the whole body and decodes it as JSON.
    pub async fn read_json<T: DeserializeOwned>(&self, response: Response) -> PortResult<T> {
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(|e| PortError::Malformed(e.to_string()))
    }

    /// Reads the whole body as raw bytes.
    pub async fn read_bytes(&self, response: Response) -> PortResult<bytes::Bytes> {
        response.bytes().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout(self.timeout)
        } else if error.is_decode() {
            PortError::Malformed(error.to_string())
        } else {
            PortError::Network(error.to_string())
        }
    }
}

/// Turns a non-success response into `PortError::Service`, preferring the `detail` field.
async fn service_error(response: Response) -> PortError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => body.message(),
        Err(_) if !text.trim().is_empty() => text.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    PortError::Service {
        status: status.as_u16(),
        message,
    }
}

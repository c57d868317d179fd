//! Shared HTTP plumbing for the upstream services
//!
//! One pooled client carries the identification headers; every call sets its
//! own timeout and gets a single attempt.

use crate::config::HttpConfig;
use crate::error::UpstreamError;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Cloneable handle on the pooled client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build the client with the configured user agent and optional referer
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(referer) = &config.referer {
            let value = HeaderValue::from_str(referer)
                .with_context(|| format!("Invalid referer header value: {referer}"))?;
            headers.insert(REFERER, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    /// Send once with `timeout` and decode a JSON body from a 2xx response
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        request: RequestBuilder,
        timeout: Duration,
    ) -> std::result::Result<T, UpstreamError> {
        let start = Instant::now();
        let response = send(service, request.timeout(timeout)).await?;

        let body = response
            .json::<T>()
            .await
            .map_err(|source| UpstreamError::Decode { service, source })?;

        debug!(
            "{} answered in {:.3}s",
            service,
            start.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

async fn send(
    service: &'static str,
    request: RequestBuilder,
) -> std::result::Result<Response, UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(|source| UpstreamError::Network { service, source })?;

    let status = response.status();
    if !status.is_success() {
        warn!("{} responded with HTTP {}", service, status);
        return Err(UpstreamError::Status { service, status });
    }
    Ok(response)
}

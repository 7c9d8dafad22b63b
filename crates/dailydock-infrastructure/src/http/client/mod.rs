mod types;

pub use types::{TransportError, USER_AGENT};

use anyhow::{Context, Result};
use log::{debug, error};
use reqwest::{header, Client, RequestBuilder};
use std::time::Duration;

use types::{preview, JSON_CONTENT_TYPE};

/// Thin reqwest wrapper for the account endpoints.
///
/// A non-2xx status is not an error here: it yields `Ok(None)` so the retry
/// layer never sees it. Only transport failures come back as `Err`.
pub struct HttpClient {
    client: Client,
    debug_bodies: bool,
}

impl HttpClient {
    /// `default_headers` are attached to every request (origin, referer, ...)
    pub fn new(timeout: Duration, mut default_headers: header::HeaderMap) -> Result<Self> {
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(JSON_CONTENT_TYPE),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            debug_bodies: false,
        })
    }

    /// Log response bodies of failed requests at debug level
    pub fn with_debug_bodies(mut self, enabled: bool) -> Self {
        self.debug_bodies = enabled;
        self
    }

    pub async fn get(
        &self,
        url: &str,
        cookie: &header::HeaderValue,
    ) -> Result<Option<String>, TransportError> {
        debug!("Request: GET {}", url);
        let request = self.client.get(url).header(header::COOKIE, cookie.clone());
        self.send(request).await
    }

    pub async fn post_json(
        &self,
        url: &str,
        cookie: &header::HeaderValue,
        body: &serde_json::Value,
    ) -> Result<Option<String>, TransportError> {
        debug!("Request: POST {}", url);
        let request = self
            .client
            .post(url)
            .header(header::COOKIE, cookie.clone())
            .json(body);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Option<String>, TransportError> {
        let response = request.send().await.map_err(|e| {
            let err = TransportError::from(e);
            match &err {
                TransportError::Timeout(_) => error!("⏱️ Request timed out"),
                other => error!("💥 Request error: {}", other),
            }
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ HTTP error: {}", status);
            if self.debug_bodies {
                let body = response.text().await.unwrap_or_default();
                debug!("Response: {}", preview(&body, 200));
            }
            return Ok(None);
        }

        let text = response.text().await?;
        debug!("Response status: {} ({} bytes)", status, text.len());
        Ok(Some(text))
    }
}

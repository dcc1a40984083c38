//! `reqwest`-backed transport.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use super::{HttpResponse, HttpTransport, TransportError};

/// Production transport on a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout_secs`.
    ///
    /// This is a backstop for stuck connections; the feed client applies
    /// its own tighter deadline on top.
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self { http })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            Ok(HttpResponse::new(status, body.to_vec()))
        })
    }
}

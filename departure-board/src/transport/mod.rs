//! Injected HTTP transport.
//!
//! The feed and catalog clients only ever issue `GET url` and look at the
//! status code and body, so the transport is reduced to exactly that. The
//! production implementation wraps `reqwest`; `MockTransport` serves canned
//! responses for tests and offline development.

mod http;
mod mock;

use std::sync::Arc;

use futures::future::BoxFuture;

pub use http::ReqwestTransport;
pub use mock::{MockResponse, MockTransport};

/// Status code and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Leading part of the body, for error messages.
    pub fn body_excerpt(&self) -> String {
        String::from_utf8_lossy(&self.body).chars().take(500).collect()
    }
}

/// Errors from the transport itself (no response was obtained).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body not read
    #[error("request failed: {0}")]
    Request(String),

    /// The transport could not be constructed
    #[error("transport setup failed: {0}")]
    Setup(String),
}

/// A function `GET(url) -> (status, body)`.
///
/// Dropping the returned future cancels the request.
pub trait HttpTransport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        (**self).get(url)
    }
}

/// Shared, type-erased transport.
pub type SharedTransport = Arc<dyn HttpTransport>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn excerpt_truncates() {
        let body = "x".repeat(2000);
        assert_eq!(HttpResponse::new(500, body).body_excerpt().len(), 500);
    }

    #[tokio::test]
    async fn arc_dyn_forwards() {
        let mock = MockTransport::new().with_route("ping", MockResponse::json(200, "pong"));
        let shared: SharedTransport = Arc::new(mock.clone());

        let response = shared.get("http://example/ping").await.unwrap();
        assert_eq!(response.body, b"pong");
        assert_eq!(mock.request_count(), 1);
    }
}

//! Mock transport for testing without network access.
//!
//! Serves canned responses keyed by a URL fragment, and can load a whole
//! set of BART responses from JSON files on disk.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use futures::future::BoxFuture;

use super::{HttpResponse, HttpTransport, TransportError};

/// What a mock route answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Complete with this status and body
    Reply(HttpResponse),
    /// Fail at the transport level
    Fail(String),
    /// Never complete
    Hang,
}

impl MockResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        MockResponse::Reply(HttpResponse::new(status, body.into()))
    }
}

/// Mock transport that serves responses from memory.
///
/// Routes are matched by substring against the request URL, in insertion
/// order. Unmatched URLs get a 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<RwLock<Vec<(String, MockResponse)>>>,
    requests: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the response for URLs containing `needle`.
    pub fn with_route(self, needle: impl Into<String>, response: MockResponse) -> Self {
        self.set_route(needle, response);
        self
    }

    /// Add or replace a route on a shared transport.
    pub fn set_route(&self, needle: impl Into<String>, response: MockResponse) {
        let needle = needle.into();
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        match routes.iter_mut().find(|(n, _)| *n == needle) {
            Some(route) => route.1 = response,
            None => routes.push((needle, response)),
        }
    }

    /// Load BART responses from a directory.
    ///
    /// Expects `stations.json` for the catalog and `etd_{ID}.json` for each
    /// station's departures (e.g. `etd_POWL.json`).
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let data_dir = data_dir.as_ref();
        let transport = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            TransportError::Setup(format!("failed to read mock data directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                TransportError::Setup(format!("failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let needle = if stem == "stations" {
                "cmd=stns".to_string()
            } else if let Some(id) = stem.strip_prefix("etd_") {
                format!("orig={}&", id)
            } else {
                continue;
            };

            let body = std::fs::read_to_string(&path)
                .map_err(|e| TransportError::Setup(format!("failed to read {:?}: {}", path, e)))?;

            transport.set_route(needle, MockResponse::json(200, body));
        }

        if transport.route_count() == 0 {
            return Err(TransportError::Setup(format!(
                "no mock response files found in {:?}",
                data_dir
            )));
        }

        Ok(transport)
    }

    /// Number of configured routes.
    pub fn route_count(&self) -> usize {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of requests currently pending (started and not yet dropped).
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn lookup(&self, url: &str) -> Option<MockResponse> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, response)| response.clone())
    }
}

impl HttpTransport for MockTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let _guard = InFlight::enter(&self.in_flight);

            match self.lookup(url) {
                Some(MockResponse::Reply(response)) => Ok(response),
                Some(MockResponse::Fail(message)) => Err(TransportError::Request(message)),
                Some(MockResponse::Hang) => futures::future::pending().await,
                None => Ok(HttpResponse::new(404, format!("no mock route for {}", url))),
            }
        })
    }
}

/// Counts a request as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

//! Issues one HTTP GET and classifies the outcome.
//!
//! Grounded on `Requester` in the system this crate is modeled on: a
//! connection/DNS/TLS failure is recorded as `503`, no response before the
//! timeout is recorded as `408` with `elapsed` pinned to the timeout, and any
//! response at all is recorded under its actual status. A probe never raises
//! to its caller; it always appends exactly one result.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::models::probe_result::{STATUS_CONNECTION_FAILURE, STATUS_TIMEOUT};
use crate::models::ProbeResult;
use crate::response_store::ResponseStore;
use crate::time_utils::now_secs;

/// Issues GET requests for one site, reusing a single pooled client.
#[derive(Clone)]
pub struct Prober {
    client: Client,
    url: Arc<str>,
    timeout: Duration,
}

impl Prober {
    /// Builds a prober for `url`. Returns an error only if the underlying
    /// HTTP client fails to construct (e.g. invalid TLS config), never from
    /// anything related to the target site itself.
    pub fn new(url: impl Into<Arc<str>>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    /// Performs one probe and appends its result to `store`. Never returns
    /// an error: network failures are reclassified into the result itself.
    pub async fn probe_once(&self, store: &ResponseStore) {
        let start = now_secs();
        let result = match tokio::time::timeout(self.timeout, self.client.get(&*self.url).send()).await {
            Ok(Ok(response)) => ProbeResult::new(start, response.status().as_u16(), now_secs() - start),
            Ok(Err(_)) => ProbeResult::new(start, STATUS_CONNECTION_FAILURE, now_secs() - start),
            Err(_elapsed) => ProbeResult::new(start, STATUS_TIMEOUT, self.timeout.as_secs_f64()),
        };
        store.add(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_probe_records_status_and_elapsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let prober = Prober::new(server.uri(), Duration::from_secs(5)).unwrap();
        let store = ResponseStore::new(10);
        prober.probe_once(&store).await;

        let results = store.range(f64::MIN, f64::MAX);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, 200);
        assert!(results[0].elapsed >= 0.0 && results[0].elapsed < 1.0);
    }

    #[tokio::test]
    async fn connection_failure_is_classified_503() {
        let prober = Prober::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let store = ResponseStore::new(10);
        prober.probe_once(&store).await;

        let results = store.range(f64::MIN, f64::MAX);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, STATUS_CONNECTION_FAILURE);
    }

    #[tokio::test]
    async fn slow_response_times_out_as_408() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(100);
        let prober = Prober::new(server.uri(), timeout).unwrap();
        let store = ResponseStore::new(10);
        prober.probe_once(&store).await;

        let results = store.range(f64::MIN, f64::MAX);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, STATUS_TIMEOUT);
        assert_eq!(results[0].elapsed, timeout.as_secs_f64());
    }
}

//! In-memory [`Transport`] for exercising catalog logic without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use showlink_api::{ApiError, ApiRequest, ApiResponse, Transport};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync>;
type Delay = Box<dyn Fn(&ApiRequest) -> Duration + Send + Sync>;

/// Answers each request through a closure and records what it saw.
pub(crate) struct ScriptedTransport {
    handler: Handler,
    delay: Option<Delay>,
    seen: Mutex<Vec<ApiRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new(
        handler: impl Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            delay: None,
            seen: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every request gets the same response.
    pub(crate) fn fixed(status: u16, body: &str) -> Self {
        let response = ApiResponse::new(status, body);
        Self::new(move |_| Ok(response.clone()))
    }

    /// Sleep before answering, per request.
    pub(crate) fn with_delay(
        mut self,
        delay: impl Fn(&ApiRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(&request)).await;
        }

        let result = (self.handler)(&request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Body of a search response listing `ids` in order.
pub(crate) fn search_body(ids: &[u64]) -> String {
    let results: Vec<_> = ids.iter().map(|id| serde_json::json!({ "id": id })).collect();
    serde_json::json!({ "page": 1, "results": results }).to_string()
}

//! Request timing.
//!
//! Durations are emitted as tracing events rather than collected metrics.

use std::time::Instant;

/// Times one HTTP request and logs its outcome.
///
/// Usage:
/// ```ignore
/// let timer = RequestTimer::new("GET", "/customer-group");
/// let response = request.send().await;
/// timer.finish(response.as_ref().ok().map(|r| r.status().as_u16()));
/// ```
#[derive(Debug)]
pub struct RequestTimer {
    method: &'static str,
    path: String,
    start: Instant,
}

impl RequestTimer {
    pub fn new(method: &'static str, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            start: Instant::now(),
        }
    }

    /// Logs the elapsed time. `status` is `None` when no response arrived.
    pub fn finish(self, status: Option<u16>) -> f64 {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        match status {
            Some(status) if status < 400 => tracing::debug!(
                method = self.method,
                path = %self.path,
                status,
                elapsed_ms,
                "Request completed"
            ),
            Some(status) => tracing::warn!(
                method = self.method,
                path = %self.path,
                status,
                elapsed_ms,
                "Request rejected"
            ),
            None => tracing::warn!(
                method = self.method,
                path = %self.path,
                elapsed_ms,
                "Request failed without response"
            ),
        }
        elapsed_ms
    }
}

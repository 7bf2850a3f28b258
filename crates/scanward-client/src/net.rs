//! Small HTTP plumbing shared by the auth and scan clients.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::ScanError;

pub(crate) const USER_AGENT: &str = "scanward";

/// Normalizes a service address into a base URL with no trailing slash.
/// A bare `host[:port]` gets the `https` scheme the scanning service speaks;
/// an explicit scheme is honored as given.
pub fn service_url(address: &str) -> String {
    let trimmed = address.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Strict `Retry-After` parse. The service always sends a whole number of
/// seconds, so a missing or malformed value is a protocol violation rather
/// than something to paper over with a default wait.
pub fn parse_retry_after(headers: &HeaderMap) -> Result<Duration, ScanError> {
    let value = headers
        .get(RETRY_AFTER)
        .ok_or(ScanError::MissingRetryAfter)?;
    let value = value
        .to_str()
        .map_err(|_| ScanError::InvalidRetryAfter(format!("{value:?}")))?;
    let seconds: u64 = value
        .parse()
        .map_err(|_| ScanError::InvalidRetryAfter(value.to_string()))?;
    Ok(Duration::from_secs(seconds))
}

/// Wall-clock deadline for the polling loop.
#[derive(Debug, Clone)]
pub struct WaitBudget {
    deadline: Instant,
}

impl WaitBudget {
    pub fn new(total: Duration) -> Self {
        Self {
            deadline: Instant::now() + total,
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.checked_duration_since(Instant::now())
    }

    /// Whether the budget can still cover a wait of `duration`.
    pub fn covers(&self, duration: Duration) -> bool {
        self.remaining().is_some_and(|remaining| remaining >= duration)
    }
}

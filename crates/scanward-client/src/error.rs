use thiserror::Error;

/// Everything that can abort a scan run. Nothing here is retried or
/// recovered internally; each error short-circuits straight to the caller.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Structured OAuth failure from the token endpoint.
    #[error("{error}: {description}")]
    Auth { error: String, description: String },

    #[error("unexpected response from scanning server (status: {status})")]
    Protocol { status: u16 },

    /// The server said `pending` but gave no wait hint.
    #[error("missing Retry-After header")]
    MissingRetryAfter,

    /// `Retry-After` must be a non-negative integer number of seconds.
    #[error("invalid Retry-After header: {0:?}")]
    InvalidRetryAfter(String),

    /// A pending response must name the task to poll.
    #[error("missing Location header")]
    MissingLocation,

    /// A complete response must name its verdict.
    #[error("complete scan response missing scan_result")]
    MissingVerdict,

    #[error("unknown scan status {0:?}")]
    UnknownStatus(String),

    /// The configured polling budget cannot cover the next server-requested
    /// wait.
    #[error("scan did not complete within the polling budget")]
    PollBudgetExceeded,
}

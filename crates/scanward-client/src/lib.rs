//! Client for a remote file-scanning service: OAuth2 client-credentials
//! authentication, multipart file submission, and polling of pending scan
//! tasks until a terminal result is available.

// Re-export public API
pub mod auth;
pub mod error;
pub mod flow;
pub mod model;
pub mod net;
pub mod scan;

pub use auth::{
    AccessToken, AuthClient, Credentials, Scope, LOCALLY_MANAGED_AUDIENCE,
    POLICY_MANAGER_AUDIENCE,
};
pub use error::ScanError;
pub use flow::{scan_to_completion, PollPolicy, RecordingSleeper, Sleeper, TokioSleeper};
pub use model::{
    ContentMetadata, Detection, PollReference, ScanMetadata, ScanOutcome, ScanReport,
    ScanSettings, ScanWarnings, SecurityCloudSettings,
};
pub use scan::ScanClient;

//! Wire shapes and the classified scan outcome.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// A single finding reported within a scan result. `member_name` points at
/// the archive member the detection was found in, when applicable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Detection {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub member_name: Option<String>,
}

/// Flags the scanner raises when a file could not be fully analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanWarnings {
    pub corrupted: bool,
    pub encrypted: bool,
    pub max_nested: bool,
    pub max_results: bool,
    pub max_scan_time: bool,
    pub need_content: bool,
}

impl ScanWarnings {
    /// True if any warning was set.
    pub fn any(&self) -> bool {
        self.corrupted
            || self.encrypted
            || self.max_nested
            || self.max_results
            || self.max_scan_time
            || self.need_content
    }
}

/// Per-submission scan options. All fields are optional; the default value
/// serializes to the empty JSON object the service expects when no options
/// are given.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_settings: Option<ScanSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_meta: Option<ContentMetadata>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_archives: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nested: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scan_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_on_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_upstream_metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antispam: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_embedded_urls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbidden_uri_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_cloud: Option<SecurityCloudSettings>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityCloudSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_upstream_application_files: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_upstream_data_files: Option<bool>,
}

/// Out-of-band description of the submitted content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<String>>,
}

/// Raw body of a scan or poll response, before classification.
#[derive(Debug, Deserialize)]
pub(crate) struct ScanResponseBody {
    pub status: String,
    #[serde(default)]
    pub scan_result: Option<String>,
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub uri_categories: Option<Vec<String>>,
    #[serde(default)]
    pub warnings: ScanWarnings,
}

/// A finished scan: the verdict plus everything the scanner found.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub verdict: String,
    pub detections: Vec<Detection>,
    pub uri_categories: Option<Vec<String>>,
    pub warnings: ScanWarnings,
}

/// Where and how long to wait before asking about a pending task again.
/// Valid only for the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReference {
    /// Service-relative task path from the `Location` header.
    pub path: String,
    /// Server-dictated wait from the `Retry-After` header.
    pub wait: Duration,
}

/// Classified scan response. The status strings the service sends become a
/// closed variant so the driving loop matches exhaustively instead of
/// falling through a string comparison.
#[derive(Debug)]
pub enum ScanOutcome {
    Complete(ScanReport),
    Pending(PollReference),
    Unknown(String),
}

impl ScanOutcome {
    pub(crate) fn classify(
        body: ScanResponseBody,
        poll: Option<PollReference>,
    ) -> Result<Self, ScanError> {
        match body.status.as_str() {
            "complete" => {
                let verdict = body.scan_result.ok_or(ScanError::MissingVerdict)?;
                Ok(ScanOutcome::Complete(ScanReport {
                    verdict,
                    detections: body.detections,
                    uri_categories: body.uri_categories,
                    warnings: body.warnings,
                }))
            }
            "pending" => Ok(ScanOutcome::Pending(poll.ok_or(ScanError::MissingLocation)?)),
            other => Ok(ScanOutcome::Unknown(other.to_string())),
        }
    }
}

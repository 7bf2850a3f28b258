//! Scan submission and task polling against the scanning service.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::error::ScanError;
use crate::model::{PollReference, ScanMetadata, ScanOutcome, ScanResponseBody};
use crate::net::{parse_retry_after, service_url, USER_AGENT};

/// Client for the scanning service. The address and bearer token are fixed
/// at construction; every request/response pair is independent, so the
/// client holds no other state.
pub struct ScanClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ScanClient {
    pub fn new(address: &str, token: impl Into<String>) -> Result<Self, ScanError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: service_url(address),
            token: token.into(),
        })
    }

    /// Submits the file at `path` for scanning. The file is read fully up
    /// front and the handle released before the request goes out; there is
    /// no streaming upload.
    ///
    /// A 200 answer is classified directly. A 202 answer must carry
    /// `Location` and `Retry-After` headers naming the task to poll; any
    /// other status fails the run.
    pub async fn submit(
        &self,
        path: &Path,
        metadata: &ScanMetadata,
    ) -> Result<ScanOutcome, ScanError> {
        let data = tokio::fs::read(path).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "submitting file for scanning");

        let form = Form::new()
            .part(
                "metadata",
                Part::text(serde_json::to_string(metadata)?).mime_str("application/json")?,
            )
            .part(
                "data",
                Part::bytes(data).mime_str("application/octet-stream")?,
            );

        let response = self
            .http
            .post(format!("{}/api/scan/v1", self.base_url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let poll = if status == StatusCode::ACCEPTED {
            let task_path = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
                .ok_or(ScanError::MissingLocation)?;
            let wait = parse_retry_after(response.headers())?;
            Some(PollReference {
                path: task_path,
                wait,
            })
        } else if status == StatusCode::OK {
            None
        } else {
            return Err(ScanError::Protocol {
                status: status.as_u16(),
            });
        };

        let body: ScanResponseBody = serde_json::from_str(&response.text().await?)?;
        ScanOutcome::classify(body, poll)
    }

    /// Checks on a pending task. A pending answer must carry a fresh
    /// `Retry-After`; the task path itself never changes across polls.
    pub async fn poll(&self, task: &PollReference) -> Result<ScanOutcome, ScanError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, task.path))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScanError::Protocol {
                status: status.as_u16(),
            });
        }

        // Retry-After is only required while the task is still pending, so
        // look at the body status before insisting on the header.
        let headers = response.headers().clone();
        let body: ScanResponseBody = serde_json::from_str(&response.text().await?)?;

        let poll = if body.status == "pending" {
            Some(PollReference {
                path: task.path.clone(),
                wait: parse_retry_after(&headers)?,
            })
        } else {
            None
        };
        ScanOutcome::classify(body, poll)
    }
}

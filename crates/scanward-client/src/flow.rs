//! The driving state machine: submit once, then poll at the server's pace
//! until the scan reaches a terminal state.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScanError;
use crate::model::{ScanMetadata, ScanOutcome, ScanReport};
use crate::net::WaitBudget;
use crate::scan::ScanClient;

/// Seam for the inter-poll wait, so tests observe the requested delays
/// instead of actually waiting them out.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Test double that records each requested wait and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Bounds the polling loop. The default (`None`) waits as long as the
/// server keeps answering `pending`.
#[derive(Debug, Clone, Default)]
pub struct PollPolicy {
    pub max_total_wait: Option<Duration>,
}

/// Runs a submission to completion. Each pending answer is slept out for
/// exactly the server-dictated duration, then the task is polled again;
/// iterations carry no state beyond the poll reference itself. Any error
/// or unrecognized status ends the run immediately.
pub async fn scan_to_completion(
    client: &ScanClient,
    path: &Path,
    metadata: &ScanMetadata,
    policy: &PollPolicy,
    sleeper: &dyn Sleeper,
) -> Result<ScanReport, ScanError> {
    let budget = policy.max_total_wait.map(WaitBudget::new);

    let mut outcome = client.submit(path, metadata).await?;
    loop {
        match outcome {
            ScanOutcome::Complete(report) => return Ok(report),
            ScanOutcome::Pending(task) => {
                if let Some(budget) = &budget {
                    // Fail fast rather than start a wait the budget cannot
                    // cover.
                    if !budget.covers(task.wait) {
                        return Err(ScanError::PollBudgetExceeded);
                    }
                }
                tracing::info!(
                    "scan pending, checking again in {} seconds",
                    task.wait.as_secs()
                );
                sleeper.sleep(task.wait).await;
                outcome = client.poll(&task).await?;
            }
            ScanOutcome::Unknown(status) => return Err(ScanError::UnknownStatus(status)),
        }
    }
}

use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::api::models::{Run, RunStatus};
use crate::api::LlmService;
use crate::error::{ConvoError, Result};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Classification of a run's status for the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    /// Queued or in progress: poll again.
    Pending,
    /// Completed, or any other service-defined settled status. The caller
    /// reads the thread for the outcome; this carries no value.
    Completed,
    /// Failed, with the service-provided error message.
    Failed(String),
}

impl RunPhase {
    pub fn of(run: &Run) -> Self {
        match run.status {
            RunStatus::Queued | RunStatus::InProgress => RunPhase::Pending,
            RunStatus::Failed => RunPhase::Failed(
                run.last_error
                    .as_ref()
                    .and_then(|e| e.message.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            _ => RunPhase::Completed,
        }
    }
}

/// Drives a run to a terminal state by strictly sequential re-retrieval.
///
/// Without a configured timeout, polling continues until the run settles or
/// the underlying service call itself errors (which propagates unchanged).
/// With one, exceeding the deadline surfaces as `PollTimeout`, never as a
/// run failure.
#[derive(Debug, Clone)]
pub struct RunPoller {
    interval: Duration,
    timeout: Option<Duration>,
}

impl Default for RunPoller {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

impl RunPoller {
    pub fn new(interval: Duration, timeout: Option<Duration>) -> Self {
        Self { interval, timeout }
    }

    /// Submit a run and poll it to a terminal state.
    pub async fn drive(
        &self,
        service: &dyn LlmService,
        thread_id: &str,
        assistant_id: &str,
        instructions: Option<&str>,
    ) -> Result<()> {
        let mut run = service
            .create_run(thread_id, assistant_id, instructions)
            .await?;
        let started = Instant::now();

        loop {
            match RunPhase::of(&run) {
                RunPhase::Completed => return Ok(()),
                RunPhase::Failed(message) => return Err(ConvoError::RunFailed(message)),
                RunPhase::Pending => {
                    if let Some(timeout) = self.timeout {
                        if started.elapsed() >= timeout {
                            return Err(ConvoError::PollTimeout);
                        }
                    }
                    sleep(self.interval).await;
                    run = service.retrieve_run(thread_id, &run.id).await?;
                }
            }
        }
    }
}

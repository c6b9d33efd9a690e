//! Workflow runner with channel-based submission.
//!
//! The `WorkflowRunner` owns an mpsc channel of instructions and runs them
//! through the orchestrator strictly one after another, so at most one task
//! is ever in flight.

use std::sync::Arc;

use agentflow_workflow::{Task, TaskStatus};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::OrchestratorError;
use crate::events::SnapshotNotifier;
use crate::orchestrator::WorkflowOrchestrator;

/// Runs submitted instructions in order and reports every snapshot to a
/// single notifier.
///
/// # Usage
///
/// ```ignore
/// let runner = WorkflowRunner::new(orchestrator, notifier);
///
/// // Hand out senders to whatever collects instructions
/// let sender = runner.sender();
///
/// // Run until cancelled or every sender is dropped
/// let cancel = CancellationToken::new();
/// runner.start(cancel).await?;
/// ```
pub struct WorkflowRunner<N: SnapshotNotifier> {
  sender: mpsc::Sender<String>,
  receiver: mpsc::Receiver<String>,
  orchestrator: Arc<WorkflowOrchestrator>,
  notifier: N,
}

impl<N: SnapshotNotifier> WorkflowRunner<N> {
  /// Create a runner whose channel capacity comes from the orchestrator's config.
  pub fn new(orchestrator: Arc<WorkflowOrchestrator>, notifier: N) -> Self {
    let buffer_size = orchestrator.config().runner_buffer.max(1);
    Self::with_buffer_size(orchestrator, notifier, buffer_size)
  }

  pub fn with_buffer_size(
    orchestrator: Arc<WorkflowOrchestrator>,
    notifier: N,
    buffer_size: usize,
  ) -> Self {
    let (sender, receiver) = mpsc::channel(buffer_size);
    Self {
      sender,
      receiver,
      orchestrator,
      notifier,
    }
  }

  /// A sender handle for submitting instructions.
  pub fn sender(&self) -> mpsc::Sender<String> {
    self.sender.clone()
  }

  /// Queue an instruction for execution.
  pub async fn submit(&self, text: impl Into<String>) -> Result<(), OrchestratorError> {
    self
      .sender
      .send(text.into())
      .await
      .map_err(|_| OrchestratorError::RunnerClosed)
  }

  /// Run queued instructions until cancelled or the channel closes.
  ///
  /// The runner's own sender is dropped on entry, so the loop ends once
  /// every handle from [`sender`](Self::sender) is gone.
  pub async fn start(self, cancel: CancellationToken) -> Result<(), OrchestratorError> {
    let Self {
      sender,
      mut receiver,
      orchestrator,
      notifier,
    } = self;
    drop(sender);

    info!("runner_started");

    loop {
      tokio::select! {
        _ = cancel.cancelled() => {
          info!("runner_cancelled");
          break;
        }
        text = receiver.recv() => {
          let Some(text) = text else {
            info!("runner_closed");
            break;
          };

          // Each run gets its own token so cancelling the runner also
          // cancels the task in flight
          let run_cancel = cancel.child_token();
          match orchestrator.run(&text, &notifier, run_cancel).await {
            Ok(task) => log_outcome(&task),
            Err(e) => {
              error!(error = %e, "runner_aborted");
              return Err(e);
            }
          }
        }
      }
    }

    Ok(())
  }

  /// Run a single instruction directly, bypassing the queue.
  pub async fn execute_once(
    &self,
    text: &str,
    cancel: CancellationToken,
  ) -> Result<Task, OrchestratorError> {
    self.orchestrator.run(text, &self.notifier, cancel).await
  }

  pub fn orchestrator(&self) -> &WorkflowOrchestrator {
    &self.orchestrator
  }
}

fn log_outcome(task: &Task) {
  match task.status {
    TaskStatus::Success => info!(
      task_id = %task.task_id,
      logs = task.logs.len(),
      "run_completed"
    ),
    _ => info!(
      task_id = %task.task_id,
      status = ?task.status,
      "run_unsuccessful"
    ),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use agentflow_config::{OrchestratorConfig, StepDelays};
  use agentflow_workflow::TaskSnapshot;

  use super::*;
  use crate::events::NoopNotifier;

  fn fast_orchestrator() -> Arc<WorkflowOrchestrator> {
    let config = OrchestratorConfig {
      step_delays: StepDelays::uniform(1),
      ..OrchestratorConfig::default()
    };
    Arc::new(WorkflowOrchestrator::new(config))
  }

  #[tokio::test]
  async fn test_sender_cloning() {
    let runner = WorkflowRunner::new(fast_orchestrator(), NoopNotifier);

    let sender1 = runner.sender();
    let sender2 = runner.sender();

    assert!(!sender1.is_closed());
    assert!(!sender2.is_closed());
  }

  #[tokio::test]
  async fn test_submit_sends_to_channel() {
    let mut runner = WorkflowRunner::new(fast_orchestrator(), NoopNotifier);

    runner.submit("天气").await.unwrap();

    assert_eq!(runner.receiver.recv().await.as_deref(), Some("天气"));
  }

  #[tokio::test(start_paused = true)]
  async fn test_runs_submissions_in_order() {
    let finished = Arc::new(Mutex::new(Vec::new()));
    let seen = finished.clone();
    let notifier = move |s: TaskSnapshot| {
      if s.status == Some(TaskStatus::Success) {
        let summary = s.result.map(|r| r.summary).unwrap_or_default();
        seen.lock().unwrap().push(summary);
      }
    };
    let runner = WorkflowRunner::new(fast_orchestrator(), notifier);

    runner.submit("天气").await.unwrap();
    runner.submit("新闻").await.unwrap();
    // Dropping the last external sender lets `start` drain and return
    runner.start(CancellationToken::new()).await.unwrap();

    let finished = finished.lock().unwrap();
    assert_eq!(finished.len(), 2);
    assert!(finished[0].contains("北京"));
    assert!(finished[1].contains("AI"));
  }

  #[tokio::test(start_paused = true)]
  async fn test_cancellation() {
    let runner = WorkflowRunner::new(fast_orchestrator(), NoopNotifier);
    let _sender = runner.sender();

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    let handle = tokio::spawn(async move { runner.start(cancel_clone).await });

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    cancel.cancel();

    let result = handle.await.unwrap();
    assert!(result.is_ok());
  }

  #[tokio::test(start_paused = true)]
  async fn test_execute_once() {
    let runner = WorkflowRunner::new(fast_orchestrator(), NoopNotifier);

    let task = runner
      .execute_once("随便聊聊", CancellationToken::new())
      .await
      .unwrap();

    assert_eq!(task.status, TaskStatus::Success);
  }
}

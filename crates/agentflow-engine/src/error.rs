//! Orchestrator errors.

use agentflow_classifier::Category;
use agentflow_tools::ToolError;
use agentflow_workflow::FailureKind;

/// Errors that can occur while running a task.
///
/// Task-level errors end the task in `failed` and are reported through the
/// emitted snapshots; [`WorkflowOrchestrator::run`](crate::WorkflowOrchestrator::run)
/// still returns `Ok`. Fatal errors are contract violations and are returned
/// as `Err`.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
  /// The instruction could not be mapped to a single category.
  #[error("classification ambiguous: {message}")]
  ClassificationAmbiguous { message: String },

  /// A tool reported an error.
  #[error("tool '{tool_name}' invocation failed")]
  ToolInvocationFailed {
    tool_name: String,
    #[source]
    source: ToolError,
  },

  /// A tool did not answer within the configured timeout.
  #[error("tool '{tool_name}' timed out after {timeout_ms}ms")]
  ToolTimeout { tool_name: String, timeout_ms: u64 },

  /// The run was cancelled.
  #[error("execution cancelled")]
  Cancelled,

  /// No handler is registered for a classified category.
  #[error("no tool handler registered for category '{category}'")]
  UnknownCategory { category: Category },

  /// The runner's instruction channel is closed.
  #[error("workflow runner channel closed")]
  RunnerClosed,
}

impl OrchestratorError {
  /// The failure kind recorded on the task, or `None` for fatal errors.
  pub fn failure_kind(&self) -> Option<FailureKind> {
    match self {
      Self::ClassificationAmbiguous { .. } => Some(FailureKind::ClassificationAmbiguous),
      Self::ToolInvocationFailed { .. } | Self::ToolTimeout { .. } => {
        Some(FailureKind::ToolInvocationFailed)
      }
      Self::Cancelled => Some(FailureKind::CancellationRequested),
      Self::UnknownCategory { .. } | Self::RunnerClosed => None,
    }
  }

  pub fn is_fatal(&self) -> bool {
    self.failure_kind().is_none()
  }

  /// Message recorded on the task: the error and its source, if any.
  pub(crate) fn detail(&self) -> String {
    match self {
      Self::ToolInvocationFailed { source, .. } => format!("{}: {}", self, source),
      _ => self.to_string(),
    }
  }
}

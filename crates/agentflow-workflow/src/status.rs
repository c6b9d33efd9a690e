use serde::{Deserialize, Serialize};

/// Status of a whole task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  #[default]
  Idle,
  Running,
  Success,
  Failed,
}

impl TaskStatus {
  /// `success` and `failed` are terminal; nothing is emitted after them.
  pub fn is_terminal(self) -> bool {
    matches!(self, TaskStatus::Success | TaskStatus::Failed)
  }
}

/// Status of a single pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
  #[default]
  Pending,
  Running,
  Success,
  Failed,
}

/// Outcome of a logged tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
  Success,
  Failed,
}

/// Why a task ended in `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
  /// Reserved: the keyword classifier always has a fallback category.
  ClassificationAmbiguous,
  ToolInvocationFailed,
  CancellationRequested,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_terminal_statuses() {
    assert!(!TaskStatus::Idle.is_terminal());
    assert!(!TaskStatus::Running.is_terminal());
    assert!(TaskStatus::Success.is_terminal());
    assert!(TaskStatus::Failed.is_terminal());
  }

  #[test]
  fn test_status_wire_names() {
    assert_eq!(
      serde_json::to_string(&StepStatus::Pending).unwrap(),
      "\"pending\""
    );
    assert_eq!(
      serde_json::to_string(&FailureKind::CancellationRequested).unwrap(),
      "\"cancellation_requested\""
    );
  }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::log::ToolCallLog;
use crate::result::WorkflowResult;
use crate::snapshot::TaskSnapshot;
use crate::status::{FailureKind, StepStatus, TaskStatus};
use crate::step::{PIPELINE, Step, StepId};

/// Where and why a task stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFailure {
  pub kind: FailureKind,
  pub step_id: StepId,
  pub message: String,
}

/// One workflow execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub task_id: String,
  pub status: TaskStatus,
  pub steps: Vec<Step>,
  pub logs: Vec<ToolCallLog>,
  pub result: Option<WorkflowResult>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<TaskFailure>,
}

impl Task {
  /// Create an idle task with every pipeline step pending.
  pub fn new(task_id: impl Into<String>) -> Self {
    Self {
      task_id: task_id.into(),
      status: TaskStatus::Idle,
      steps: PIPELINE.iter().map(Step::from).collect(),
      logs: Vec::new(),
      result: None,
      error: None,
    }
  }

  pub fn step(&self, id: StepId) -> Option<&Step> {
    self.steps.iter().find(|s| s.id == id)
  }

  /// The step currently in `running`, if any.
  pub fn running_step(&self) -> Option<StepId> {
    self
      .steps
      .iter()
      .find(|s| s.status == StepStatus::Running)
      .map(|s| s.id)
  }

  /// Move a step into `running` and stamp it. Also moves the task out of `idle`.
  pub fn start_step(&mut self, id: StepId, now: DateTime<Utc>) {
    if let Some(step) = self.steps.iter_mut().find(|s| s.id == id) {
      step.status = StepStatus::Running;
      step.timestamp.get_or_insert(now);
    }
    self.status = TaskStatus::Running;
  }

  pub fn complete_step(&mut self, id: StepId) {
    if let Some(step) = self.steps.iter_mut().find(|s| s.id == id) {
      step.status = StepStatus::Success;
    }
  }

  /// Fail the given step and the task. Later steps stay `pending`.
  pub fn fail(&mut self, id: StepId, kind: FailureKind, message: impl Into<String>) {
    if let Some(step) = self.steps.iter_mut().find(|s| s.id == id) {
      step.status = StepStatus::Failed;
    }
    self.status = TaskStatus::Failed;
    self.error = Some(TaskFailure {
      kind,
      step_id: id,
      message: message.into(),
    });
  }

  pub fn push_log(&mut self, log: ToolCallLog) {
    self.logs.push(log);
  }

  /// Id for the next appended log: `log-1`, `log-2`, ...
  pub fn next_log_id(&self) -> String {
    format!("log-{}", self.logs.len() + 1)
  }

  /// Attach the final result and mark the task successful.
  pub fn succeed(&mut self, result: WorkflowResult) {
    self.result = Some(result);
    self.status = TaskStatus::Success;
  }

  /// Fold a partial snapshot into this task, field by field.
  ///
  /// Omitted fields are left untouched. A result or error that is already
  /// set is never replaced.
  pub fn merge(&mut self, snapshot: TaskSnapshot) {
    if let Some(status) = snapshot.status {
      self.status = status;
    }
    if let Some(steps) = snapshot.steps {
      self.steps = steps;
    }
    if let Some(logs) = snapshot.logs {
      self.logs = logs;
    }
    if self.result.is_none() {
      self.result = snapshot.result;
    }
    if self.error.is_none() {
      self.error = snapshot.error;
    }
  }
}

//! Partial task snapshots and the observer-side view that merges them.

use serde::{Deserialize, Serialize};

use crate::log::ToolCallLog;
use crate::result::WorkflowResult;
use crate::status::TaskStatus;
use crate::step::Step;
use crate::task::{Task, TaskFailure};

/// A partial, immutable view of a task emitted after a state transition.
///
/// Only `task_id` is always present. Every other field is present when it
/// changed since the previous snapshot of the same task; receivers leave
/// omitted fields as they were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
  pub task_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<TaskStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub steps: Option<Vec<Step>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub logs: Option<Vec<ToolCallLog>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub result: Option<WorkflowResult>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<TaskFailure>,
}

impl TaskSnapshot {
  /// An empty snapshot for the given task.
  pub fn new(task_id: impl Into<String>) -> Self {
    Self {
      task_id: task_id.into(),
      status: None,
      steps: None,
      logs: None,
      result: None,
      error: None,
    }
  }

  /// A snapshot carrying every field of the task.
  pub fn full(task: &Task) -> Self {
    Self {
      task_id: task.task_id.clone(),
      status: Some(task.status),
      steps: Some(task.steps.clone()),
      logs: Some(task.logs.clone()),
      result: task.result.clone(),
      error: task.error.clone(),
    }
  }

  pub fn with_status(mut self, status: TaskStatus) -> Self {
    self.status = Some(status);
    self
  }

  pub fn with_steps(mut self, steps: &[Step]) -> Self {
    self.steps = Some(steps.to_vec());
    self
  }

  pub fn with_logs(mut self, logs: &[ToolCallLog]) -> Self {
    self.logs = Some(logs.to_vec());
    self
  }

  pub fn with_result(mut self, result: Option<&WorkflowResult>) -> Self {
    self.result = result.cloned();
    self
  }

  pub fn with_error(mut self, error: Option<&TaskFailure>) -> Self {
    self.error = error.cloned();
    self
  }

  /// Whether this is the first snapshot of a run.
  pub fn is_start(&self) -> bool {
    self.status == Some(TaskStatus::Running) && self.steps.is_some()
  }

  /// Whether this snapshot moves the task into a terminal state.
  pub fn is_terminal(&self) -> bool {
    self.status.is_some_and(TaskStatus::is_terminal)
  }
}

/// An observer's merged copy of the most recent task.
///
/// Snapshots are applied in receipt order. A start snapshot for a new task
/// supersedes the current one; any other snapshot for a different task
/// comes from a superseded run and is dropped.
#[derive(Debug, Clone, Default)]
pub struct TaskView {
  task: Option<Task>,
}

impl TaskView {
  pub fn new() -> Self {
    Self::default()
  }

  /// Merge a snapshot. Returns `false` if it was stale and ignored.
  pub fn apply(&mut self, snapshot: TaskSnapshot) -> bool {
    match &mut self.task {
      Some(task) if task.task_id == snapshot.task_id => {
        task.merge(snapshot);
        true
      }
      _ if snapshot.is_start() => {
        let mut task = Task::new(snapshot.task_id.clone());
        task.merge(snapshot);
        self.task = Some(task);
        true
      }
      _ => false,
    }
  }

  pub fn task(&self) -> Option<&Task> {
    self.task.as_ref()
  }

  pub fn into_task(self) -> Option<Task> {
    self.task
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::status::StepStatus;
  use crate::{ChartType, FailureKind};

  fn start_snapshot(task_id: &str) -> TaskSnapshot {
    let mut task = Task::new(task_id);
    task.start_step(1, Utc::now());
    TaskSnapshot::full(&task)
  }

  #[test]
  fn test_omitted_fields_are_left_unchanged() {
    let mut view = TaskView::new();
    assert!(view.apply(start_snapshot("a")));

    let mut steps = view.task().unwrap().steps.clone();
    steps[0].status = StepStatus::Success;
    assert!(view.apply(TaskSnapshot::new("a").with_steps(&steps)));

    let task = view.task().unwrap();
    assert_eq!(task.status, TaskStatus::Running);
    assert_eq!(task.steps[0].status, StepStatus::Success);
    assert!(task.logs.is_empty());
  }

  #[test]
  fn test_snapshot_before_start_is_ignored() {
    let mut view = TaskView::new();

    assert!(!view.apply(TaskSnapshot::new("a").with_status(TaskStatus::Success)));
    assert!(view.task().is_none());
  }

  #[test]
  fn test_new_run_supersedes_and_stale_snapshots_drop() {
    let mut view = TaskView::new();
    view.apply(start_snapshot("old"));
    assert!(view.apply(start_snapshot("new")));

    let stale = TaskSnapshot::new("old").with_status(TaskStatus::Failed);
    assert!(!view.apply(stale));
    assert_eq!(view.task().unwrap().task_id, "new");
    assert_eq!(view.task().unwrap().status, TaskStatus::Running);
  }

  #[test]
  fn test_result_is_immutable_once_set() {
    let mut view = TaskView::new();
    view.apply(start_snapshot("a"));

    let first = WorkflowResult {
      summary: "first".to_string(),
      chart_type: ChartType::Bar,
      chart_data: vec![],
      raw_data: vec![],
    };
    let second = WorkflowResult {
      summary: "second".to_string(),
      ..first.clone()
    };
    view.apply(TaskSnapshot::new("a").with_result(Some(&first)));
    view.apply(TaskSnapshot::new("a").with_result(Some(&second)));

    assert_eq!(view.task().unwrap().result.as_ref().unwrap().summary, "first");
  }

  #[test]
  fn test_partial_snapshot_serializes_only_present_fields() {
    let snapshot = TaskSnapshot::new("a").with_error(Some(&TaskFailure {
      kind: FailureKind::CancellationRequested,
      step_id: 3,
      message: "cancelled".to_string(),
    }));
    let value = serde_json::to_value(&snapshot).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert_eq!(value["taskId"], "a");
    assert_eq!(value["error"]["stepId"], 3);
  }
}

//! Terminal rendering of task progress.

use agentflow_workflow::{
  ChartType, LogStatus, StepStatus, Task, TaskSnapshot, TaskStatus, TaskView, ToolCallLog,
  WorkflowResult,
};

/// Folds snapshots into a [`TaskView`] and prints what changed.
#[derive(Default)]
pub struct ProgressRenderer {
  view: TaskView,
  task_id: Option<String>,
  step_statuses: Vec<StepStatus>,
  printed_logs: usize,
}

impl ProgressRenderer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Apply a snapshot and print the transitions it introduced.
  pub fn render(&mut self, snapshot: TaskSnapshot) {
    if !self.view.apply(snapshot) {
      return;
    }
    let Some(task) = self.view.task() else {
      return;
    };

    if self.task_id.as_deref() != Some(task.task_id.as_str()) {
      println!("▶ task {}", task.task_id);
      self.task_id = Some(task.task_id.clone());
      self.step_statuses.clear();
      self.printed_logs = 0;
    }

    for (i, step) in task.steps.iter().enumerate() {
      let before = self.step_statuses.get(i).copied().unwrap_or_default();
      if step.status != before && step.status != StepStatus::Pending {
        println!(
          "  {} [{}] {} - {}",
          step_marker(step.status),
          step.id,
          step.name,
          step.description
        );
      }
    }
    self.step_statuses = task.steps.iter().map(|s| s.status).collect();

    for log in task.logs.iter().skip(self.printed_logs) {
      print_log(log);
    }
    self.printed_logs = task.logs.len();

    match task.status {
      TaskStatus::Success => {
        if let Some(result) = &task.result {
          print_result(result);
        }
      }
      TaskStatus::Failed => print_failure(task),
      _ => {}
    }
  }
}

fn step_marker(status: StepStatus) -> &'static str {
  match status {
    StepStatus::Pending => "·",
    StepStatus::Running => "…",
    StepStatus::Success => "✓",
    StepStatus::Failed => "✗",
  }
}

fn print_log(log: &ToolCallLog) {
  let marker = match log.status {
    LogStatus::Success => "✓",
    LogStatus::Failed => "✗",
  };
  println!(
    "    {} {} {} ({}ms)",
    marker, log.id, log.tool_name, log.duration_ms
  );
  println!("      in:  {}", log.input_params);
  if let Some(output) = &log.output_result {
    println!("      out: {}", output);
  }
}

fn print_result(result: &WorkflowResult) {
  println!();
  println!("{}", result.summary);

  if result.chart_type != ChartType::None && !result.chart_data.is_empty() {
    let kind = match result.chart_type {
      ChartType::Line => "line",
      _ => "bar",
    };
    println!();
    println!("chart ({}):", kind);
    for point in &result.chart_data {
      let series: Vec<String> = point
        .series
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
      println!("  {:<12} {}", point.name, series.join(" "));
    }
  }

  if !result.raw_data.is_empty() {
    println!();
    println!("data:");
    for row in &result.raw_data {
      let cells: Vec<String> = row
        .iter()
        .map(|(k, v)| match v {
          serde_json::Value::String(s) => format!("{}: {}", k, s),
          other => format!("{}: {}", k, other),
        })
        .collect();
      println!("  {}", cells.join(" | "));
    }
  }
  println!();
}

fn print_failure(task: &Task) {
  match &task.error {
    Some(error) => println!("task failed at step {}: {}", error.step_id, error.message),
    None => println!("task failed"),
  }
}

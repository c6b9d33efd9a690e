//! The four-step workflow orchestrator.

use std::sync::Arc;
use std::time::Duration;

use agentflow_classifier::{Classification, Classifier, KeywordClassifier};
use agentflow_config::OrchestratorConfig;
use agentflow_tools::{ToolHandler, ToolRegistry, ToolRequest, ToolResponse};
use agentflow_workflow::{LogStatus, StepId, Task, TaskSnapshot, TaskStatus, ToolCallLog};
use chrono::Utc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::error::OrchestratorError;
use crate::events::SnapshotNotifier;

/// Tool name of the log entry recording the routing decision.
pub const ORCHESTRATOR_TOOL: &str = "Orchestrator";

const INTENT: StepId = 1;
const ROUTING: StepId = 2;
const EXECUTION: StepId = 3;
const SYNTHESIS: StepId = 4;

/// Runs user instructions through intent recognition, tool routing, tool
/// execution and result generation.
///
/// The orchestrator holds no per-run state; every call to [`run`](Self::run)
/// owns its own task.
pub struct WorkflowOrchestrator {
  classifier: Arc<dyn Classifier>,
  registry: ToolRegistry,
  config: OrchestratorConfig,
}

impl WorkflowOrchestrator {
  /// An orchestrator with the keyword classifier and the built-in tools.
  pub fn new(config: OrchestratorConfig) -> Self {
    Self {
      classifier: Arc::new(KeywordClassifier::default()),
      registry: ToolRegistry::with_builtin_tools(),
      config,
    }
  }

  pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
    self.classifier = Arc::new(classifier);
    self
  }

  pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
    self.registry = registry;
    self
  }

  pub fn config(&self) -> &OrchestratorConfig {
    &self.config
  }

  pub fn registry(&self) -> &ToolRegistry {
    &self.registry
  }

  /// Run one instruction to a terminal state.
  ///
  /// Snapshots go to `notifier` after every transition; the last one carries
  /// the terminal status. Tool failures and cancellation end the task in
  /// `failed` and still return `Ok`. Only contract violations, such as a
  /// category with no registered handler, return `Err`.
  #[instrument(name = "task_run", skip(self, notifier, cancel))]
  pub async fn run<N>(
    &self,
    text: &str,
    notifier: &N,
    cancel: CancellationToken,
  ) -> Result<Task, OrchestratorError>
  where
    N: SnapshotNotifier + ?Sized,
  {
    let mut run = TaskRun::new(&self.config, notifier, cancel);
    info!(task_id = %run.task.task_id, "task_started");

    // Intent recognition
    run.task.start_step(INTENT, Utc::now());
    info!(task_id = %run.task.task_id, step_id = INTENT, "step_started");
    run.emit(TaskSnapshot::full(&run.task));
    let classification = self.classifier.classify(text);
    debug!(
      task_id = %run.task.task_id,
      category = %classification.category,
      confidence = classification.confidence,
      "intent_classified"
    );
    if let Err(e) = run.pause(INTENT).await {
      return run.fail(INTENT, e);
    }
    run.advance(INTENT, ROUTING);
    run.emit_steps();

    // Tool routing
    let handler = self
      .registry
      .get(classification.category)
      .ok_or_else(|| {
        let e = OrchestratorError::UnknownCategory {
          category: classification.category,
        };
        error!(task_id = %run.task.task_id, error = %e, "task_aborted");
        e
      })?;
    let routing_started = Instant::now();
    let request = handler.route(text);
    let routing_elapsed = routing_started.elapsed();
    if let Err(e) = run.pause(ROUTING).await {
      return run.fail(ROUTING, e);
    }
    run.advance(ROUTING, EXECUTION);
    let routing_log = run.routing_log(&classification, routing_elapsed);
    run.task.push_log(routing_log);
    run.emit_steps_and_logs();

    // Execution
    let response = match run.invoke(handler.as_ref(), &request).await {
      Ok(response) => response,
      Err(e) => return run.fail(EXECUTION, e),
    };
    run.advance(EXECUTION, SYNTHESIS);
    run.emit_steps_and_logs();

    // Result generation
    let result = handler.synthesize(&response);
    if let Err(e) = run.pause(SYNTHESIS).await {
      return run.fail(SYNTHESIS, e);
    }
    run.task.complete_step(SYNTHESIS);
    run.task.succeed(result);
    run.emit(
      TaskSnapshot::new(&run.task.task_id)
        .with_status(TaskStatus::Success)
        .with_steps(&run.task.steps)
        .with_result(run.task.result.as_ref()),
    );

    info!(
      task_id = %run.task.task_id,
      category = %classification.category,
      tool_name = %request.tool_name,
      "task_completed"
    );
    Ok(run.task)
  }
}

/// State of a single run. Owns the task until it reaches a terminal state.
struct TaskRun<'a, N: ?Sized> {
  config: &'a OrchestratorConfig,
  notifier: &'a N,
  cancel: CancellationToken,
  task: Task,
}

impl<'a, N> TaskRun<'a, N>
where
  N: SnapshotNotifier + ?Sized,
{
  fn new(config: &'a OrchestratorConfig, notifier: &'a N, cancel: CancellationToken) -> Self {
    Self {
      config,
      notifier,
      cancel,
      task: Task::new(uuid::Uuid::new_v4().to_string()),
    }
  }

  fn emit(&self, snapshot: TaskSnapshot) {
    self.notifier.notify(snapshot);
  }

  fn emit_steps(&self) {
    self.emit(TaskSnapshot::new(&self.task.task_id).with_steps(&self.task.steps));
  }

  fn emit_steps_and_logs(&self) {
    self.emit(
      TaskSnapshot::new(&self.task.task_id)
        .with_steps(&self.task.steps)
        .with_logs(&self.task.logs),
    );
  }

  /// Complete `from` and start `to` in one transition.
  fn advance(&mut self, from: StepId, to: StepId) {
    self.task.complete_step(from);
    self.task.start_step(to, Utc::now());
    info!(task_id = %self.task.task_id, step_id = to, "step_started");
  }

  /// Wait out a step's simulated processing time.
  async fn pause(&self, step_id: StepId) -> Result<(), OrchestratorError> {
    let delay = self.config.step_delays.for_step(step_id);
    tokio::select! {
      _ = tokio::time::sleep(delay) => Ok(()),
      _ = self.cancel.cancelled() => Err(OrchestratorError::Cancelled),
    }
  }

  fn routing_log(&self, classification: &Classification, elapsed: Duration) -> ToolCallLog {
    let input = serde_json::json!({
      "intent": classification.category,
      "confidence": classification.confidence,
    });
    ToolCallLog {
      id: self.task.next_log_id(),
      tool_name: ORCHESTRATOR_TOOL.to_string(),
      input_params: input.to_string(),
      output_result: None,
      status: LogStatus::Success,
      duration_ms: elapsed.as_millis() as u64,
      timestamp: Utc::now(),
    }
  }

  /// Call the tool, bounded by the tool timeout, and log the call.
  ///
  /// The step lasts at least its configured delay even if the tool answers
  /// sooner.
  async fn invoke(
    &mut self,
    handler: &dyn ToolHandler,
    request: &ToolRequest,
  ) -> Result<ToolResponse, OrchestratorError> {
    let timeout = self.config.tool_timeout();
    let call = async {
      let started = Instant::now();
      let outcome = tokio::time::timeout(timeout, handler.invoke(request)).await;
      (outcome, started.elapsed())
    };
    let floor = tokio::time::sleep(self.config.step_delays.for_step(EXECUTION));

    let ((outcome, elapsed), _) = tokio::select! {
      joined = async { tokio::join!(call, floor) } => joined,
      _ = self.cancel.cancelled() => return Err(OrchestratorError::Cancelled),
    };

    let duration_ms = elapsed.as_millis() as u64;
    let failure = match outcome {
      Ok(Ok(response)) => {
        info!(
          task_id = %self.task.task_id,
          tool_name = %request.tool_name,
          duration_ms,
          "tool_invoked"
        );
        self.push_tool_log(request, Some(response.serialized()), duration_ms);
        return Ok(response);
      }
      Ok(Err(source)) => OrchestratorError::ToolInvocationFailed {
        tool_name: request.tool_name.clone(),
        source,
      },
      Err(_) => OrchestratorError::ToolTimeout {
        tool_name: request.tool_name.clone(),
        timeout_ms: timeout.as_millis() as u64,
      },
    };
    self.push_tool_log(request, None, duration_ms);
    Err(failure)
  }

  /// Log an external tool call. A call without output is logged as failed.
  fn push_tool_log(&mut self, request: &ToolRequest, output: Option<String>, duration_ms: u64) {
    let status = if output.is_some() {
      LogStatus::Success
    } else {
      LogStatus::Failed
    };
    let log = ToolCallLog {
      id: self.task.next_log_id(),
      tool_name: request.tool_name.clone(),
      input_params: request.serialized_params(),
      output_result: output,
      status,
      duration_ms,
      timestamp: Utc::now(),
    };
    self.task.push_log(log);
  }

  /// End the task in `failed` at `step_id` and emit the terminal snapshot.
  ///
  /// Fatal errors are handed back untouched and emit nothing.
  fn fail(mut self, step_id: StepId, e: OrchestratorError) -> Result<Task, OrchestratorError> {
    let Some(kind) = e.failure_kind() else {
      error!(task_id = %self.task.task_id, error = %e, "task_aborted");
      return Err(e);
    };

    self.task.fail(step_id, kind, e.detail());
    let mut snapshot = TaskSnapshot::new(&self.task.task_id)
      .with_status(TaskStatus::Failed)
      .with_steps(&self.task.steps)
      .with_error(self.task.error.as_ref());

    match &e {
      OrchestratorError::Cancelled => {
        warn!(task_id = %self.task.task_id, step_id, "task_cancelled");
      }
      OrchestratorError::ToolInvocationFailed { .. } | OrchestratorError::ToolTimeout { .. } => {
        snapshot = snapshot.with_logs(&self.task.logs);
        error!(task_id = %self.task.task_id, step_id, error = %e.detail(), "task_failed");
      }
      _ => {
        error!(task_id = %self.task.task_id, step_id, error = %e.detail(), "task_failed");
      }
    }

    self.emit(snapshot);
    Ok(self.task)
  }
}

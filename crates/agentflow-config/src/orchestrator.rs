use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Simulated processing time of each pipeline step, in milliseconds.
///
/// A step's delay is the minimum time between it entering `running` and the
/// next transition becoming visible. Zero is treated as one millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDelays {
  pub intent_ms: u64,
  pub routing_ms: u64,
  pub execution_ms: u64,
  pub synthesis_ms: u64,
}

impl Default for StepDelays {
  fn default() -> Self {
    Self {
      intent_ms: 1500,
      routing_ms: 1000,
      execution_ms: 2000,
      synthesis_ms: 1500,
    }
  }
}

impl StepDelays {
  /// The same delay for every step.
  pub fn uniform(ms: u64) -> Self {
    Self {
      intent_ms: ms,
      routing_ms: ms,
      execution_ms: ms,
      synthesis_ms: ms,
    }
  }

  /// Delay for a pipeline step id (1..=4).
  pub fn for_step(&self, step_id: u32) -> Duration {
    let ms = match step_id {
      1 => self.intent_ms,
      2 => self.routing_ms,
      3 => self.execution_ms,
      _ => self.synthesis_ms,
    };
    Duration::from_millis(ms.max(1))
  }
}

/// Configuration for the workflow orchestrator and runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
  pub step_delays: StepDelays,
  /// Upper bound on a single tool invocation. Zero is treated as one
  /// millisecond.
  pub tool_timeout_ms: u64,
  /// Capacity of the runner's instruction channel.
  pub runner_buffer: usize,
}

impl Default for OrchestratorConfig {
  fn default() -> Self {
    Self {
      step_delays: StepDelays::default(),
      tool_timeout_ms: 10_000,
      runner_buffer: 100,
    }
  }
}

impl OrchestratorConfig {
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Load a JSON config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&content)
  }

  pub fn tool_timeout(&self) -> Duration {
    Duration::from_millis(self.tool_timeout_ms.max(1))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_empty_object_uses_defaults() {
    let config = OrchestratorConfig::from_json_str("{}").unwrap();
    assert_eq!(config, OrchestratorConfig::default());
    assert_eq!(config.tool_timeout(), Duration::from_secs(10));
  }

  #[test]
  fn test_partial_step_delays() {
    let config =
      OrchestratorConfig::from_json_str(r#"{"step_delays": {"routing_ms": 5}}"#).unwrap();

    assert_eq!(config.step_delays.routing_ms, 5);
    assert_eq!(config.step_delays.intent_ms, 1500);
  }

  #[test]
  fn test_zero_delay_is_clamped() {
    let delays = StepDelays::uniform(0);
    for id in 1..=4 {
      assert_eq!(delays.for_step(id), Duration::from_millis(1));
    }
  }

  #[test]
  fn test_zero_tool_timeout_is_clamped() {
    let config = OrchestratorConfig::from_json_str(r#"{"tool_timeout_ms": 0}"#).unwrap();
    assert_eq!(config.tool_timeout(), Duration::from_millis(1));
  }

  #[test]
  fn test_delay_per_step() {
    let delays = StepDelays::default();
    assert_eq!(delays.for_step(1), Duration::from_millis(1500));
    assert_eq!(delays.for_step(3), Duration::from_millis(2000));
  }

  #[test]
  fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"tool_timeout_ms": 250, "runner_buffer": 4}}"#).unwrap();

    let config = OrchestratorConfig::load(file.path()).unwrap();
    assert_eq!(config.tool_timeout_ms, 250);
    assert_eq!(config.runner_buffer, 4);
  }

  #[test]
  fn test_missing_file_reports_path() {
    let err = OrchestratorConfig::load("/nonexistent/agentflow.json").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/agentflow.json"));
  }

  #[test]
  fn test_invalid_json() {
    let err = OrchestratorConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }
}

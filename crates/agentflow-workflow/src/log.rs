use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::LogStatus;

/// Audit record of one internal or external call made while executing a step.
///
/// Logs are append-only: once pushed onto a task they are never edited,
/// reordered or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallLog {
  pub id: String,
  pub tool_name: String,
  /// Serialized request.
  pub input_params: String,
  /// Serialized response; absent when the call failed before responding.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_result: Option<String>,
  pub status: LogStatus,
  /// Wall-clock milliseconds the call took.
  #[serde(rename = "duration")]
  pub duration_ms: u64,
  pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn test_log_wire_names() {
    let log = ToolCallLog {
      id: "log-1".to_string(),
      tool_name: "Weather API".to_string(),
      input_params: "{}".to_string(),
      output_result: None,
      status: LogStatus::Success,
      duration_ms: 42,
      timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };
    let value = serde_json::to_value(&log).unwrap();

    assert_eq!(value["duration"], 42);
    assert!(value.get("durationMs").is_none());
    assert_eq!(value["toolName"], "Weather API");
    assert!(value.get("outputResult").is_none());

    let back: ToolCallLog = serde_json::from_value(value).unwrap();
    assert_eq!(back, log);
  }
}

use agentflow_classifier::Category;
use agentflow_workflow::WorkflowResult;
use async_trait::async_trait;

use crate::error::ToolError;

/// A routed tool call: which tool, with which parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
  pub tool_name: String,
  pub params: serde_json::Value,
}

impl ToolRequest {
  pub fn new(tool_name: impl Into<String>, params: serde_json::Value) -> Self {
    Self {
      tool_name: tool_name.into(),
      params,
    }
  }

  /// Look up a parameter that must be present.
  pub fn require(&self, name: &str) -> Result<&serde_json::Value, ToolError> {
    self
      .params
      .get(name)
      .filter(|v| !v.is_null())
      .ok_or_else(|| ToolError::MissingParam {
        name: name.to_string(),
      })
  }

  /// Parameters as the serialized string recorded in tool-call logs.
  pub fn serialized_params(&self) -> String {
    self.params.to_string()
  }
}

/// The raw response of a tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
  pub payload: serde_json::Value,
}

impl ToolResponse {
  pub fn serialized(&self) -> String {
    self.payload.to_string()
  }
}

/// Everything the orchestrator needs to handle one task category.
#[async_trait]
pub trait ToolHandler: Send + Sync {
  /// The category this handler serves.
  fn category(&self) -> Category;

  /// Display name of the tool, recorded in tool-call logs.
  fn tool_name(&self) -> &str;

  fn description(&self) -> &str;

  /// Parameters that `route` always fills in and `invoke` checks for.
  fn required_params(&self) -> &[&'static str];

  /// Parameters the tool accepts but does not insist on.
  fn optional_params(&self) -> &[&'static str] {
    &[]
  }

  /// Choose the request for an instruction. Must be deterministic.
  fn route(&self, text: &str) -> ToolRequest;

  /// Perform the call.
  async fn invoke(&self, request: &ToolRequest) -> Result<ToolResponse, ToolError>;

  /// Build the final result from a successful response.
  fn synthesize(&self, response: &ToolResponse) -> WorkflowResult;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_require_rejects_missing_and_null() {
    let request = ToolRequest::new("t", serde_json::json!({"a": 1, "b": null}));

    assert_eq!(request.require("a").unwrap(), &serde_json::json!(1));
    assert!(matches!(
      request.require("b"),
      Err(ToolError::MissingParam { name }) if name == "b"
    ));
    assert!(request.require("c").is_err());
  }
}

use thiserror::Error;

/// Errors a tool invocation can report.
#[derive(Debug, Error)]
pub enum ToolError {
  /// A required parameter was absent from the request.
  #[error("missing required parameter: {name}")]
  MissingParam { name: String },

  /// The tool ran but reported a failure.
  #[error("tool failed: {message}")]
  Failed { message: String },
}

impl ToolError {
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed {
      message: message.into(),
    }
  }
}

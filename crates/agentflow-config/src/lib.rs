//! Agentflow Config
//!
//! Serializable configuration for the orchestrator. Every field has a
//! default, so an empty JSON object is a valid configuration.
//!
//! ```json
//! {
//!   "step_delays": { "intent_ms": 1500, "routing_ms": 1000 },
//!   "tool_timeout_ms": 10000
//! }
//! ```

mod error;
mod orchestrator;

pub use error::ConfigError;
pub use orchestrator::{OrchestratorConfig, StepDelays};

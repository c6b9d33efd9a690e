//! Agentflow Tools
//!
//! A [`ToolHandler`] owns everything category-specific about a run: which
//! tool to call and with what parameters, how to invoke it, and how to turn
//! its response into a [`WorkflowResult`](agentflow_workflow::WorkflowResult).
//! The [`ToolRegistry`] maps each [`Category`](agentflow_classifier::Category)
//! to its handler, so adding a category never touches the orchestrator.

mod builtin;
mod error;
mod handler;
mod registry;

pub use builtin::{SIMULATED_ACK, SimulatedTool};
pub use error::ToolError;
pub use handler::{ToolHandler, ToolRequest, ToolResponse};
pub use registry::{ToolDescriptor, ToolRegistry};

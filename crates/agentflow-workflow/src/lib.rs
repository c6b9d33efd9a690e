//! Agentflow Workflow
//!
//! The data model shared by the orchestrator and its observers:
//!
//! - [`Task`] is one end-to-end execution of the four-step pipeline.
//! - [`Step`] is one named stage of that pipeline.
//! - [`ToolCallLog`] is an audit entry for one call made during a step.
//! - [`WorkflowResult`] is the structured output attached on success.
//!
//! The orchestrator owns the `Task` while a run is in flight and hands out
//! [`TaskSnapshot`]s, which carry only the fields that changed. Observers
//! fold them into their own copy with [`TaskView`].
//!
//! All types serialize with camelCase field names, which is the shape the
//! presentation layer consumes.

mod log;
mod result;
mod snapshot;
mod status;
mod step;
mod task;

pub use log::ToolCallLog;
pub use result::{ChartPoint, ChartType, RawRecord, WorkflowResult};
pub use snapshot::{TaskSnapshot, TaskView};
pub use status::{FailureKind, LogStatus, StepStatus, TaskStatus};
pub use step::{PIPELINE, Step, StepDef, StepId};
pub use task::{Task, TaskFailure};

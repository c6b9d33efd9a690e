//! Agentflow Engine
//!
//! Drives one user instruction through the fixed four-step pipeline and
//! reports progress as partial snapshots.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WorkflowRunner                         │
//! │  - owns mpsc channel of instructions                        │
//! │  - start(cancel) runs them one at a time                    │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   WorkflowOrchestrator                      │
//! │  - run(text, notifier, cancel) → Task                       │
//! │  - intent → routing → execution → result                    │
//! │  - emits a TaskSnapshot after every transition              │
//! └─────────────────────────────────────────────────────────────┘
//!                │                              │
//!                ▼                              ▼
//! ┌────────────────────────────┐  ┌──────────────────────────────┐
//! │        Classifier          │  │        ToolRegistry          │
//! │  text → Category           │  │  Category → ToolHandler      │
//! └────────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use agentflow_engine::{ChannelNotifier, WorkflowOrchestrator};
//! use tokio_util::sync::CancellationToken;
//!
//! let orchestrator = WorkflowOrchestrator::new(OrchestratorConfig::default());
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let notifier = ChannelNotifier::new(tx);
//!
//! let task = orchestrator
//!   .run("帮我查一下北京未来三天的气温", &notifier, CancellationToken::new())
//!   .await?;
//! ```

mod error;
mod events;
mod orchestrator;
mod runner;

pub use error::OrchestratorError;
pub use events::{ChannelNotifier, NoopNotifier, SnapshotNotifier};
pub use orchestrator::{ORCHESTRATOR_TOOL, WorkflowOrchestrator};
pub use runner::WorkflowRunner;

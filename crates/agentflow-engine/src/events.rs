//! Snapshot notifiers.
//!
//! The orchestrator hands every snapshot to a [`SnapshotNotifier`]. What
//! happens next is up to the implementation: render it, forward it to a UI
//! store, or drop it.

use agentflow_workflow::TaskSnapshot;
use tokio::sync::mpsc;

/// Receives task snapshots in emission order.
pub trait SnapshotNotifier: Send + Sync {
  fn notify(&self, snapshot: TaskSnapshot);
}

/// Any `Fn(TaskSnapshot)` closure is a notifier.
impl<F> SnapshotNotifier for F
where
  F: Fn(TaskSnapshot) + Send + Sync,
{
  fn notify(&self, snapshot: TaskSnapshot) {
    self(snapshot)
  }
}

/// Discards every snapshot.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl SnapshotNotifier for NoopNotifier {
  fn notify(&self, _snapshot: TaskSnapshot) {}
}

/// Forwards snapshots to an unbounded channel.
///
/// Unbounded so a slow consumer never stalls the pipeline; a run emits at
/// most five snapshots.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<TaskSnapshot>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<TaskSnapshot>) -> Self {
    Self { sender }
  }
}

impl SnapshotNotifier for ChannelNotifier {
  fn notify(&self, snapshot: TaskSnapshot) {
    // Receiver may have been dropped
    let _ = self.sender.send(snapshot);
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;

  #[test]
  fn test_closure_notifier() {
    let seen = Mutex::new(Vec::new());
    let notifier = |s: TaskSnapshot| seen.lock().unwrap().push(s.task_id);

    notifier.notify(TaskSnapshot::new("a"));
    notifier.notify(TaskSnapshot::new("b"));

    assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
  }

  #[test]
  fn test_channel_notifier_ignores_dropped_receiver() {
    let (tx, rx) = mpsc::unbounded_channel();
    let notifier = ChannelNotifier::new(tx);
    drop(rx);

    notifier.notify(TaskSnapshot::new("a"));
  }
}

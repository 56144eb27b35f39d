//! Fire-and-forget progress notifications emitted between generation phases.
//!
//! A sink is injected into each generator at construction. Generators never
//! block on it or inspect the outcome of a notification.

use crossbeam_channel::Sender;
use tracing::info;

/// Receives `(label, fraction)` notifications at phase boundaries.
pub trait ProgressSink: Send + Sync {
    /// Report that the phase named `label` has started. `fraction` is in `[0, 1]`.
    fn notify(&self, label: &str, fraction: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(&str, f64) + Send + Sync,
{
    fn notify(&self, label: &str, fraction: f64) {
        self(label, fraction)
    }
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn notify(&self, _label: &str, _fraction: f64) {}
}

/// Logs every notification at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn notify(&self, label: &str, fraction: f64) {
        info!(target: "strata_worldgen::progress", fraction, "{label}");
    }
}

/// A notification forwarded over a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressEvent {
    pub label: String,
    pub fraction: f64,
}

/// Forwards notifications to a channel without blocking.
///
/// When the channel is full or disconnected the notification is dropped.
#[derive(Clone, Debug)]
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgress {
    fn notify(&self, label: &str, fraction: f64) {
        let _ = self.sender.try_send(ProgressEvent {
            label: label.to_string(),
            fraction,
        });
    }
}

/// Label shown for a phase of the level at `depth`, e.g. `"LEVEL 0: ERODING..."`.
pub fn phase_label(depth: i32, phase: &str) -> String {
    format!("LEVEL {depth}: {phase}...")
}

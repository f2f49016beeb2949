use tracing::{info, warn};

/// Receives the user-facing outcome of queries and mutations.
///
/// A dashboard shell plugs its toast system in here.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(message, "notify");
    }

    fn error(&self, message: &str) {
        warn!(message, "notify");
    }
}

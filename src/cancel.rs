// ABOUTME: Cooperative cancellation token shared between the CLI and the engine
// ABOUTME: Checked between tables during export and between statements during restore

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag.
///
/// Clones share the same flag. The engine checks the token at statement and
/// table boundaries: once signaled, in-flight work finishes but nothing
/// further is started, and the operation's summary carries a `cancelled`
/// marker so the caller can tell an early stop apart from a completed run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

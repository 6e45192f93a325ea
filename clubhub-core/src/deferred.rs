//! One-shot deferred callbacks.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Runs a callback once after a delay. Arming again cancels the pending
/// callback first, so at most one is ever waiting.
///
/// Aborting only stops callbacks that have not started yet. Callers that
/// race against newer state must also check a generation inside the
/// callback; see [`crate::session::FormSession`].
#[derive(Debug, Default)]
pub struct Deferred {
    pending: Option<JoinHandle<()>>,
}

impl Deferred {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, delay: Duration, callback: impl FnOnce() + Send + 'static) {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            callback();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        self.cancel();
    }
}

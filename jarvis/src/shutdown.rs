//! Cooperative shutdown controller.
//!
//! `server.rs` combines this with OS signals to perform graceful shutdown.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;

/// Cooperative shutdown signal shared through `AppState`.
#[derive(Clone, Debug, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownController {
    /// Returns true if shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Request shutdown and wake all waiters.
    pub fn request_shutdown(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Wait until shutdown is requested.
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // register before checking the flag so a concurrent request is not missed
        notified.as_mut().enable();
        if self.is_shutdown_requested() {
            return;
        }
        notified.await;
    }
}

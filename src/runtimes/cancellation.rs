//! Cooperative cancellation signal shared between an [`AppRunner`](super::AppRunner)
//! session and the node computations it drives.
//!
//! Mirrors the shutdown-coordinator pattern used elsewhere in the agentic-runtime
//! ecosystem this crate draws from: an [`std::sync::atomic::AtomicBool`] flag for
//! polling plus a [`tokio::sync::Notify`] for tasks that want to `.await` the
//! transition instead of busy-checking it. Cancelling a run never aborts an
//! in-flight checkpoint write; callers that hold a `CancellationSignal` are
//! expected to check it between supersteps and let already-dispatched saver
//! calls run to completion, per the cancellation-safety contract.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// A cloneable, cooperative cancellation flag.
///
/// Cloning shares the same underlying state; cancelling any clone cancels all
/// of them. Node implementations receive one via [`crate::node::NodeContext`]
/// and may poll [`CancellationSignal::is_cancelled`] at safe points, or await
/// [`CancellationSignal::cancelled`] to suspend until cancellation fires.
#[derive(Clone, Debug)]
pub struct CancellationSignal {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    /// Creates a fresh, not-yet-cancelled signal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Requests cancellation. Idempotent: later calls are no-ops.
    ///
    /// Wakes every task currently suspended in [`CancellationSignal::cancelled`].
    /// Does not abort any task directly; cancellation in this crate is always
    /// cooperative.
    pub fn cancel(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Suspends until cancellation is requested. Returns immediately if it
    /// already has been.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        // Notify::notified() must be constructed before re-checking the flag
        // to avoid missing a cancel() that races between the two checks.
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

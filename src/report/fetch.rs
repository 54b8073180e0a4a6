//! One-shot background fetch bound to the lifetime of its owner.
//!
//! [`spawn_fetch`] runs a [`ReportSource`] on a detached worker thread and
//! returns a [`PendingFetch`] that the owner polls from its own thread. The
//! request itself cannot be cancelled; instead the owner holds a
//! [`LivenessToken`] and revokes it on teardown. A worker that finishes after
//! revocation drops its result without delivering it.
//!
//! # Example
//!
//! ```no_run
//! use dupview::report::{spawn_fetch, HttpReportSource, LivenessToken};
//! use std::sync::Arc;
//!
//! let token = LivenessToken::new();
//! let source = Arc::new(HttpReportSource::new("http://localhost:8080/report"));
//! let mut pending = spawn_fetch(source, token.clone());
//!
//! loop {
//!     if let Some(result) = pending.try_take() {
//!         println!("fetched: {}", result.is_ok());
//!         break;
//!     }
//!     std::thread::sleep(std::time::Duration::from_millis(16));
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{FetchError, ReportEntry, ReportSource};

/// Result delivered by a fetch.
pub type FetchResult = Result<Vec<ReportEntry>, FetchError>;

/// Shared flag telling a fetch worker whether its owner still exists.
///
/// Clones share the same flag. Starts alive; [`revoke`](Self::revoke) is
/// permanent.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessToken {
    /// Create a live token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Check whether the owner is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the owner as torn down.
    pub fn revoke(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to an in-flight fetch.
#[derive(Debug)]
pub struct PendingFetch {
    receiver: Receiver<FetchResult>,
    done: bool,
}

impl PendingFetch {
    /// Take the result if the fetch has resolved.
    ///
    /// Returns `Some` exactly once. A worker that died without sending is
    /// reported as resolved with no result, so callers never wait forever on a
    /// vanished thread.
    pub fn try_take(&mut self) -> Option<FetchResult> {
        if self.done {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.done = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Report fetch worker exited without a result");
                self.done = true;
                None
            }
        }
    }

    /// Block for up to `timeout` waiting for the result.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<FetchResult> {
        if self.done {
            return None;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => {
                self.done = true;
                Some(result)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                log::error!("Report fetch worker exited without a result");
                self.done = true;
                None
            }
        }
    }

    /// Check whether the fetch has resolved and its result was taken.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Start fetching from `source` on a background thread.
///
/// The worker checks `token` after the source returns and discards the result
/// if the owner has been torn down.
pub fn spawn_fetch(source: Arc<dyn ReportSource>, token: LivenessToken) -> PendingFetch {
    let (sender, receiver) = mpsc::channel();
    let description = source.describe();

    let spawned = thread::Builder::new()
        .name("report-fetch".to_string())
        .spawn(move || {
            log::info!("Fetching report from {}", description);
            let result = source.fetch();

            if !token.is_alive() {
                log::debug!(
                    "Discarding report from {} that arrived after teardown",
                    description
                );
                return;
            }

            // The receiver may already be gone if the owner dropped it early
            if sender.send(result).is_err() {
                log::debug!("Report receiver dropped before delivery");
            }
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn report fetch thread: {}", e);
    }

    PendingFetch {
        receiver,
        done: false,
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Cancelable trailing-edge debounce on the tokio timer

use crate::app::utils::lock;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Runs the most recently scheduled action once input pauses for `delay`
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Replace any pending action with `action`, to run after the delay
    ///
    /// Without an async runtime the action runs immediately. Returns whether
    /// the action was deferred.
    pub fn schedule<F>(&self, action: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let delay = self.delay;
                *pending = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    action();
                }));
                debug!(?delay, "Debounced action scheduled");
                true
            }
            Err(_) => {
                drop(pending);
                warn!("No async runtime, applying without debounce");
                action();
                false
            }
        }
    }

    /// Drop the pending action, if any
    ///
    /// Returns whether an action was still waiting.
    pub fn cancel(&self) -> bool {
        match lock(&self.pending).take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Whether an action is waiting to run
    pub fn is_pending(&self) -> bool {
        lock(&self.pending)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

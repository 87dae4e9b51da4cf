// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpointed watch session: one bootstrap list followed by a chain of
//! watch windows, all anchored at a single checkpoint.
//!
//! The checkpoint is overwritten with each pod event's resource version
//! *before* the event is returned to the caller, so a resumed window never
//! re-delivers a version the caller has already seen.

use futures_util::StreamExt;
use reaper_adapters::{ApiError, PodApi, WatchStream};
use reaper_core::{PodSnapshot, ResourceVersion, WatchError, WatchEvent};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::WatchTimeout;

/// Terminal conditions of a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to list pods: {0}")]
    List(#[source] ApiError),

    #[error("failed to open watch: {0}")]
    Establish(#[source] ApiError),

    #[error(transparent)]
    Watch(WatchError),
}

impl SessionError {
    /// True when the checkpoint expired and a fresh list can recover.
    pub fn is_expired(&self) -> bool {
        matches!(self, SessionError::Watch(e) if e.is_recoverable())
    }
}

pub struct WatchSession<A: PodApi> {
    api: A,
    checkpoint: ResourceVersion,
    timeout: WatchTimeout,
    window: Option<WatchStream>,
}

impl<A: PodApi> WatchSession<A> {
    /// Run the bootstrap phase.
    ///
    /// Returns the session anchored at the list's resource version together
    /// with every listed pod, to be treated as synthetic `Added` events.
    pub async fn bootstrap(
        api: A,
        timeout: WatchTimeout,
    ) -> Result<(Self, Vec<PodSnapshot>), SessionError> {
        let list = api.list_pods().await.map_err(SessionError::List)?;
        info!(
            pods = list.pods.len(),
            resource_version = %list.resource_version,
            "listed pods"
        );
        let session = Self { api, checkpoint: list.resource_version, timeout, window: None };
        Ok((session, list.pods))
    }

    /// Current checkpoint.
    pub fn checkpoint(&self) -> &ResourceVersion {
        &self.checkpoint
    }

    /// Next pod event of the streaming phase.
    ///
    /// - `Ok(Some(event))`: an Added/Modified/Deleted event; the checkpoint
    ///   already points at its resource version.
    /// - `Ok(None)`: the current window closed normally. The next call opens
    ///   a new window from the current checkpoint.
    /// - `Err(_)`: the session is over.
    pub async fn next_event(&mut self) -> Result<Option<WatchEvent>, SessionError> {
        if self.window.is_none() {
            let window = Self::open(&self.api, &self.checkpoint, self.timeout).await?;
            self.window = Some(window);
        }
        let Some(window) = self.window.as_mut() else {
            return Ok(None);
        };

        loop {
            match window.next().await {
                None => {
                    debug!(resource_version = %self.checkpoint, "watch window closed");
                    self.window = None;
                    return Ok(None);
                }
                Some(Err(undecodable)) => {
                    warn!(error = %undecodable, "skipping watch event");
                }
                Some(Ok(WatchEvent::Error(e))) => {
                    self.window = None;
                    return Err(SessionError::Watch(e));
                }
                Some(Ok(event)) => {
                    if let Some(pod) = event.pod() {
                        self.checkpoint = pod.resource_version().clone();
                    }
                    return Ok(Some(event));
                }
            }
        }
    }

    /// Borrows fields only: the session itself is not `Sync` while a
    /// window is held, and the returned future must stay `Send`.
    async fn open(
        api: &A,
        checkpoint: &ResourceVersion,
        timeout: WatchTimeout,
    ) -> Result<WatchStream, SessionError> {
        let timeout = timeout.pick();
        info!(
            resource_version = %checkpoint,
            timeout_secs = timeout.as_secs(),
            "watching since"
        );
        api.watch_pods(checkpoint, timeout).await.map_err(|e| match e {
            // A rejected resume point is reported the same way as in-band.
            ApiError::Status(status) => SessionError::Watch(status),
            other => SessionError::Establish(other),
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

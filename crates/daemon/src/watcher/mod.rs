// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resilient pod watcher.
//!
//! # Module layout
//!
//! - [`session`]: one bootstrap list plus its chain of watch windows
//!
//! # States
//!
//! ```text
//!            list ok                       event / window closed
//! Bootstrapping ──────▶ Streaming(session) ◀───────────────┐
//!      ▲                     │  └──────────────────────────┘
//!      └──── Expired ────────┤
//!                            └── any other error ──▶ fatal (run returns)
//! ```
//!
//! A closed window keeps the session and resumes from its checkpoint; only an
//! expired checkpoint forces a full re-list.

pub mod session;

use std::convert::Infallible;
use std::time::Duration;

use rand::Rng;
use reaper_adapters::{ApiError, PodApi};
use reaper_core::{EvictionPolicy, PodSnapshot, WatchError, WatchEvent};
use thiserror::Error;
use tracing::{debug, info};

use crate::channel::DeliverySender;
pub use session::{SessionError, WatchSession};

/// Lower bound of the server-side watch timeout.
pub const DEFAULT_WATCH_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Largest accepted base timeout.
pub const MAX_WATCH_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Randomized server-side timeout for watch windows.
///
/// Each window asks for a timeout drawn uniformly from `[base, 2 × base)` so
/// that many reapers do not reconnect in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchTimeout {
    base: Duration,
}

impl Default for WatchTimeout {
    fn default() -> Self {
        Self::new(DEFAULT_WATCH_TIMEOUT)
    }
}

impl WatchTimeout {
    /// Whole seconds only, clamped to `[1s, MAX_WATCH_TIMEOUT]`.
    pub fn new(base: Duration) -> Self {
        let secs = base.as_secs().clamp(1, MAX_WATCH_TIMEOUT.as_secs());
        Self { base: Duration::from_secs(secs) }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    /// Exclusive upper bound of [`pick`](Self::pick).
    pub fn upper_bound(&self) -> Duration {
        self.base * 2
    }

    pub fn pick(&self) -> Duration {
        let base = self.base.as_secs();
        Duration::from_secs(rand::rng().random_range(base..base * 2))
    }
}

/// Conditions that stop the watcher for good.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("bootstrap list failed: {0}")]
    List(#[source] ApiError),

    #[error("watch could not be established: {0}")]
    Establish(#[source] ApiError),

    #[error("unrecoverable {0}")]
    Watch(WatchError),

    #[error("delivery channel closed")]
    ChannelClosed,
}

impl From<SessionError> for WatcherError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::List(e) => WatcherError::List(e),
            SessionError::Establish(e) => WatcherError::Establish(e),
            SessionError::Watch(e) => WatcherError::Watch(e),
        }
    }
}

/// Watcher state. There is no terminal state; the fatal path is the `Err`
/// side of [`Watcher::step`].
pub enum WatchState<A: PodApi> {
    Bootstrapping,
    Streaming(WatchSession<A>),
}

/// Producer side of the pipeline: observes pods and queues eligible ones.
pub struct Watcher<A: PodApi> {
    api: A,
    policy: EvictionPolicy,
    timeout: WatchTimeout,
    tx: DeliverySender,
}

impl<A: PodApi> Watcher<A> {
    pub fn new(api: A, policy: EvictionPolicy, timeout: WatchTimeout, tx: DeliverySender) -> Self {
        Self { api, policy, timeout, tx }
    }

    /// Drive the state machine until a fatal condition.
    pub async fn run(self) -> Result<Infallible, WatcherError> {
        let mut state = WatchState::Bootstrapping;
        loop {
            state = self.step(state).await?;
        }
    }

    /// One transition. Streaming steps consume at most one event.
    pub async fn step(&self, state: WatchState<A>) -> Result<WatchState<A>, WatcherError> {
        match state {
            WatchState::Bootstrapping => self.bootstrap().await,
            WatchState::Streaming(session) => self.stream(session).await,
        }
    }

    async fn bootstrap(&self) -> Result<WatchState<A>, WatcherError> {
        let (session, pods) = WatchSession::bootstrap(self.api.clone(), self.timeout).await?;
        for pod in pods {
            if self.policy.is_eligible(&pod) {
                self.enqueue(pod).await?;
            }
        }
        Ok(WatchState::Streaming(session))
    }

    async fn stream(&self, mut session: WatchSession<A>) -> Result<WatchState<A>, WatcherError> {
        match session.next_event().await {
            Ok(Some(event)) => match event {
                WatchEvent::Added(pod) | WatchEvent::Modified(pod) => {
                    if self.policy.is_eligible(&pod) {
                        self.enqueue(pod).await?;
                    }
                    Ok(WatchState::Streaming(session))
                }
                // Already gone; nothing left to delete.
                WatchEvent::Deleted(pod) => {
                    debug!(pod = %pod.key(), "pod deleted");
                    Ok(WatchState::Streaming(session))
                }
                WatchEvent::Error(e) => self.on_watch_error(SessionError::Watch(e)),
            },
            Ok(None) => Ok(WatchState::Streaming(session)),
            Err(e) => self.on_watch_error(e),
        }
    }

    fn on_watch_error(&self, e: SessionError) -> Result<WatchState<A>, WatcherError> {
        if e.is_expired() {
            info!(error = %e, "watch expired, restarting from a fresh list");
            return Ok(WatchState::Bootstrapping);
        }
        Err(e.into())
    }

    async fn enqueue(&self, pod: PodSnapshot) -> Result<(), WatcherError> {
        debug!(
            pod = %pod.key(),
            resource_version = %pod.resource_version(),
            "queueing pod for deletion"
        );
        self.tx.send(pod).await.map_err(|_| WatcherError::ChannelClosed)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

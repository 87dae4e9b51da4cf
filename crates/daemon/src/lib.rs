// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Affinity reaper daemon library
//!
//! Watches every pod in the cluster and deletes the ones that failed on
//! node affinity. The `reaperd` binary is a thin wrapper over [`lifecycle`].

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod env;
pub mod lifecycle;
pub mod reconciler;
pub mod watcher;

pub use lifecycle::{Config, LifecycleError};
pub use reconciler::{DeletionOutcome, Reconciler};
pub use watcher::{WatchState, WatchTimeout, Watcher, WatcherError};

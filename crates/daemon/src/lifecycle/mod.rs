// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: configuration, startup and the watcher/reconciler pair.
//!
//! The process has no successful exit. It runs until the watcher hits a
//! fatal condition, which is returned to `main` as a [`LifecycleError`].

use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;

use reaper_adapters::{ConnectError, ConnectOptions, KubePodApi, PodApi};
use reaper_core::EvictionPolicy;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::info;

use crate::channel::delivery_channel;
use crate::env;
use crate::reconciler::Reconciler;
use crate::watcher::{WatchTimeout, Watcher, WatcherError};

/// Margin added to the longest watch window for the client read timeout.
const READ_TIMEOUT_SLACK: Duration = Duration::from_secs(30);

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// How to reach the API server
    pub connect: ConnectOptions,
    /// Which pods get deleted
    pub policy: EvictionPolicy,
    /// Base server-side timeout of each watch window
    pub watch_timeout: WatchTimeout,
}

impl Config {
    /// Combine command-line connection flags with environment settings.
    pub fn load(master: Option<String>, kubeconfig: Option<PathBuf>) -> Self {
        let watch_timeout = env::watch_timeout();
        Self {
            connect: ConnectOptions {
                master,
                kubeconfig,
                read_timeout: Some(watch_timeout.upper_bound() + READ_TIMEOUT_SLACK),
            },
            policy: env::eviction_policy(),
            watch_timeout,
        }
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to connect to the API server: {0}")]
    Connect(#[from] ConnectError),

    #[error("watcher stopped: {0}")]
    Watcher(#[from] WatcherError),

    #[error("watcher task failed: {0}")]
    Join(#[from] JoinError),
}

/// Connect to the cluster and run until a fatal condition.
pub async fn start(config: &Config) -> Result<Infallible, LifecycleError> {
    let reasons: Vec<&str> = config.policy.rules().iter().map(|r| r.reason.as_str()).collect();
    info!(
        master = config.connect.master.as_deref().unwrap_or("<kubeconfig>"),
        kubeconfig = ?config.connect.kubeconfig,
        watch_timeout_secs = config.watch_timeout.base().as_secs(),
        ?reasons,
        "starting reaper"
    );

    let api = KubePodApi::connect(&config.connect).await?;
    run(api, config.policy.clone(), config.watch_timeout).await
}

/// Run the watcher as a task and the reconciler in place, sharing one channel.
pub async fn run<A: PodApi>(
    api: A,
    policy: EvictionPolicy,
    timeout: WatchTimeout,
) -> Result<Infallible, LifecycleError> {
    let (tx, rx) = delivery_channel();
    let watcher = Watcher::new(api.clone(), policy, timeout, tx);
    let reconciler = Reconciler::new(api);

    let mut watcher_task = tokio::spawn(watcher.run());
    tokio::select! {
        biased;
        joined = &mut watcher_task => joined?.map_err(LifecycleError::from),
        // The receiver only drains once the watcher has dropped its sender.
        () = reconciler.run(rx) => watcher_task.await?.map_err(LifecycleError::from),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

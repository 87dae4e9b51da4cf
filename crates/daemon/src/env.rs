// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::time::Duration;

use reaper_core::EvictionPolicy;
use tracing::warn;

use crate::watcher::{WatchTimeout, DEFAULT_WATCH_TIMEOUT, MAX_WATCH_TIMEOUT};

/// Log filter directive: REAPER_LOG > RUST_LOG > "info"
pub fn log_filter() -> String {
    std::env::var("REAPER_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("RUST_LOG").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "info".to_string())
}

/// Base watch window timeout (default 300s, `REAPER_WATCH_TIMEOUT_SECS`).
///
/// Values above [`MAX_WATCH_TIMEOUT`] are ignored.
pub fn watch_timeout() -> WatchTimeout {
    let base = std::env::var("REAPER_WATCH_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_WATCH_TIMEOUT);
    if base > MAX_WATCH_TIMEOUT {
        warn!(
            secs = base.as_secs(),
            max_secs = MAX_WATCH_TIMEOUT.as_secs(),
            "ignoring REAPER_WATCH_TIMEOUT_SECS"
        );
        return WatchTimeout::default();
    }
    WatchTimeout::new(base)
}

/// Failure reasons that make a failed pod eligible for deletion.
///
/// Comma-separated `REAPER_FAILED_REASONS`; unset or empty means
/// `NodeAffinity` only.
pub fn eviction_policy() -> EvictionPolicy {
    let Some(list) = std::env::var("REAPER_FAILED_REASONS").ok().filter(|s| !s.trim().is_empty())
    else {
        return EvictionPolicy::default();
    };
    EvictionPolicy::parse_reasons(&list).unwrap_or_else(|e| {
        warn!(value = %list, error = %e, "ignoring REAPER_FAILED_REASONS");
        EvictionPolicy::default()
    })
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

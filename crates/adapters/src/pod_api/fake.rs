// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted [`PodApi`] for tests.
//!
//! List responses and watch windows are queued up front and handed out in
//! order. Once a script runs dry the fake answers with a transport error, so
//! a watcher under test reaches its fatal exit instead of spinning forever.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream;
use futures_util::StreamExt;
use parking_lot::Mutex;
use reaper_core::{PodKey, PodSnapshot, ResourceVersion, WatchEvent};

use super::{ApiError, DeleteError, PodApi, PodList, UndecodableEvent, WatchItem, WatchStream};

/// A scripted watch window.
enum Window {
    /// Yields the items, then closes as if the server timeout elapsed.
    Items(Vec<WatchItem>),
    /// Never yields and never closes.
    Stalled,
}

/// Recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Watch { from: ResourceVersion, timeout: Duration },
    Delete(PodKey),
}

#[derive(Default)]
struct FakePodApiState {
    lists: VecDeque<Result<PodList, ApiError>>,
    windows: VecDeque<Result<Window, ApiError>>,
    deletes: HashMap<PodKey, VecDeque<Result<(), DeleteError>>>,
    calls: Vec<ApiCall>,
}

/// Fake pod API for testing
#[derive(Clone, Default)]
pub struct FakePodApi {
    inner: Arc<Mutex<FakePodApiState>>,
}

impl FakePodApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful list response.
    pub fn push_list(&self, pods: Vec<PodSnapshot>, resource_version: &str) -> &Self {
        self.inner
            .lock()
            .lists
            .push_back(Ok(PodList { pods, resource_version: resource_version.into() }));
        self
    }

    pub fn push_list_error(&self, error: ApiError) -> &Self {
        self.inner.lock().lists.push_back(Err(error));
        self
    }

    /// Queue a watch window that yields `events` and then closes normally.
    pub fn push_window(&self, events: Vec<WatchEvent>) -> &Self {
        self.push_window_items(events.into_iter().map(Ok).collect())
    }

    /// Queue a watch window with raw items, including undecodable ones.
    pub fn push_window_items(&self, items: Vec<WatchItem>) -> &Self {
        self.inner.lock().windows.push_back(Ok(Window::Items(items)));
        self
    }

    /// Queue a watch window that stays open forever.
    pub fn push_stalled_window(&self) -> &Self {
        self.inner.lock().windows.push_back(Ok(Window::Stalled));
        self
    }

    /// Queue a failure to establish a watch.
    pub fn push_watch_error(&self, error: ApiError) -> &Self {
        self.inner.lock().windows.push_back(Err(error));
        self
    }

    /// Script the next delete outcome for a pod. Unscripted deletes succeed.
    pub fn push_delete_result(&self, key: PodKey, result: Result<(), DeleteError>) -> &Self {
        self.inner.lock().deletes.entry(key).or_default().push_back(result);
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.lock().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.inner.lock().calls.iter().filter(|c| matches!(c, ApiCall::List)).count()
    }

    /// Resume points of every watch opened, in order.
    pub fn watch_origins(&self) -> Vec<ResourceVersion> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                ApiCall::Watch { from, .. } => Some(from.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<PodKey> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                ApiCall::Delete(key) => Some(key.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Undecodable item helper for scripted windows.
pub fn undecodable(detail: &str) -> WatchItem {
    Err(UndecodableEvent::new(detail))
}

#[async_trait]
impl PodApi for FakePodApi {
    async fn list_pods(&self) -> Result<PodList, ApiError> {
        let mut state = self.inner.lock();
        state.calls.push(ApiCall::List);
        state
            .lists
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("fake: no scripted list".to_string())))
    }

    async fn watch_pods(
        &self,
        from: &ResourceVersion,
        timeout: Duration,
    ) -> Result<WatchStream, ApiError> {
        let mut state = self.inner.lock();
        state.calls.push(ApiCall::Watch { from: from.clone(), timeout });
        let window = state
            .windows
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("fake: no scripted watch".to_string())))?;
        Ok(match window {
            Window::Items(items) => stream::iter(items).boxed(),
            Window::Stalled => stream::pending().boxed(),
        })
    }

    async fn delete_pod(&self, key: &PodKey) -> Result<(), DeleteError> {
        let mut state = self.inner.lock();
        state.calls.push(ApiCall::Delete(key.clone()));
        state.deletes.get_mut(key).and_then(VecDeque::pop_front).unwrap_or(Ok(()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

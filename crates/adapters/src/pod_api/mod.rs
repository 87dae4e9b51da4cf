// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestration API access for pods: list, watch and delete.
//!
//! # Module layout
//!
//! - `k8s`: [`KubePodApi`] backed by a `kube::Client`
//! - `convert`: translation from API objects to core snapshots and events
//! - `fake`: scripted [`FakePodApi`] (feature `test-support`)

mod convert;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;
mod k8s;

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use reaper_core::{PodKey, PodSnapshot, ResourceVersion, WatchError, WatchEvent};
use thiserror::Error;

pub use k8s::{ConnectError, ConnectOptions, KubePodApi};
#[cfg(any(test, feature = "test-support"))]
pub use fake::{undecodable, ApiCall, FakePodApi};

/// Errors from list and watch calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server answered with an error status.
    #[error("{0}")]
    Status(WatchError),

    /// The request never produced a server answer (connection, TLS, decoding).
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// True when the server reported the requested resume point as expired.
    pub fn is_expired(&self) -> bool {
        matches!(self, ApiError::Status(status) if status.is_recoverable())
    }
}

/// Errors from delete calls. `NotFound` is kept apart from everything else.
#[derive(Debug, Clone, Error)]
pub enum DeleteError {
    #[error("pod not found")]
    NotFound,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A watch payload that could not be interpreted as a pod.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undecodable watch event: {detail}")]
pub struct UndecodableEvent {
    pub detail: String,
}

impl UndecodableEvent {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

/// One item of a watch stream: a pod event or a payload to skip.
pub type WatchItem = Result<WatchEvent, UndecodableEvent>;

/// A single watch window. Ends when the server-side timeout closes it.
pub type WatchStream = BoxStream<'static, WatchItem>;

/// Result of a full list: every pod plus the collection's resource version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodList {
    pub pods: Vec<PodSnapshot>,
    pub resource_version: ResourceVersion,
}

/// Pod operations the reaper needs from the orchestration API.
#[async_trait]
pub trait PodApi: Clone + Send + Sync + 'static {
    /// List all pods across all namespaces.
    async fn list_pods(&self) -> Result<PodList, ApiError>;

    /// Open a watch on all pods, starting strictly after `from`.
    ///
    /// `timeout` is passed to the server, which closes the stream once it
    /// elapses.
    async fn watch_pods(
        &self,
        from: &ResourceVersion,
        timeout: Duration,
    ) -> Result<WatchStream, ApiError>;

    /// Delete one pod.
    async fn delete_pod(&self, key: &PodKey) -> Result<(), DeleteError>;
}

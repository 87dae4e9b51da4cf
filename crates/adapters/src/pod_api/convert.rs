// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translation from `k8s-openapi` objects and `kube` watch events into
//! core snapshots and events.

use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::core::{ErrorResponse, WatchEvent as KubeWatchEvent};
use reaper_core::{PodKey, PodPhase, PodSnapshot, ResourceVersion, WatchError, WatchEvent};

use super::{ApiError, UndecodableEvent, WatchItem};

/// Build a snapshot from a pod object.
///
/// Name, namespace and resource version are required; status is optional
/// (a pod without status is `Unknown` with no reason).
pub(super) fn snapshot(pod: &Pod) -> Result<PodSnapshot, UndecodableEvent> {
    let meta = &pod.metadata;
    let name = meta.name.as_deref().ok_or_else(|| UndecodableEvent::new("pod without name"))?;
    let namespace = meta
        .namespace
        .as_deref()
        .ok_or_else(|| UndecodableEvent::new(format!("pod {} without namespace", name)))?;
    let resource_version = meta.resource_version.as_deref().ok_or_else(|| {
        UndecodableEvent::new(format!("pod {}/{} without resource version", namespace, name))
    })?;

    let status = pod.status.as_ref();
    let phase = PodPhase::parse(status.and_then(|s| s.phase.as_deref()));
    let reason = status.and_then(|s| s.reason.clone());

    Ok(PodSnapshot::new(
        PodKey::new(namespace, name),
        phase,
        reason,
        ResourceVersion::from(resource_version),
    ))
}

/// Checkpoint of a list response.
///
/// A watch from an empty version starts at an arbitrary point instead of
/// after the list, so a list without one is an error.
pub(super) fn list_checkpoint(meta: &ListMeta) -> Result<ResourceVersion, ApiError> {
    match meta.resource_version.as_deref() {
        Some(version) if !version.is_empty() => Ok(ResourceVersion::from(version)),
        _ => Err(ApiError::Transport("pod list response without resourceVersion".to_string())),
    }
}

pub(super) fn status_error(resp: &ErrorResponse) -> WatchError {
    WatchError::from_status(&resp.reason, resp.code, &resp.message)
}

impl From<kube::Error> for ApiError {
    fn from(e: kube::Error) -> Self {
        match e {
            kube::Error::Api(resp) => ApiError::Status(status_error(&resp)),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Outcome of decoding one raw stream item.
#[derive(Debug)]
pub(super) enum Decoded {
    Item(WatchItem),
    /// The connection broke mid-stream; the window is over.
    Disconnected(String),
}

pub(super) fn decode(raw: Result<KubeWatchEvent<Pod>, kube::Error>) -> Decoded {
    let event = match raw {
        Ok(event) => event,
        // A status object where an event was expected is an in-band error.
        Err(kube::Error::Api(resp)) => {
            return Decoded::Item(Ok(WatchEvent::Error(status_error(&resp))));
        }
        Err(kube::Error::SerdeError(e)) => {
            return Decoded::Item(Err(UndecodableEvent::new(e.to_string())));
        }
        Err(other) => return Decoded::Disconnected(other.to_string()),
    };

    let item = match event {
        KubeWatchEvent::Added(pod) => snapshot(&pod).map(WatchEvent::Added),
        KubeWatchEvent::Modified(pod) => snapshot(&pod).map(WatchEvent::Modified),
        KubeWatchEvent::Deleted(pod) => snapshot(&pod).map(WatchEvent::Deleted),
        KubeWatchEvent::Error(resp) => Ok(WatchEvent::Error(status_error(&resp))),
        KubeWatchEvent::Bookmark(bookmark) => Err(UndecodableEvent::new(format!(
            "bookmark at {}",
            bookmark.metadata.resource_version
        ))),
    };
    Decoded::Item(item)
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;

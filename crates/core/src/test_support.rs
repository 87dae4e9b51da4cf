// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{PodPhase, PodSnapshot, WatchError, WatchErrorKind, WatchEvent};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for pod snapshots.
pub mod strategies {
    use crate::pod::{PodPhase, PodSnapshot};
    use proptest::prelude::*;

    pub fn arb_phase() -> impl Strategy<Value = PodPhase> {
        prop_oneof![
            Just(PodPhase::Pending),
            Just(PodPhase::Running),
            Just(PodPhase::Succeeded),
            Just(PodPhase::Failed),
            Just(PodPhase::Unknown),
        ]
    }

    pub fn arb_reason() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("NodeAffinity".to_string())),
            Just(Some("Evicted".to_string())),
            "[A-Za-z]{1,12}".prop_map(Some),
        ]
    }

    pub fn arb_snapshot() -> impl Strategy<Value = PodSnapshot> {
        ("[a-z]{1,8}", "[a-z0-9-]{1,12}", arb_phase(), arb_reason(), 1u64..1_000_000).prop_map(
            |(namespace, name, phase, reason, rv)| {
                let builder = PodSnapshot::builder()
                    .namespace(namespace)
                    .name(name)
                    .phase(phase)
                    .resource_version(rv.to_string());
                match reason {
                    Some(r) => builder.reason(r).build(),
                    None => builder.build(),
                }
            },
        )
    }
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn running_pod(name: &str, rv: &str) -> PodSnapshot {
    PodSnapshot::builder().name(name).phase(PodPhase::Running).resource_version(rv).build()
}

pub fn affinity_failed_pod(name: &str, rv: &str) -> PodSnapshot {
    PodSnapshot::builder().name(name).node_affinity_failure().resource_version(rv).build()
}

pub fn added(pod: PodSnapshot) -> WatchEvent {
    WatchEvent::Added(pod)
}

pub fn modified(pod: PodSnapshot) -> WatchEvent {
    WatchEvent::Modified(pod)
}

pub fn deleted(pod: PodSnapshot) -> WatchEvent {
    WatchEvent::Deleted(pod)
}

pub fn expired_error() -> WatchEvent {
    WatchEvent::Error(WatchError::new(WatchErrorKind::Expired, "too old resource version"))
}

pub fn forbidden_error() -> WatchEvent {
    WatchEvent::Error(WatchError::new(WatchErrorKind::Forbidden, "pods is forbidden"))
}

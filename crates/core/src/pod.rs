// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time pod snapshots.
//!
//! A [`PodSnapshot`] is produced by the orchestration API (a list item or a
//! watch event) and is never mutated afterwards. Each new observation of the
//! same pod yields a fresh snapshot.

use std::fmt;

use crate::watch::ResourceVersion;

/// Lifecycle phase reported in a pod's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

crate::simple_display! {
    PodPhase {
        Pending => "Pending",
        Running => "Running",
        Succeeded => "Succeeded",
        Failed => "Failed",
        Unknown => "Unknown",
    }
}

impl PodPhase {
    /// Parse the API's phase string. Absent or unrecognised phases are `Unknown`.
    pub fn parse(phase: Option<&str>) -> Self {
        match phase {
            Some("Pending") => PodPhase::Pending,
            Some("Running") => PodPhase::Running,
            Some("Succeeded") => PodPhase::Succeeded,
            Some("Failed") => PodPhase::Failed,
            _ => PodPhase::Unknown,
        }
    }
}

/// Identity of a pod, stable for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PodKey {
    pub namespace: String,
    pub name: String,
}

impl PodKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into() }
    }
}

impl fmt::Display for PodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Immutable view of one pod at one resource version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSnapshot {
    key: PodKey,
    phase: PodPhase,
    reason: Option<String>,
    resource_version: ResourceVersion,
}

impl PodSnapshot {
    pub fn new(
        key: PodKey,
        phase: PodPhase,
        reason: Option<String>,
        resource_version: ResourceVersion,
    ) -> Self {
        Self { key, phase, reason, resource_version }
    }

    pub fn key(&self) -> &PodKey {
        &self.key
    }

    pub fn namespace(&self) -> &str {
        &self.key.namespace
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn phase(&self) -> PodPhase {
        self.phase
    }

    /// Failure reason from the pod status, if the server reported one.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn resource_version(&self) -> &ResourceVersion {
        &self.resource_version
    }
}

/// Test builder for [`PodSnapshot`].
#[cfg(any(test, feature = "test-support"))]
pub struct PodSnapshotBuilder {
    namespace: String,
    name: String,
    phase: PodPhase,
    reason: Option<String>,
    resource_version: ResourceVersion,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for PodSnapshotBuilder {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            name: "web-0".to_string(),
            phase: PodPhase::Running,
            reason: None,
            resource_version: ResourceVersion::from("1"),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl PodSnapshotBuilder {
    pub fn namespace(mut self, v: impl Into<String>) -> Self {
        self.namespace = v.into();
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = v.into();
        self
    }

    pub fn phase(mut self, v: PodPhase) -> Self {
        self.phase = v;
        self
    }

    pub fn reason(mut self, v: impl Into<String>) -> Self {
        self.reason = Some(v.into());
        self
    }

    pub fn resource_version(mut self, v: impl Into<ResourceVersion>) -> Self {
        self.resource_version = v.into();
        self
    }

    /// Shorthand for a pod that failed on node affinity.
    pub fn node_affinity_failure(self) -> Self {
        self.phase(PodPhase::Failed).reason(crate::policy::NODE_AFFINITY_REASON)
    }

    pub fn build(self) -> PodSnapshot {
        PodSnapshot {
            key: PodKey::new(self.namespace, self.name),
            phase: self.phase,
            reason: self.reason,
            resource_version: self.resource_version,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl PodSnapshot {
    /// Create a builder with test defaults.
    pub fn builder() -> PodSnapshotBuilder {
        PodSnapshotBuilder::default()
    }
}

#[cfg(test)]
#[path = "pod_tests.rs"]
mod tests;

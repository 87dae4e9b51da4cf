// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Eligibility predicate: which pods the reaper deletes.

use thiserror::Error;

use crate::pod::{PodPhase, PodSnapshot};

/// Failure reason the scheduler reports when a pod cannot stay on its node.
pub const NODE_AFFINITY_REASON: &str = "NodeAffinity";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("eviction policy needs at least one failure reason")]
    Empty,
}

/// A single (phase, reason) pair that makes a pod eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictionRule {
    pub phase: PodPhase,
    pub reason: String,
}

/// Set of rules deciding delete-eligibility.
///
/// The default policy matches exactly `(Failed, "NodeAffinity")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictionPolicy {
    rules: Vec<EvictionRule>,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self {
            rules: vec![EvictionRule {
                phase: PodPhase::Failed,
                reason: NODE_AFFINITY_REASON.to_string(),
            }],
        }
    }
}

impl EvictionPolicy {
    pub fn new(rules: Vec<EvictionRule>) -> Result<Self, PolicyError> {
        if rules.is_empty() {
            return Err(PolicyError::Empty);
        }
        Ok(Self { rules })
    }

    /// Policy matching `Failed` pods with any of the given reasons.
    pub fn failed_with_reasons<I, S>(reasons: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules = reasons
            .into_iter()
            .map(|reason| EvictionRule { phase: PodPhase::Failed, reason: reason.into() })
            .collect();
        Self::new(rules)
    }

    /// Parse a comma-separated list of failure reasons (e.g. `NodeAffinity,OutOfcpu`).
    pub fn parse_reasons(list: &str) -> Result<Self, PolicyError> {
        Self::failed_with_reasons(list.split(',').map(str::trim).filter(|r| !r.is_empty()))
    }

    pub fn rules(&self) -> &[EvictionRule] {
        &self.rules
    }

    /// True iff the pod's (phase, reason) matches a rule. Depends on nothing else.
    pub fn is_eligible(&self, pod: &PodSnapshot) -> bool {
        let Some(reason) = pod.reason() else {
            return false;
        };
        self.rules.iter().any(|rule| rule.phase == pod.phase() && rule.reason == reason)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

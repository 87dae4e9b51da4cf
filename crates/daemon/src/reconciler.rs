// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer side of the pipeline: deletes queued pods.
//!
//! A pod may already be gone by the time it is dequeued; that counts as
//! success. Other failures are logged and dropped. A pod that still exists
//! and is still eligible comes back through the next watch or list.

use reaper_adapters::{DeleteError, PodApi};
use reaper_core::PodSnapshot;
use tracing::{info, warn};

use crate::channel::DeliveryReceiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    AlreadyAbsent,
    Failed(String),
}

impl DeletionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, DeletionOutcome::Failed(_))
    }
}

pub struct Reconciler<A: PodApi> {
    api: A,
}

impl<A: PodApi> Reconciler<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Drain the channel until every sender is gone.
    pub async fn run(&self, mut rx: DeliveryReceiver) {
        while let Some(pod) = rx.recv().await {
            self.reconcile(&pod).await;
        }
        info!("delivery channel closed, reconciler stopping");
    }

    /// Issue one delete and log its outcome.
    pub async fn reconcile(&self, pod: &PodSnapshot) -> DeletionOutcome {
        let outcome = match self.api.delete_pod(pod.key()).await {
            Ok(()) => DeletionOutcome::Deleted,
            Err(DeleteError::NotFound) => DeletionOutcome::AlreadyAbsent,
            Err(DeleteError::Api(e)) => DeletionOutcome::Failed(e.to_string()),
        };

        match &outcome {
            DeletionOutcome::Deleted | DeletionOutcome::AlreadyAbsent => info!(
                namespace = pod.namespace(),
                pod = pod.name(),
                already_absent = outcome == DeletionOutcome::AlreadyAbsent,
                "deleted pod"
            ),
            DeletionOutcome::Failed(error) => warn!(
                namespace = pod.namespace(),
                pod = pod.name(),
                %error,
                "failed to delete pod"
            ),
        }
        outcome
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

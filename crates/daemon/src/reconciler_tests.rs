// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::channel::delivery_channel;
use reaper_adapters::{ApiError, FakePodApi};
use reaper_core::test_support::affinity_failed_pod;
use reaper_core::{PodKey, WatchError, WatchErrorKind};

#[tokio::test]
async fn deletes_by_namespace_and_name() {
    let api = FakePodApi::new();
    let pod = affinity_failed_pod("web-0", "5");

    let outcome = Reconciler::new(api.clone()).reconcile(&pod).await;

    assert_eq!(outcome, DeletionOutcome::Deleted);
    assert_eq!(api.deleted(), vec![PodKey::new("default", "web-0")]);
}

#[tokio::test]
async fn not_found_counts_as_success() {
    let api = FakePodApi::new();
    let pod = affinity_failed_pod("gone", "5");
    api.push_delete_result(pod.key().clone(), Err(DeleteError::NotFound));

    let outcome = Reconciler::new(api.clone()).reconcile(&pod).await;

    assert_eq!(outcome, DeletionOutcome::AlreadyAbsent);
    assert!(outcome.is_success());
    assert_eq!(api.deleted().len(), 1, "no retry");
}

#[tokio::test]
async fn api_failure_is_dropped_without_retry() {
    let api = FakePodApi::new();
    let pod = affinity_failed_pod("stuck", "5");
    api.push_delete_result(
        pod.key().clone(),
        Err(DeleteError::Api(ApiError::Status(WatchError::new(
            WatchErrorKind::Forbidden,
            "pods \"stuck\" is forbidden",
        )))),
    );

    let outcome = Reconciler::new(api.clone()).reconcile(&pod).await;

    assert!(matches!(&outcome, DeletionOutcome::Failed(msg) if msg.contains("forbidden")));
    assert!(!outcome.is_success());
    assert_eq!(api.deleted().len(), 1);
}

#[tokio::test]
async fn run_drains_channel_in_order_until_closed() {
    let api = FakePodApi::new();
    let (tx, rx) = delivery_channel();
    for name in ["a", "b", "c"] {
        tx.send(affinity_failed_pod(name, "1")).await.unwrap();
    }
    drop(tx);

    Reconciler::new(api.clone()).run(rx).await;

    let names: Vec<_> = api.deleted().into_iter().map(|k| k.name).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[tokio::test]
async fn run_continues_after_failures() {
    let api = FakePodApi::new();
    let (tx, rx) = delivery_channel();
    let bad = affinity_failed_pod("bad", "1");
    api.push_delete_result(
        bad.key().clone(),
        Err(DeleteError::Api(ApiError::Transport("connection refused".into()))),
    );
    tx.send(bad).await.unwrap();
    tx.send(affinity_failed_pod("good", "2")).await.unwrap();
    drop(tx);

    Reconciler::new(api.clone()).run(rx).await;

    assert_eq!(api.deleted().len(), 2);
}

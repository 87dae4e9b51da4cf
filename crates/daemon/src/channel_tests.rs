// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use reaper_core::test_support::affinity_failed_pod;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;

#[tokio::test]
async fn holds_at_most_capacity_items() {
    let (tx, rx) = delivery_channel();
    for i in 0..DELIVERY_CAPACITY {
        tx.try_send(affinity_failed_pod(&format!("p{}", i), "1")).unwrap();
    }

    let overflow = tx.try_send(affinity_failed_pod("extra", "1"));
    assert!(matches!(overflow, Err(TrySendError::Full(_))));
    assert_eq!(rx.len(), DELIVERY_CAPACITY);
}

#[tokio::test]
async fn send_waits_while_full() {
    let (tx, mut rx) = delivery_channel();
    for i in 0..DELIVERY_CAPACITY {
        tx.send(affinity_failed_pod(&format!("p{}", i), "1")).await.unwrap();
    }

    let blocked =
        tokio::time::timeout(Duration::from_millis(50), tx.send(affinity_failed_pod("x", "1")))
            .await;
    assert!(blocked.is_err(), "send should wait for room");

    rx.recv().await.unwrap();
    tx.send(affinity_failed_pod("x", "1")).await.unwrap();
    assert_eq!(rx.len(), DELIVERY_CAPACITY);
}

#[tokio::test]
async fn preserves_order() {
    let (tx, mut rx) = delivery_channel();
    for name in ["a", "b", "c"] {
        tx.send(affinity_failed_pod(name, "1")).await.unwrap();
    }
    drop(tx);

    let mut names = Vec::new();
    while let Some(pod) = rx.recv().await {
        names.push(pod.name().to_string());
    }
    assert_eq!(names, ["a", "b", "c"]);
}

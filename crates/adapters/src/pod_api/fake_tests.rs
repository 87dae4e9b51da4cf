// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use reaper_core::test_support::{added, running_pod};

#[tokio::test]
async fn scripted_lists_are_served_in_order_then_fail() {
    let api = FakePodApi::new();
    api.push_list(vec![running_pod("a", "1")], "10").push_list(vec![], "20");

    assert_eq!(api.list_pods().await.unwrap().resource_version.as_str(), "10");
    assert_eq!(api.list_pods().await.unwrap().resource_version.as_str(), "20");
    assert!(matches!(api.list_pods().await, Err(ApiError::Transport(_))));
    assert_eq!(api.list_calls(), 3);
}

#[tokio::test]
async fn watch_window_yields_scripted_items() {
    let api = FakePodApi::new();
    api.push_window_items(vec![Ok(added(running_pod("a", "11"))), undecodable("bookmark")]);

    let items: Vec<_> =
        api.watch_pods(&"10".into(), Duration::from_secs(300)).await.unwrap().collect().await;
    assert_eq!(items.len(), 2);
    assert!(items[1].is_err());
    assert_eq!(api.watch_origins(), vec![ResourceVersion::from("10")]);
}

#[tokio::test]
async fn unscripted_delete_succeeds() {
    let api = FakePodApi::new();
    let key = PodKey::new("ns", "gone");
    api.push_delete_result(key.clone(), Err(DeleteError::NotFound));

    assert!(matches!(api.delete_pod(&key).await, Err(DeleteError::NotFound)));
    assert!(api.delete_pod(&key).await.is_ok());
    assert_eq!(api.deleted(), vec![key.clone(), key]);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use reaper_adapters::{ApiError, FakePodApi};
use reaper_core::test_support::{affinity_failed_pod, forbidden_error, running_pod};
use reaper_core::{PodKey, WatchErrorKind};
use serial_test::serial;

#[test]
#[serial]
fn config_read_timeout_outlasts_longest_window() {
    std::env::set_var("REAPER_WATCH_TIMEOUT_SECS", "60");

    let config = Config::load(Some("https://10.0.0.1:6443".into()), None);

    assert_eq!(config.watch_timeout.base(), Duration::from_secs(60));
    assert_eq!(config.connect.read_timeout, Some(Duration::from_secs(150)));
    assert_eq!(config.connect.master.as_deref(), Some("https://10.0.0.1:6443"));
    assert!(config.connect.kubeconfig.is_none());
    std::env::remove_var("REAPER_WATCH_TIMEOUT_SECS");
}

#[test]
#[serial]
fn config_defaults() {
    std::env::remove_var("REAPER_WATCH_TIMEOUT_SECS");
    std::env::remove_var("REAPER_FAILED_REASONS");

    let config = Config::load(None, Some(PathBuf::from("/etc/reaper/kubeconfig")));

    assert_eq!(config.watch_timeout, WatchTimeout::default());
    assert_eq!(config.policy, EvictionPolicy::default());
    assert_eq!(config.connect.read_timeout, Some(Duration::from_secs(630)));
}

#[test]
#[serial]
fn config_ignores_oversized_watch_timeout() {
    std::env::set_var("REAPER_WATCH_TIMEOUT_SECS", "18446744073709551615");

    let config = Config::load(None, None);

    assert_eq!(config.watch_timeout, WatchTimeout::default());
    assert_eq!(config.connect.read_timeout, Some(Duration::from_secs(630)));
    std::env::remove_var("REAPER_WATCH_TIMEOUT_SECS");
}

#[test]
fn run_future_is_send() {
    fn assert_send<T: Send>(_: &T) {}
    let pipeline = run(FakePodApi::new(), EvictionPolicy::default(), WatchTimeout::default());
    assert_send(&pipeline);
}

#[tokio::test]
async fn forbidden_watch_stops_the_daemon() {
    let api = FakePodApi::new();
    api.push_list(vec![running_pod("a", "1")], "10").push_window(vec![forbidden_error()]);

    let err = run(api.clone(), EvictionPolicy::default(), WatchTimeout::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LifecycleError::Watcher(WatcherError::Watch(ref e)) if e.kind == WatchErrorKind::Forbidden
    ));
    assert_eq!(api.list_calls(), 1);
}

#[tokio::test]
async fn list_failure_stops_the_daemon() {
    let api = FakePodApi::new();
    api.push_list_error(ApiError::Transport("connection refused".into()));

    let err = run(api, EvictionPolicy::default(), WatchTimeout::default()).await.unwrap_err();

    assert!(matches!(err, LifecycleError::Watcher(WatcherError::List(_))));
}

#[tokio::test]
async fn eligible_pod_is_deleted_while_watching() {
    let api = FakePodApi::new();
    api.push_list(vec![running_pod("a", "1"), affinity_failed_pod("b", "2")], "10")
        .push_stalled_window();

    let task = tokio::spawn(run(api.clone(), EvictionPolicy::default(), WatchTimeout::default()));
    let deleted = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let deleted = api.deleted();
            if !deleted.is_empty() {
                return deleted;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    assert_eq!(deleted, vec![PodKey::new("default", "b")]);
    assert!(!task.is_finished());
    task.abort();
}

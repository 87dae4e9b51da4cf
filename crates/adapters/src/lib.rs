// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the affinity reaper's external collaborators.

pub mod pod_api;

pub use pod_api::{
    ApiError, ConnectError, ConnectOptions, DeleteError, KubePodApi, PodApi, PodList,
    UndecodableEvent, WatchItem, WatchStream,
};
#[cfg(any(test, feature = "test-support"))]
pub use pod_api::{undecodable, ApiCall, FakePodApi};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reaper-core: domain types for the affinity reaper

pub mod macros;

pub mod pod;
pub mod policy;
pub mod watch;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use pod::PodSnapshotBuilder;
pub use pod::{PodKey, PodPhase, PodSnapshot};
pub use policy::{EvictionPolicy, EvictionRule, PolicyError, NODE_AFFINITY_REASON};
pub use watch::{ResourceVersion, WatchError, WatchErrorKind, WatchEvent};

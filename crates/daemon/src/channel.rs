// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded hand-off from the watcher to the reconciler.
//!
//! Sending waits while the queue is full and receiving waits while it is
//! empty. The watcher's `send` is the only backpressure point in the
//! pipeline: a slow reconciler stalls event consumption instead of growing
//! memory.

use reaper_core::PodSnapshot;
use tokio::sync::mpsc;

/// Maximum number of pods waiting for deletion.
pub const DELIVERY_CAPACITY: usize = 128;

pub type DeliverySender = mpsc::Sender<PodSnapshot>;
pub type DeliveryReceiver = mpsc::Receiver<PodSnapshot>;

/// Create the FIFO delivery channel.
pub fn delivery_channel() -> (DeliverySender, DeliveryReceiver) {
    mpsc::channel(DELIVERY_CAPACITY)
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;

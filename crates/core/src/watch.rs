// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch stream vocabulary: checkpoints, events and in-band errors.

use std::fmt;

use crate::pod::PodSnapshot;

/// Opaque change-history token issued by the API server.
///
/// Used as the watch checkpoint: "state has been observed up to and
/// including this version". The value is never parsed or compared, only
/// handed back to the server when resuming a watch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ResourceVersion(String);

impl ResourceVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResourceVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceVersion {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Category of an error reported in-band on a watch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchErrorKind {
    /// The resume checkpoint fell outside the server's retained history.
    Expired,
    Forbidden,
    Other,
}

crate::simple_display! {
    WatchErrorKind {
        Expired => "Expired",
        Forbidden => "Forbidden",
        Other => "Other",
    }
}

impl WatchErrorKind {
    /// Classify a server status by its reason string and HTTP code.
    ///
    /// `410 Gone` is what the server answers when asked to resume from a
    /// version it no longer retains, so it counts as `Expired` even when the
    /// reason is spelled differently.
    pub fn classify(reason: &str, code: u16) -> Self {
        match (reason, code) {
            ("Expired", _) | (_, 410) => WatchErrorKind::Expired,
            ("Forbidden", _) | (_, 403) => WatchErrorKind::Forbidden,
            _ => WatchErrorKind::Other,
        }
    }
}

/// Error payload carried by a [`WatchEvent::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchError {
    pub kind: WatchErrorKind,
    pub detail: String,
}

impl WatchError {
    pub fn new(kind: WatchErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }

    /// Build from a raw server status.
    pub fn from_status(reason: &str, code: u16, message: &str) -> Self {
        let kind = WatchErrorKind::classify(reason, code);
        let detail = if message.is_empty() {
            format!("{} ({})", reason, code)
        } else {
            format!("{}: {} ({})", reason, message, code)
        };
        Self { kind, detail }
    }

    /// Only an expired checkpoint can be recovered from, by re-listing.
    pub fn is_recoverable(&self) -> bool {
        self.kind == WatchErrorKind::Expired
    }
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watch error [{}]: {}", self.kind, self.detail)
    }
}

impl std::error::Error for WatchError {}

/// One change notification from a watch stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Added(PodSnapshot),
    Modified(PodSnapshot),
    Deleted(PodSnapshot),
    Error(WatchError),
}

crate::simple_display! {
    WatchEvent {
        Added(..) => "ADDED",
        Modified(..) => "MODIFIED",
        Deleted(..) => "DELETED",
        Error(..) => "ERROR",
    }
}

impl WatchEvent {
    /// The pod carried by this event, if it is not an error.
    pub fn pod(&self) -> Option<&PodSnapshot> {
        match self {
            WatchEvent::Added(pod) | WatchEvent::Modified(pod) | WatchEvent::Deleted(pod) => {
                Some(pod)
            }
            WatchEvent::Error(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;

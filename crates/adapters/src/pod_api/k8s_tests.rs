// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn watch_uri_carries_version_and_timeout() {
    let uri = watch_uri(&ResourceVersion::from("12345"), Duration::from_secs(437));
    assert_eq!(uri, "/api/v1/pods?watch=true&resourceVersion=12345&timeoutSeconds=437");
}

#[test]
fn watch_uri_allows_windows_beyond_client_side_cap() {
    let uri = watch_uri(&ResourceVersion::from("1"), Duration::from_secs(599));
    assert!(uri.ends_with("timeoutSeconds=599"));
}

#[test]
fn watch_uri_escapes_opaque_versions() {
    let uri = watch_uri(&ResourceVersion::from("a&b=c"), Duration::from_secs(300));
    assert!(uri.contains("resourceVersion=a%26b%3Dc"));
}


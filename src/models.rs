//! Data models for the bridge domain path report

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Login credentials for the leaf/APIC REST API
#[derive(Clone, Default)]
pub struct Credentials {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated session returned by `aaaLogin`
#[derive(Clone)]
pub struct Session {
    pub token: String,
}

impl Session {
    /// Cookie header value carried on every class read.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", crate::config::SESSION_COOKIE_NAME, self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// One bridge domain with its EPG membership and path total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Full DN of the bridge domain (e.g., "uni/tn-t1/BD-b1")
    pub dn: String,
    /// Configured multi-destination flood action (bd-flood, encap-flood, drop)
    pub flood_action: String,
    /// EPG DNs attached to this BD, in fetch order
    pub endpoint_groups: Vec<String>,
    /// Static + dynamic paths across all EPGs of this BD
    pub total_paths: u64,
}

impl Segment {
    pub fn new(dn: String, flood_action: String) -> Self {
        Self {
            dn,
            flood_action,
            endpoint_groups: Vec::new(),
            total_paths: 0,
        }
    }
}

/// What went wrong with a skipped or suspicious record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyKind {
    MissingField,
    MalformedReference,
    UnknownSegment,
    DuplicateSegment,
}

/// A record skipped (or overridden) during correlation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inconsistency {
    pub class: String,
    pub kind: InconsistencyKind,
    pub detail: String,
}

/// Records read per class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchCounts {
    pub segments: usize,
    pub endpoint_group_links: usize,
    pub interface_connections: usize,
}

/// Final, immutable outcome of one correlation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// Bridge domains in fetch order
    pub segments: Vec<Segment>,
    /// Path tallies for EPGs that belong to no registered BD (not counted anywhere)
    pub unattributed_paths: BTreeMap<String, u64>,
    pub inconsistencies: Vec<Inconsistency>,
    pub fetched: FetchCounts,
}

impl SegmentReport {
    pub fn segment(&self, dn: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.dn == dn)
    }
}

/// Display row: one per bridge domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub flood_action: String,
    pub endpoint_group_count: usize,
    pub total_paths: u64,
}

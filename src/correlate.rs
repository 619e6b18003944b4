//! Bridge domain / EPG / path correlation
//!
//! Three collections are joined by DN:
//! 1. `fvBDDef` registers one [`Segment`] per bridge domain.
//! 2. `fvEpP` attaches each EPG to the BD named inside its `bdDefDn`.
//! 3. `fvIfConn` is tallied per EPG (the EPG DN sits in the first bracket
//!    pair of the connection DN), then the tallies are summed per BD.
//!
//! Bad records never abort the pass: they are skipped and listed in
//! [`SegmentReport::inconsistencies`].

use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::apic::classes::{
    ATTR_BD_DN, ATTR_BD_REF, ATTR_DN, ATTR_EPG_KEY, ATTR_FLOOD_ACTION, BD_DEF, EP_P, IF_CONN,
};
use crate::dn::bracketed_segment;
use crate::error::ApicError;
use crate::extract::{find_first, require_str};
use crate::models::{FetchCounts, Inconsistency, InconsistencyKind, Segment, SegmentReport};

/// Accumulates the three join phases; [`finish`](Self::finish) runs the final
/// path join and freezes the result.
#[derive(Debug, Default)]
pub struct SegmentTableBuilder {
    segments: Vec<Segment>,
    index: HashMap<String, usize>,
    path_tally: BTreeMap<String, u64>,
    inconsistencies: Vec<Inconsistency>,
    fetched: FetchCounts,
}

impl SegmentTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: one entry per `fvBDDef` record.
    pub fn register_segments(&mut self, records: &[Value]) {
        self.fetched.segments += records.len();

        for record in records {
            let parsed = require_str(record, ATTR_BD_DN, BD_DEF).and_then(|dn| {
                require_str(record, ATTR_FLOOD_ACTION, BD_DEF).map(|action| (dn, action))
            });

            let (dn, flood_action) = match parsed {
                Ok(fields) => fields,
                Err(e) => {
                    self.skip(BD_DEF, InconsistencyKind::MissingField, record, &e);
                    continue;
                }
            };

            match self.index.get(dn) {
                Some(&idx) => {
                    // Later record wins, like a plain map insert.
                    self.segments[idx].flood_action = flood_action.to_string();
                    self.note(
                        BD_DEF,
                        InconsistencyKind::DuplicateSegment,
                        format!("bridge domain {} listed more than once", dn),
                    );
                }
                None => {
                    self.index.insert(dn.to_string(), self.segments.len());
                    self.segments
                        .push(Segment::new(dn.to_string(), flood_action.to_string()));
                }
            }
        }
    }

    /// Phase 2: attach each `fvEpP` EPG to the BD embedded in `bdDefDn`.
    pub fn attach_endpoint_groups(&mut self, records: &[Value]) {
        self.fetched.endpoint_group_links += records.len();

        for record in records {
            let bd_ref = match require_str(record, ATTR_BD_REF, EP_P) {
                Ok(v) => v,
                Err(e) => {
                    self.skip(EP_P, InconsistencyKind::MissingField, record, &e);
                    continue;
                }
            };
            let bd_dn = match bracketed_segment(bd_ref) {
                Ok(v) => v,
                Err(e) => {
                    self.skip(EP_P, InconsistencyKind::MalformedReference, record, &e);
                    continue;
                }
            };
            let epg = match require_str(record, ATTR_EPG_KEY, EP_P) {
                Ok(v) => v,
                Err(e) => {
                    self.skip(EP_P, InconsistencyKind::MissingField, record, &e);
                    continue;
                }
            };

            match self.index.get(bd_dn) {
                Some(&idx) => self.segments[idx].endpoint_groups.push(epg.to_string()),
                None => {
                    let err = ApicError::ReferenceInconsistency {
                        kind: "bridge domain".to_string(),
                        reference: bd_dn.to_string(),
                    };
                    self.skip(EP_P, InconsistencyKind::UnknownSegment, record, &err);
                }
            }
        }
    }

    /// Phase 3: count `fvIfConn` records per embedded EPG DN.
    pub fn tally_paths(&mut self, records: &[Value]) {
        self.fetched.interface_connections += records.len();

        for record in records {
            let epg = require_str(record, ATTR_DN, IF_CONN).and_then(bracketed_segment);
            match epg {
                Ok(epg) => *self.path_tally.entry(epg.to_string()).or_insert(0) += 1,
                Err(e) => {
                    let kind = if find_first(record, ATTR_DN).is_some() {
                        InconsistencyKind::MalformedReference
                    } else {
                        InconsistencyKind::MissingField
                    };
                    self.skip(IF_CONN, kind, record, &e);
                }
            }
        }
    }

    /// Final join: every BD gets the tallies of the EPGs in its membership list.
    ///
    /// Tallies for EPGs listed under no BD are kept aside in
    /// `unattributed_paths` and added to nothing.
    pub fn finish(mut self) -> SegmentReport {
        // segments × tally; fine for the tens-to-hundreds of objects a leaf holds.
        for segment in &mut self.segments {
            for (epg, count) in &self.path_tally {
                if segment.endpoint_groups.contains(epg) {
                    segment.total_paths += count;
                }
            }
        }

        let attached: HashSet<&str> = self
            .segments
            .iter()
            .flat_map(|s| s.endpoint_groups.iter().map(String::as_str))
            .collect();
        let unattributed_paths: BTreeMap<String, u64> = self
            .path_tally
            .iter()
            .filter(|(epg, _)| !attached.contains(epg.as_str()))
            .map(|(epg, count)| (epg.clone(), *count))
            .collect();

        if !unattributed_paths.is_empty() {
            crate::log_warn!(
                "{} path(s) reference {} EPG(s) not attached to any bridge domain; left out of totals",
                unattributed_paths.values().sum::<u64>(),
                unattributed_paths.len()
            );
        }

        SegmentReport {
            segments: self.segments,
            unattributed_paths,
            inconsistencies: self.inconsistencies,
            fetched: self.fetched,
        }
    }

    fn skip(&mut self, class: &str, kind: InconsistencyKind, record: &Value, err: &ApicError) {
        let record_dn = find_first(record, ATTR_DN)
            .and_then(Value::as_str)
            .unwrap_or("<no dn>");
        self.note(class, kind, format!("skipped {}: {}", record_dn, err));
    }

    fn note(&mut self, class: &str, kind: InconsistencyKind, detail: String) {
        crate::log_warn!("{}: {}", class, detail);
        self.inconsistencies.push(Inconsistency {
            class: class.to_string(),
            kind,
            detail,
        });
    }
}

/// Run all three phases over already-fetched collections.
pub fn correlate(bd_defs: &[Value], epg_links: &[Value], if_conns: &[Value]) -> SegmentReport {
    let mut builder = SegmentTableBuilder::new();
    builder.register_segments(bd_defs);
    builder.attach_endpoint_groups(epg_links);
    builder.tally_paths(if_conns);
    builder.finish()
}

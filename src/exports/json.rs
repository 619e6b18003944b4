//! JSON export of the full report

use crate::exports::report_rows;
use crate::models::{FetchCounts, Inconsistency, ReportRow, SegmentReport};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON export format
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub export_date: String,
    pub host: &'a str,
    pub total_bridge_domains: usize,
    pub total_paths: u64,
    pub rows: Vec<ReportRow>,
    pub unattributed_paths: &'a BTreeMap<String, u64>,
    pub inconsistencies: &'a [Inconsistency],
    pub fetched: &'a FetchCounts,
}

/// Export the report to pretty JSON; rows use the same order as the table.
pub fn export_report_json(report: &SegmentReport, host: &str, dn_prefix: &str) -> Result<String> {
    let rows = report_rows(report, dn_prefix);
    let export = ReportExport {
        export_date: chrono::Utc::now().to_rfc3339(),
        host,
        total_bridge_domains: rows.len(),
        total_paths: rows.iter().map(|r| r.total_paths).sum(),
        rows,
        unattributed_paths: &report.unattributed_paths,
        inconsistencies: &report.inconsistencies,
        fetched: &report.fetched,
    };

    let json = serde_json::to_string_pretty(&export)?;
    Ok(json)
}

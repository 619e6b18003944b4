//! Report output
//!
//! Text table (default), plus JSON and CSV exports

pub mod csv;
pub mod json;
pub mod table;

pub use self::csv::*;
pub use json::*;
pub use table::*;

use crate::dn::short_name;
use crate::models::{ReportRow, SegmentReport};

/// Column headers shared by the table and CSV outputs
pub const HEADERS: [&str; 4] = ["BD Name", "MultiDstFlood", "N.of EPG(s)", "Total paths"];

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// One row per BD, most paths first; ties by name.
pub fn report_rows(report: &SegmentReport, dn_prefix: &str) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = report
        .segments
        .iter()
        .map(|s| ReportRow {
            name: short_name(&s.dn, dn_prefix).to_string(),
            flood_action: s.flood_action.clone(),
            endpoint_group_count: s.endpoint_groups.len(),
            total_paths: s.total_paths,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_paths
            .cmp(&a.total_paths)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

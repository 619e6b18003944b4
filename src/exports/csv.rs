//! CSV export of the report rows

use crate::exports::HEADERS;
use crate::models::ReportRow;
use anyhow::Result;
use csv::Writer;

/// Export rows (already ordered) to CSV
pub fn export_rows_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);

    writer.write_record(HEADERS)?;

    for row in rows {
        let epg_count = row.endpoint_group_count.to_string();
        let total_paths = row.total_paths.to_string();
        writer.write_record([
            row.name.as_str(),
            row.flood_action.as_str(),
            epg_count.as_str(),
            total_paths.as_str(),
        ])?;
    }

    let csv_data = String::from_utf8(writer.into_inner()?)?;
    Ok(csv_data)
}

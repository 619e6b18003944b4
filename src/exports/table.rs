//! Aligned text table
//!
//! Same layout as the usual box-drawn CLI table: BD name right-aligned,
//! everything else left-aligned.

use crate::exports::HEADERS;
use crate::models::ReportRow;

enum Align {
    Left,
    Right,
}

const ALIGNS: [Align; 4] = [Align::Right, Align::Left, Align::Left, Align::Left];

/// Render rows (already ordered) as a bordered table.
pub fn render_table(rows: &[ReportRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.flood_action.clone(),
                r.endpoint_group_count.to_string(),
                r.total_paths.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let mut out = Vec::with_capacity(cells.len() + 4);
    out.push(border.clone());
    out.push(format_line(&HEADERS.map(str::to_string), &widths, true));
    out.push(border.clone());
    for row in &cells {
        out.push(format_line(row, &widths, false));
    }
    out.push(border);
    out.join("\n")
}

fn format_line(cells: &[String; 4], widths: &[usize; 4], header: bool) -> String {
    let mut line = String::from("|");
    for ((cell, width), align) in cells.iter().zip(widths.iter().copied()).zip(ALIGNS.iter()) {
        let padded = match (header, align) {
            (true, _) => format!("{:^width$}", cell, width = width),
            (false, Align::Right) => format!("{:>width$}", cell, width = width),
            (false, Align::Left) => format!("{:<width$}", cell, width = width),
        };
        line.push(' ');
        line.push_str(&padded);
        line.push_str(" |");
    }
    line
}

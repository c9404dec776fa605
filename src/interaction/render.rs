//! Rendering of the ordered queue for the desk.

use crate::base::types::{AppointmentRequest, QueueRow, Res};

const HEADERS: [&str; 5] = ["#", "ID", "Name", "Priority", "Submitted"];

/// Turns the serving order into display rows.
pub fn rows(ordered: &[AppointmentRequest], timestamp_format: &str) -> Vec<QueueRow> {
    ordered
        .iter()
        .enumerate()
        .map(|(i, request)| QueueRow {
            position: i + 1,
            patient_id: request.patient_id().to_string(),
            display_name: request.display_name().to_string(),
            priority: request.priority().value(),
            priority_label: request.priority().label().to_string(),
            submitted_at: request.submitted_at().format(timestamp_format).to_string(),
        })
        .collect()
}

/// Plain-text table with one line per row.
pub fn table(rows: &[QueueRow]) -> String {
    if rows.is_empty() {
        return "No patients waiting.".to_string();
    }

    let cells = rows
        .iter()
        .map(|row| [row.position.to_string(), row.patient_id.clone(), row.display_name.clone(), row.priority_label.clone(), row.submitted_at.clone()])
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |line: &[String]| {
        line.iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = format_line(HEADERS.map(String::from).as_slice());
    let rule = widths.map(|w| "-".repeat(w)).join("  ");

    std::iter::once(header)
        .chain(std::iter::once(rule))
        .chain(cells.iter().map(|line| format_line(line.as_slice())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rows as pretty JSON.
pub fn json(rows: &[QueueRow]) -> Res<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

// Tests.

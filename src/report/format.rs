//! Presentation formatting for the dashboard pages.

use super::{AvailabilityRow, Timeline, NO_METRICS_SENTINEL};

/// Sentinel shown when the status history holds no records.
pub const NO_RECORDS_SENTINEL: &str = "No device records available";

const TABLE_HEADER: &str = "<thead>\n<tr>\
<th>DEVICE_NAME</th>\
<th>SUCCESSFUL_ATTEMPTS</th>\
<th>TOTAL_ATTEMPTS</th>\
<th>AVAILABILITY</th>\
</tr>\n</thead>";

/// Render ranked availability rows as an HTML table.
///
/// Percentages are rounded to one decimal and suffixed with `%` here,
/// strictly after ranking; the rows' numeric output is not touched.
/// Device names are wrapped in `<strong>`; any further escaping is the
/// caller's concern. Empty input renders the literal no-records
/// sentinel.
pub fn render_availability_table(rows: &[AvailabilityRow]) -> String {
    if rows.is_empty() {
        return NO_RECORDS_SENTINEL.to_string();
    }

    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td></tr>",
                row.device_name,
                row.successful_attempts,
                row.total_attempts,
                format_percent(row.availability_percent),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<table class=\"table table-striped table-sm\" id=\"availTable\">\n{}\n<tbody>\n{}\n</tbody>\n</table>",
        TABLE_HEADER, body
    )
}

/// Format an availability percentage for display.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Render a projected timeline as a chart-ready JSON series, or the
/// no-metrics sentinel when nothing has been recorded.
pub fn render_timeline_series(timeline: &Timeline) -> String {
    match timeline {
        Timeline::NoData => NO_METRICS_SENTINEL.to_string(),
        Timeline::Series(points) => {
            serde_json::to_string(points).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

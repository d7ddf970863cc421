//! Availability aggregation over the persisted status history.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::db::StatusRecord;

/// One ranked availability row, derived from the full history.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityRow {
    pub device_name: String,
    pub successful_attempts: u64,
    pub total_attempts: u64,
    /// Unrounded percentage; rounding is presentation-only.
    pub availability_percent: f64,
}

/// Aggregate the status history into ranked availability rows.
///
/// Records are grouped by device display name, not id. Devices that
/// share a name are merged into one row; default generation allows
/// that, and it is kept as observable behavior rather than silently
/// switching to id-based grouping.
///
/// Rows are sorted by the unrounded percentage, best first. Ties keep
/// first-seen group order, which is stable but unspecified.
pub fn aggregate(history: &[StatusRecord]) -> Vec<AvailabilityRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<AvailabilityRow> = Vec::new();

    for record in history {
        let i = *index.entry(record.name.as_str()).or_insert_with(|| {
            rows.push(AvailabilityRow {
                device_name: record.name.clone(),
                successful_attempts: 0,
                total_attempts: 0,
                availability_percent: 0.0,
            });
            rows.len() - 1
        });

        rows[i].total_attempts += 1;
        if record.up {
            rows[i].successful_attempts += 1;
        }
    }

    // Percentages are derived only after grouping completes.
    for row in &mut rows {
        row.availability_percent =
            row.successful_attempts as f64 / row.total_attempts as f64 * 100.0;
    }

    rows.sort_by(|a, b| {
        b.availability_percent
            .partial_cmp(&a.availability_percent)
            .unwrap_or(Ordering::Equal)
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(name: &str, up: bool) -> StatusRecord {
        StatusRecord {
            device_id: 0,
            name: name.to_string(),
            address: "192.168.0.0".to_string(),
            up,
            time: Utc::now(),
        }
    }

    #[test]
    fn test_empty_history_yields_no_rows() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_groups_by_name_and_ranks_best_first() {
        let history = vec![record("A", true), record("A", false), record("B", true)];
        let rows = aggregate(&history);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].device_name, "B");
        assert_eq!(rows[0].successful_attempts, 1);
        assert_eq!(rows[0].total_attempts, 1);
        assert_eq!(rows[0].availability_percent, 100.0);

        assert_eq!(rows[1].device_name, "A");
        assert_eq!(rows[1].successful_attempts, 1);
        assert_eq!(rows[1].total_attempts, 2);
        assert_eq!(rows[1].availability_percent, 50.0);
    }

    #[test]
    fn test_devices_sharing_a_name_are_merged() {
        let mut a = record("Router_1", true);
        a.device_id = 1;
        let mut b = record("Router_1", false);
        b.device_id = 2;

        let rows = aggregate(&[a, b]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_attempts, 2);
        assert_eq!(rows[0].successful_attempts, 1);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let history = vec![record("X", true), record("Y", true)];
        let rows = aggregate(&history);
        assert_eq!(rows[0].device_name, "X");
        assert_eq!(rows[1].device_name, "Y");
    }

    #[test]
    fn test_ranking_uses_unrounded_percentages() {
        // 6666/10000 = 66.66% and 667/1000 = 66.7% both display as
        // "66.7%", but ranking happens before any rounding.
        let mut history = Vec::new();
        for i in 0..10_000 {
            history.push(record("Coarse", i < 6666));
        }
        for i in 0..1_000 {
            history.push(record("Fine", i < 667));
        }

        let rows = aggregate(&history);
        assert_eq!(rows[0].device_name, "Fine");
        assert_eq!(rows[1].device_name, "Coarse");
        assert!(rows[0].availability_percent > rows[1].availability_percent);
        assert_eq!(
            crate::report::format_percent(rows[0].availability_percent),
            crate::report::format_percent(rows[1].availability_percent)
        );
    }

    #[test]
    fn test_counts_never_exceed_totals() {
        let history = vec![
            record("A", true),
            record("A", true),
            record("A", false),
            record("B", false),
        ];
        for row in aggregate(&history) {
            assert!(row.successful_attempts <= row.total_attempts);
        }
    }
}

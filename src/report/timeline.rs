//! System metrics timeline projection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::MetricRecord;

/// Sentinel shown when no system metrics have been recorded yet.
pub const NO_METRICS_SENTINEL: &str = "no system metrics yet";

/// One chart point on the request timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub time: DateTime<Utc>,
    pub endpoint: String,
    pub success: bool,
}

/// A projected timeline, or an explicit no-data marker.
///
/// An empty log projects to `NoData` rather than an empty series so
/// the presentation layer can tell "nothing recorded yet" apart from
/// "zero events in the series".
#[derive(Debug, Clone, PartialEq)]
pub enum Timeline {
    NoData,
    Series(Vec<TimelinePoint>),
}

/// Project the operational log into a time-ordered chart series.
pub fn project(entries: &[MetricRecord]) -> Timeline {
    if entries.is_empty() {
        return Timeline::NoData;
    }

    let mut points: Vec<TimelinePoint> = entries
        .iter()
        .map(|e| TimelinePoint {
            time: e.time,
            endpoint: e.endpoint.clone(),
            success: e.success,
        })
        .collect();

    points.sort_by_key(|p| p.time);

    Timeline::Series(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(endpoint: &str, success: bool, secs: i64) -> MetricRecord {
        MetricRecord {
            endpoint: endpoint.to_string(),
            status_code: if success { 200 } else { 500 },
            success,
            time: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_log_projects_to_no_data() {
        assert_eq!(project(&[]), Timeline::NoData);
    }

    #[test]
    fn test_points_are_ordered_by_timestamp() {
        let entries = vec![
            entry("/metrics", false, 30),
            entry("/devices", true, 10),
            entry("/devices", true, 20),
        ];

        match project(&entries) {
            Timeline::Series(points) => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[0].endpoint, "/devices");
                assert!(points.windows(2).all(|w| w[0].time <= w[1].time));
            }
            Timeline::NoData => panic!("expected a series"),
        }
    }

    #[test]
    fn test_recorded_failures_are_ordinary_points() {
        let entries = vec![entry("/devices", false, 1)];
        match project(&entries) {
            Timeline::Series(points) => {
                assert!(!points[0].success);
            }
            Timeline::NoData => panic!("expected a series"),
        }
    }
}

//! HTTP request handlers.

use super::AppState;
use crate::report::{
    aggregate, project, render_availability_table, render_timeline_series, Timeline,
    NO_METRICS_SENTINEL,
};
use crate::sim::StatusSample;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};

// ============================================================================
// Templates (simple string replacement)
// ============================================================================

const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");
const METRICS_TEMPLATE: &str = include_str!("templates/metrics.html");

// ============================================================================
// Device status feed
// ============================================================================

/// Poll every device once and return the fresh samples as JSON.
///
/// An empty fleet returns an empty array with 200, which callers can
/// tell apart from a fetch failure. Like the pages, every feed request
/// is recorded to the operational log.
pub async fn handle_devices(State(state): State<AppState>) -> impl IntoResponse {
    let mut rng = rand::thread_rng();
    let samples: Vec<StatusSample> = state.fleet.iter().map(|d| d.snapshot(&mut rng)).collect();
    record_page_view(&state, "/devices", 200, true);
    Json(samples)
}

// ============================================================================
// Pages
// ============================================================================

pub async fn handle_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let table = match state.store.get_status_records() {
        Ok(history) => render_availability_table(&aggregate(&history)),
        Err(e) => {
            record_page_view(&state, "/", 500, false);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    record_page_view(&state, "/", 200, true);

    let content = DASHBOARD_TEMPLATE.replace("{{avail_table}}", &table);
    let page = LAYOUT_TEMPLATE
        .replace("{{title}}", "FleetPulse Dashboard")
        .replace("{{content}}", &content);

    Html(page).into_response()
}

pub async fn handle_metrics_page(State(state): State<AppState>) -> impl IntoResponse {
    let timeline = match state.store.get_metrics() {
        Ok(entries) => project(&entries),
        Err(e) => {
            record_page_view(&state, "/metrics", 500, false);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    record_page_view(&state, "/metrics", 200, true);

    let system_chart = match &timeline {
        Timeline::NoData => format!("<p>{}</p>", NO_METRICS_SENTINEL),
        Timeline::Series(_) => format!(
            "<div id=\"timelineChart\"></div>\n<script>const series = {};</script>",
            render_timeline_series(&timeline)
        ),
    };

    let content = METRICS_TEMPLATE.replace("{{system_chart}}", &system_chart);
    let page = LAYOUT_TEMPLATE
        .replace("{{title}}", "FleetPulse System Metrics")
        .replace("{{content}}", &content);

    Html(page).into_response()
}

/// Record a page view in the operational log. Best effort: a logging
/// failure must not take the page down with it.
fn record_page_view(state: &AppState, endpoint: &str, status_code: u16, success: bool) {
    if let Err(e) = state.store.log_metric(endpoint, status_code, success) {
        tracing::warn!("Failed to record page view for {}: {}", endpoint, e);
    }
}

// ============================================================================
// API: Availability and timeline
// ============================================================================

pub async fn handle_availability(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.get_status_records() {
        Ok(history) => Json(aggregate(&history)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

pub async fn handle_timeline(State(state): State<AppState>) -> impl IntoResponse {
    let timeline = match state.store.get_metrics() {
        Ok(entries) => project(&entries),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    match timeline {
        Timeline::NoData => {
            Json(serde_json::json!({ "sentinel": NO_METRICS_SENTINEL })).into_response()
        }
        Timeline::Series(points) => Json(points).into_response(),
    }
}

// ============================================================================
// Static Assets
// ============================================================================

pub async fn handle_favicon() -> impl IntoResponse {
    // Return a simple SVG favicon
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <circle cx="50" cy="50" r="45" fill="#2e8b57"/>
        <path d="M20 55 L35 55 L42 35 L52 70 L60 55 L80 55" stroke="white" stroke-width="4" fill="none"/>
    </svg>"##;

    (
        [(axum::http::header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::db::Store;
    use crate::sim;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn state_with_fleet(count: u32) -> (AppState, NamedTempFile) {
        let tmp = NamedTempFile::new().unwrap();
        let store = Arc::new(Store::new(tmp.path()).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        let fleet = sim::generate(count, sim::DEFAULT_NAME_POOL, "10.0.0.", None, &mut rng)
            .unwrap();
        let state = AppState {
            config: ServerConfig::default(),
            store,
            fleet: Arc::new(fleet),
        };
        (state, tmp)
    }

    #[tokio::test]
    async fn test_device_feed_requests_are_logged() {
        let (state, _tmp) = state_with_fleet(3);

        let resp = handle_devices(State(state.clone())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let metrics = state.store.get_metrics().unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].endpoint, "/devices");
        assert_eq!(metrics[0].status_code, 200);
        assert!(metrics[0].success);
    }

    #[tokio::test]
    async fn test_empty_fleet_feed_is_an_empty_array() {
        let (state, _tmp) = state_with_fleet(0);

        let resp = handle_devices(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"[]");
    }
}

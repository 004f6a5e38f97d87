use std::net::SocketAddr;

use crate::intent::IntentKind;
use crate::model::DialogKind;

// ── RED metrics (turn-driven) ───────────────────────────────────

/// Counter: total turns processed. Labels: activity.
pub const TURNS_TOTAL: &str = "leavedesk_turns_total";

/// Counter: recognized message turns routed. Labels: intent.
pub const INTENTS_TOTAL: &str = "leavedesk_intents_total";

/// Histogram: turn latency in seconds.
pub const TURN_DURATION_SECONDS: &str = "leavedesk_turn_duration_seconds";

/// Counter: waterfall dialogs begun. Labels: dialog.
pub const DIALOGS_STARTED_TOTAL: &str = "leavedesk_dialogs_started_total";

/// Counter: waterfall dialogs ended (completed or preempted). Labels: dialog.
pub const DIALOGS_ENDED_TOTAL: &str = "leavedesk_dialogs_ended_total";

/// Counter: ledger commits. Labels: category.
pub const LEDGER_COMMITS_TOTAL: &str = "leavedesk_ledger_commits_total";

/// Counter: attempts rejected by quota or duplicate rules. Labels: category.
pub const QUOTA_REJECTIONS_TOTAL: &str = "leavedesk_quota_rejections_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: active TCP connections.
pub const CONNECTIONS_ACTIVE: &str = "leavedesk_connections_active";

/// Counter: total connections accepted.
pub const CONNECTIONS_TOTAL: &str = "leavedesk_connections_total";

/// Counter: connections rejected due to limit.
pub const CONNECTIONS_REJECTED_TOTAL: &str = "leavedesk_connections_rejected_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map an intent to a short label for metrics.
pub fn intent_label(intent: IntentKind) -> &'static str {
    match intent {
        IntentKind::ListPublicHolidays => "list_public_holidays",
        IntentKind::ListFlexibleHolidays => "list_flexible_holidays",
        IntentKind::LeaveRequest => "leave_request",
        IntentKind::SubmittedRequests => "submitted_requests",
        IntentKind::Unrecognized => "unrecognized",
    }
}

/// Map a dialog kind to a short label for metrics.
pub fn dialog_label(kind: DialogKind) -> &'static str {
    match kind {
        DialogKind::Flexible => "flexible",
        DialogKind::LeaveRequest => "leave_request",
    }
}

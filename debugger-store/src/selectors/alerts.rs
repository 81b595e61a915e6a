use std::collections::BTreeMap;

use debugger_types::{Alert, AlertType, AlertsBreakdown, LoadState};

use crate::state::DebuggerState;

pub fn alerts_loaded(state: &DebuggerState) -> &LoadState {
    &state.alerts.alerts_loaded
}

pub fn alerts_focus_type(state: &DebuggerState) -> Option<AlertType> {
    state.alerts.focus_type
}

pub fn num_alerts(state: &DebuggerState) -> u64 {
    state.alerts.num_alerts
}

pub fn alerts_breakdown(state: &DebuggerState) -> &AlertsBreakdown {
    &state.alerts.alerts_breakdown
}

/// Count reported by the backend breakdown, independent of what is loaded.
pub fn num_alerts_of_focused_type(state: &DebuggerState) -> u64 {
    state
        .alerts
        .focus_type
        .and_then(|alert_type| state.alerts.alerts_breakdown.get(&alert_type))
        .copied()
        .unwrap_or(0)
}

/// Loaded alerts of the focused type keyed by alert ordinal.
pub fn loaded_alerts_of_focused_type(state: &DebuggerState) -> Option<&BTreeMap<usize, Alert>> {
    state
        .alerts
        .focus_type
        .and_then(|alert_type| state.alerts.alerts.get(&alert_type))
}

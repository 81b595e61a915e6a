//! Anomaly alerts, indexed by type and correlated to the execution timeline

use std::collections::BTreeMap;

use debugger_types::{Alert, AlertType, AlertsBreakdown, LoadState};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertsState {
    pub alerts_loaded: LoadState,
    pub num_alerts: u64,
    pub alerts_breakdown: AlertsBreakdown,
    /// Alert type -> alert ordinal -> alert.
    pub alerts: BTreeMap<AlertType, BTreeMap<usize, Alert>>,
    /// Alert type -> alert ordinal -> top-level execution index.
    pub execution_indices: BTreeMap<AlertType, BTreeMap<usize, u64>>,
    pub focus_type: Option<AlertType>,
}

/// One batch of alerts of a single type
#[derive(Debug, Clone, PartialEq)]
pub struct AlertsBatch {
    pub alert_type: AlertType,
    pub begin: usize,
    pub alerts: Vec<Alert>,
    pub num_alerts: u64,
    pub alerts_breakdown: AlertsBreakdown,
}

impl AlertsState {
    pub fn requested(&mut self) {
        self.alerts_loaded.loading();
    }

    pub fn request_failed(&mut self) {
        self.alerts_loaded.failed();
    }

    pub fn summary_loaded(&mut self, num_alerts: u64, alerts_breakdown: AlertsBreakdown, now_ms: i64) {
        self.alerts_loaded.loaded(now_ms);
        self.num_alerts = num_alerts;
        self.alerts_breakdown = alerts_breakdown;
    }

    /// Merges a batch and returns the execution index to center the timeline
    /// on, which is only produced by the first numeric-instability batch.
    pub fn batch_loaded(&mut self, batch: AlertsBatch, now_ms: i64) -> Option<u64> {
        let AlertsBatch {
            alert_type,
            begin,
            alerts,
            num_alerts,
            alerts_breakdown,
        } = batch;

        let center_on = if alert_type == AlertType::InfNan && begin == 0 {
            alerts.first().and_then(Alert::execution_index)
        } else {
            None
        };

        let indices = self.execution_indices.entry(alert_type).or_default();
        let by_index = self.alerts.entry(alert_type).or_default();
        for (offset, alert) in alerts.into_iter().enumerate() {
            let Some(alert_index) = begin.checked_add(offset) else {
                break;
            };
            if let Some(execution_index) = alert.execution_index() {
                indices.insert(alert_index, execution_index);
            }
            // An index that is already known keeps its first record.
            by_index.entry(alert_index).or_insert(alert);
        }

        self.alerts_loaded.loaded(now_ms);
        self.num_alerts = num_alerts;
        self.alerts_breakdown = alerts_breakdown;
        center_on
    }

    /// Toggles the focused type and returns the execution index of the first
    /// alert of a newly focused type, when known.
    pub fn toggle_focus(&mut self, alert_type: AlertType) -> Option<u64> {
        if self.focus_type == Some(alert_type) {
            self.focus_type = None;
            return None;
        }
        self.focus_type = Some(alert_type);
        self.execution_indices
            .get(&alert_type)
            .and_then(|indices| indices.get(&0))
            .copied()
    }

    pub fn execution_indices_of(&self, alert_type: AlertType) -> impl Iterator<Item = u64> + '_ {
        self.execution_indices
            .get(&alert_type)
            .into_iter()
            .flat_map(|indices| indices.values().copied())
    }
}

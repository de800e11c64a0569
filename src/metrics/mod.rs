//! Derived plan metrics and planner operation counters.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::logging::{json_kv, LogEvent, LogLevel};
use crate::state::AppState;

/// Aggregate mass figures derived from a plan snapshot.
///
/// Archived materials are excluded from every total; a material counts as
/// reused once at least one committed placement references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassMetrics {
    pub total_mass: f64,
    pub reused_mass: f64,
    pub reuse_percent: u32,
    pub mass_by_category: BTreeMap<String, f64>,
}

/// Compute the mass metrics for the current plan. Deterministic: a fixed
/// state always produces identical output.
pub fn compute_metrics(state: &AppState) -> MassMetrics {
    let placed_materials: HashSet<&str> = state
        .placed
        .iter()
        .map(|p| p.material_id.as_str())
        .collect();

    let mut total_mass = 0.0;
    let mut reused_mass = 0.0;
    let mut mass_by_category = BTreeMap::new();

    for material in state.materials.iter().filter(|m| !m.is_archived()) {
        let lot = material.lot_mass();
        total_mass += lot;
        if placed_materials.contains(material.id.as_str()) {
            reused_mass += lot;
        }
        *mass_by_category
            .entry(material.category.to_string())
            .or_insert(0.0) += lot;
    }

    let reuse_percent = if total_mass > 0.0 {
        (reused_mass / total_mass * 100.0).round() as u32
    } else {
        0
    };

    MassMetrics {
        total_mass,
        reused_mass,
        reuse_percent,
        mass_by_category,
    }
}

/// Saturating counters for planner activity, shared behind a mutex by the
/// embedding layer.
#[derive(Debug, Default, Clone)]
pub struct PlannerMetrics {
    actions: u64,
    placements: u64,
    rejections: u64,
    removals: u64,
    store_syncs: u64,
    store_failures: u64,
}

impl PlannerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_action(&mut self) {
        self.actions = self.actions.saturating_add(1);
    }

    pub fn record_placement(&mut self) {
        self.placements = self.placements.saturating_add(1);
    }

    pub fn record_rejection(&mut self) {
        self.rejections = self.rejections.saturating_add(1);
    }

    pub fn record_removal(&mut self) {
        self.removals = self.removals.saturating_add(1);
    }

    pub fn record_store_sync(&mut self) {
        self.store_syncs = self.store_syncs.saturating_add(1);
    }

    pub fn record_store_failure(&mut self) {
        self.store_failures = self.store_failures.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            actions: self.actions,
            placements: self.placements,
            rejections: self.rejections,
            removals: self.removals,
            store_syncs: self.store_syncs,
            store_failures: self.store_failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub actions: u64,
    pub placements: u64,
    pub rejections: u64,
    pub removals: u64,
    pub store_syncs: u64,
    pub store_failures: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target,
            "planner_metrics",
            [
                json_kv("actions", json!(self.actions)),
                json_kv("placements", json!(self.placements)),
                json_kv("rejections", json!(self.rejections)),
                json_kv("removals", json!(self.removals)),
                json_kv("store_syncs", json!(self.store_syncs)),
                json_kv("store_failures", json!(self.store_failures)),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Footprint, PlacedItem, Rotation};

    fn place_for(state: &mut AppState, material_id: &str) {
        let id = state.next_placed_id();
        state.placed.push(PlacedItem {
            id,
            suggestion_id: format!("s1-{material_id}"),
            material_id: material_id.to_string(),
            x: 0,
            y: 0,
            rotation: Rotation::R0,
            footprint: Footprint::new(1, 1),
        });
    }

    #[test]
    fn archived_materials_are_excluded() {
        let state = AppState::seed();
        let metrics = compute_metrics(&state);
        // m4, m11 and m18 are archived in the seed set.
        let archived: f64 = state
            .materials
            .iter()
            .filter(|m| m.is_archived())
            .map(|m| m.lot_mass())
            .sum();
        let all: f64 = state.materials.iter().map(|m| m.lot_mass()).sum();
        assert_eq!(metrics.total_mass, all - archived);
        assert_eq!(metrics.reused_mass, 0.0);
        assert_eq!(metrics.reuse_percent, 0);
    }

    #[test]
    fn single_material_reuse_reaches_full_percent() {
        let mut state = AppState::seed();
        state.materials.retain(|m| m.id == "m1");
        place_for(&mut state, "m1");
        let metrics = compute_metrics(&state);
        assert_eq!(metrics.total_mass, 300.0);
        assert_eq!(metrics.reused_mass, 300.0);
        assert_eq!(metrics.reuse_percent, 100);
    }

    #[test]
    fn multiple_placements_count_material_once() {
        let mut state = AppState::seed();
        state.materials.retain(|m| m.id == "m1");
        place_for(&mut state, "m1");
        place_for(&mut state, "m1");
        assert_eq!(compute_metrics(&state).reused_mass, 300.0);
    }

    #[test]
    fn empty_plan_yields_zero_percent() {
        let mut state = AppState::seed();
        state.materials.clear();
        let metrics = compute_metrics(&state);
        assert_eq!(metrics.total_mass, 0.0);
        assert_eq!(metrics.reuse_percent, 0);
        assert!(metrics.mass_by_category.is_empty());
    }

    #[test]
    fn category_totals_sum_to_total() {
        let state = AppState::seed();
        let metrics = compute_metrics(&state);
        let by_category: f64 = metrics.mass_by_category.values().sum();
        assert!((by_category - metrics.total_mass).abs() < 1e-9);
    }

    #[test]
    fn metrics_are_deterministic() {
        let mut state = AppState::seed();
        place_for(&mut state, "m1");
        assert_eq!(compute_metrics(&state), compute_metrics(&state));
    }

    #[test]
    fn counters_saturate_into_snapshot() {
        let mut metrics = PlannerMetrics::new();
        metrics.record_action();
        metrics.record_action();
        metrics.record_placement();
        metrics.record_store_failure();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.actions, 2);
        assert_eq!(snapshot.placements, 1);
        assert_eq!(snapshot.store_failures, 1);
        let event = snapshot.to_log_event("reuse::planner.metrics");
        assert_eq!(event.fields["actions"], json!(2));
    }
}

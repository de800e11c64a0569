//! Planner facade driven by the embedding UI layer.
//!
//! Owns the plan document and serializes every user-driven operation:
//! each call applies one pure action to the state, records metrics, emits
//! a structured log event, and fire-and-forget syncs the persistence
//! store. Store failures are logged and swallowed; they never roll back
//! the in-memory transition.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::json;

use crate::catalog::Suggestion;
use crate::error::{PlanError, Result};
use crate::grid::{Grid, PlacedItem, PlacementError};
use crate::logging::{json_kv, LogEvent, LogLevel, Logger};
use crate::material::{Material, MaterialCategory};
use crate::metrics::{compute_metrics, MassMetrics, PlannerMetrics};
use crate::state::AppState;
use crate::store::StateStore;

pub mod actions;

pub use actions::{MaterialPatch, PlanAction, PlanEffect};

/// Configuration knobs for the planner facade.
#[derive(Clone, Default)]
pub struct PlannerConfig {
    /// Optional structured logger used for planner events.
    pub logger: Option<Logger>,
    /// Operation counters shared with the embedding layer.
    pub metrics: Option<Arc<Mutex<PlannerMetrics>>>,
}

impl PlannerConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(PlannerMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<PlannerMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Export document bundling the plan with its derived metrics.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    pub materials: Vec<Material>,
    pub placed: Vec<PlacedItem>,
    pub metrics: MassMetrics,
}

pub struct Planner {
    state: AppState,
    grid: Grid,
    store: Box<dyn StateStore>,
    config: PlannerConfig,
    last_sync: Option<blake3::Hash>,
}

impl Planner {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self::with_config(store, PlannerConfig::default())
    }

    pub fn with_config(store: Box<dyn StateStore>, config: PlannerConfig) -> Self {
        let mut planner = Self {
            state: AppState::seed(),
            grid: Grid::default(),
            store,
            config,
            last_sync: None,
        };
        planner.hydrate();
        planner
    }

    /// Load the persisted plan document, falling back to the seed plan.
    /// A stored document wins outright; otherwise the onboarding flag
    /// decides whether introductory guidance shows.
    fn hydrate(&mut self) {
        match self.store.load_state() {
            Ok(Some(state)) => {
                self.state = state;
                self.log_planner_event(LogLevel::Info, "state_hydrated", std::iter::empty());
            }
            Ok(None) => {
                let suppressed = self.store.onboarding_suppressed().unwrap_or(false);
                self.state.ui.show_onboarding = !suppressed;
            }
            Err(err) => {
                self.log_planner_event(
                    LogLevel::Warn,
                    "hydration_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
            }
        }
    }

    pub fn config_mut(&mut self) -> &mut PlannerConfig {
        &mut self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    // ── External interface ─────────────────────────────────────────────

    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        category: MaterialCategory,
        mass_kg: f64,
        qty: u32,
        notes: Option<String>,
    ) -> Material {
        let effect = self.dispatch_infallible(PlanAction::AddMaterial {
            name: name.into(),
            category,
            mass_kg,
            qty,
            notes,
        });
        match effect {
            PlanEffect::MaterialAdded(material) => material,
            other => unreachable!("add_material produced {other:?}"),
        }
    }

    pub fn update_material(&mut self, id: &str, patch: MaterialPatch) -> Option<Material> {
        match self.dispatch_infallible(PlanAction::UpdateMaterial {
            id: id.to_string(),
            patch,
        }) {
            PlanEffect::MaterialUpdated(material) => Some(material),
            _ => None,
        }
    }

    pub fn archive_material(&mut self, id: &str) {
        self.dispatch_infallible(PlanAction::ArchiveMaterial { id: id.to_string() });
    }

    /// Generate and cache the suggestion list for a material.
    pub fn select_material(&mut self, id: &str) -> Vec<Suggestion> {
        match self.dispatch_infallible(PlanAction::SelectMaterial {
            id: Some(id.to_string()),
        }) {
            PlanEffect::SuggestionsGenerated(suggestions) => suggestions,
            _ => Vec::new(),
        }
    }

    pub fn clear_selection(&mut self) {
        self.dispatch_infallible(PlanAction::SelectMaterial { id: None });
    }

    /// Idempotent: re-accepting an id already in the toolbox is a no-op.
    pub fn accept_suggestion(&mut self, suggestion: Suggestion) {
        self.dispatch_infallible(PlanAction::AcceptSuggestion { suggestion });
    }

    pub fn place(&mut self, suggestion: &Suggestion, x: u16, y: u16) -> Result<PlacedItem> {
        let effect = self.dispatch(PlanAction::Place {
            suggestion: suggestion.clone(),
            x,
            y,
        })?;
        match effect {
            PlanEffect::Placed(item) => Ok(item),
            other => unreachable!("place produced {other:?}"),
        }
    }

    /// Returns `Ok(None)` when the id is unknown.
    pub fn move_item(&mut self, id: &str, x: u16, y: u16) -> Result<Option<PlacedItem>> {
        let effect = self.dispatch(PlanAction::Move {
            id: id.to_string(),
            x,
            y,
        })?;
        match effect {
            PlanEffect::Moved(item) => Ok(Some(item)),
            _ => Ok(None),
        }
    }

    /// Returns `Ok(None)` when the id is unknown.
    pub fn rotate(&mut self, id: &str) -> Result<Option<PlacedItem>> {
        let effect = self.dispatch(PlanAction::Rotate { id: id.to_string() })?;
        match effect {
            PlanEffect::Rotated(item) => Ok(Some(item)),
            _ => Ok(None),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.dispatch_infallible(PlanAction::Remove { id: id.to_string() });
    }

    pub fn select_placed(&mut self, id: Option<&str>) {
        self.dispatch_infallible(PlanAction::SelectPlaced {
            id: id.map(str::to_string),
        });
    }

    pub fn hide_onboarding(&mut self, dont_show_again: bool) {
        self.dispatch_infallible(PlanAction::HideOnboarding);
        if dont_show_again {
            if let Err(err) = self.store.suppress_onboarding() {
                self.log_planner_event(
                    LogLevel::Warn,
                    "onboarding_flag_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
            }
        }
    }

    pub fn compute_metrics(&self) -> MassMetrics {
        compute_metrics(&self.state)
    }

    pub fn export_snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            materials: self.state.materials.clone(),
            placed: self.state.placed.clone(),
            metrics: self.compute_metrics(),
        }
    }

    /// Pretty JSON rendering of the snapshot for external download.
    pub fn export_snapshot_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export_snapshot()).map_err(PlanError::from)
    }

    /// Restore the seed plan and drop both persisted keys.
    pub fn reset_all(&mut self) {
        let _ = actions::apply(&mut self.state, &self.grid, PlanAction::Reset);
        self.record_metrics(|m| m.record_action());
        if let Err(err) = self.store.clear() {
            self.record_metrics(|m| m.record_store_failure());
            self.log_planner_event(
                LogLevel::Warn,
                "store_clear_failed",
                [json_kv("error", json!(err.to_string()))],
            );
        }
        self.last_sync = None;
        self.log_planner_event(LogLevel::Info, "plan_reset", std::iter::empty());
    }

    // ── Dispatch plumbing ──────────────────────────────────────────────

    fn dispatch(&mut self, action: PlanAction) -> Result<PlanEffect> {
        let label = Self::describe_action(&action);
        match actions::apply(&mut self.state, &self.grid, action) {
            Ok(effect) => {
                self.finish_action(label, &effect);
                Ok(effect)
            }
            Err(err) => {
                self.record_metrics(|m| {
                    m.record_action();
                    m.record_rejection();
                });
                self.log_planner_event(
                    LogLevel::Debug,
                    "action_rejected",
                    [
                        json_kv("action", json!(label)),
                        json_kv("reason", json!(Self::describe_rejection(err))),
                    ],
                );
                Err(err.into())
            }
        }
    }

    fn dispatch_infallible(&mut self, action: PlanAction) -> PlanEffect {
        match self.dispatch(action) {
            Ok(effect) => effect,
            Err(_) => unreachable!("infallible action rejected"),
        }
    }

    fn finish_action(&mut self, label: &'static str, effect: &PlanEffect) {
        self.record_metrics(|m| {
            m.record_action();
            match effect {
                PlanEffect::Placed(_) => m.record_placement(),
                PlanEffect::Removed { .. } => m.record_removal(),
                _ => {}
            }
        });
        self.log_planner_event(
            LogLevel::Debug,
            "action_applied",
            [
                json_kv("action", json!(label)),
                json_kv("effect", json!(Self::describe_effect(effect))),
            ],
        );
        self.sync_store();
    }

    /// Serialize and persist the plan, skipping the write when the
    /// document is unchanged since the last successful sync.
    fn sync_store(&mut self) {
        let serialized = match serde_json::to_vec(&self.state) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.record_metrics(|m| m.record_store_failure());
                self.log_planner_event(
                    LogLevel::Warn,
                    "store_sync_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
                return;
            }
        };

        let hash = blake3::hash(&serialized);
        if self.last_sync == Some(hash) {
            return;
        }

        match self.store.save_state(&self.state) {
            Ok(()) => {
                self.last_sync = Some(hash);
                self.record_metrics(|m| m.record_store_sync());
            }
            Err(err) => {
                self.record_metrics(|m| m.record_store_failure());
                self.log_planner_event(
                    LogLevel::Warn,
                    "store_sync_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
            }
        }
    }

    fn record_metrics(&self, record: impl FnOnce(&mut PlannerMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn log_planner_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = LogEvent::with_fields(level, "reuse::planner", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn describe_action(action: &PlanAction) -> &'static str {
        match action {
            PlanAction::AddMaterial { .. } => "add_material",
            PlanAction::UpdateMaterial { .. } => "update_material",
            PlanAction::ArchiveMaterial { .. } => "archive_material",
            PlanAction::SelectMaterial { .. } => "select_material",
            PlanAction::AcceptSuggestion { .. } => "accept_suggestion",
            PlanAction::Place { .. } => "place",
            PlanAction::Move { .. } => "move",
            PlanAction::Rotate { .. } => "rotate",
            PlanAction::Remove { .. } => "remove",
            PlanAction::SelectPlaced { .. } => "select_placed",
            PlanAction::HideOnboarding => "hide_onboarding",
            PlanAction::Reset => "reset",
        }
    }

    fn describe_effect(effect: &PlanEffect) -> &'static str {
        match effect {
            PlanEffect::MaterialAdded(_) => "material_added",
            PlanEffect::MaterialUpdated(_) => "material_updated",
            PlanEffect::MaterialArchived(_) => "material_archived",
            PlanEffect::SuggestionsGenerated(_) => "suggestions_generated",
            PlanEffect::SuggestionAccepted { .. } => "suggestion_accepted",
            PlanEffect::Placed(_) => "placed",
            PlanEffect::Moved(_) => "moved",
            PlanEffect::Rotated(_) => "rotated",
            PlanEffect::Removed { .. } => "removed",
            PlanEffect::PlacedSelected(_) => "placed_selected",
            PlanEffect::OnboardingHidden => "onboarding_hidden",
            PlanEffect::ResetApplied => "reset_applied",
            PlanEffect::Noop => "noop",
        }
    }

    fn describe_rejection(err: PlacementError) -> &'static str {
        match err {
            PlacementError::OutOfBounds => "out_of_bounds",
            PlacementError::Collision => "collision",
        }
    }
}

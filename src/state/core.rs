use serde::{Deserialize, Serialize};

use crate::catalog::Suggestion;
use crate::grid::PlacedItem;
use crate::material::{seed_materials, Material};

/// Selection and guidance flags owned by the embedding UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub show_onboarding: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_material_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_placed_id: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_onboarding: true,
            selected_material_id: None,
            selected_placed_id: None,
        }
    }
}

/// The single-owner plan document every operation reads and replaces.
///
/// `suggestions` is a cache of the last selection's generator output, not
/// source-of-truth data; it is rebuilt on every selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub materials: Vec<Material>,
    pub suggestions: Vec<Suggestion>,
    pub toolbox: Vec<Suggestion>,
    pub placed: Vec<PlacedItem>,
    pub ui: UiState,
    #[serde(default = "default_material_seq")]
    pub next_material_seq: u64,
    #[serde(default = "default_placed_seq")]
    pub next_placed_seq: u64,
}

// Seed ids run m1..m20; fresh ids continue after them.
fn default_material_seq() -> u64 {
    21
}

fn default_placed_seq() -> u64 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self::seed()
    }
}

impl AppState {
    /// A fresh plan over the seed inventory.
    pub fn seed() -> Self {
        Self {
            materials: seed_materials(),
            suggestions: Vec::new(),
            toolbox: Vec::new(),
            placed: Vec::new(),
            ui: UiState::default(),
            next_material_seq: default_material_seq(),
            next_placed_seq: default_placed_seq(),
        }
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.iter_mut().find(|m| m.id == id)
    }

    pub fn placed_item(&self, id: &str) -> Option<&PlacedItem> {
        self.placed.iter().find(|p| p.id == id)
    }

    /// Whether any committed placement still references the material.
    pub fn has_placement_for(&self, material_id: &str) -> bool {
        self.placed.iter().any(|p| p.material_id == material_id)
    }

    pub fn next_material_id(&mut self) -> String {
        let id = format!("m{}", self.next_material_seq);
        self.next_material_seq += 1;
        id
    }

    pub fn next_placed_id(&mut self) -> String {
        let id = format!("p{}", self.next_placed_seq);
        self.next_placed_seq += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_starts_clean() {
        let state = AppState::seed();
        assert_eq!(state.materials.len(), 20);
        assert!(state.toolbox.is_empty());
        assert!(state.placed.is_empty());
        assert!(state.ui.show_onboarding);
    }

    #[test]
    fn id_counters_are_monotonic() {
        let mut state = AppState::seed();
        assert_eq!(state.next_material_id(), "m21");
        assert_eq!(state.next_material_id(), "m22");
        assert_eq!(state.next_placed_id(), "p1");
        assert_eq!(state.next_placed_id(), "p2");
    }

    #[test]
    fn state_document_round_trips() {
        let mut state = AppState::seed();
        state.ui.selected_material_id = Some("m1".to_string());
        let json = serde_json::to_string(&state).unwrap();
        let parsed: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn missing_counters_default_past_seed_ids() {
        // Documents persisted before counters existed still hydrate.
        let json = r#"{
            "materials": [],
            "suggestions": [],
            "toolbox": [],
            "placed": [],
            "ui": { "showOnboarding": false }
        }"#;
        let mut parsed: AppState = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.next_material_id(), "m21");
        assert_eq!(parsed.next_placed_id(), "p1");
    }
}

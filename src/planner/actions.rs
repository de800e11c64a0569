//! Pure transition functions over the plan document.
//!
//! Every mutation the planner performs is expressed as one [`PlanAction`]
//! applied atomically to an [`AppState`]: validation happens before any
//! write, so a rejected action leaves the document untouched. Lookup
//! misses degrade to [`PlanEffect::Noop`] rather than failing.

use crate::catalog::{self, Suggestion};
use crate::grid::{Candidate, Grid, PlacedItem, PlacementError, Rotation};
use crate::material::{Material, MaterialCategory, MaterialStatus};
use crate::state::AppState;

/// One user-driven mutation of the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    AddMaterial {
        name: String,
        category: MaterialCategory,
        mass_kg: f64,
        qty: u32,
        notes: Option<String>,
    },
    UpdateMaterial {
        id: String,
        patch: MaterialPatch,
    },
    ArchiveMaterial {
        id: String,
    },
    SelectMaterial {
        id: Option<String>,
    },
    AcceptSuggestion {
        suggestion: Suggestion,
    },
    Place {
        suggestion: Suggestion,
        x: u16,
        y: u16,
    },
    Move {
        id: String,
        x: u16,
        y: u16,
    },
    Rotate {
        id: String,
    },
    Remove {
        id: String,
    },
    SelectPlaced {
        id: Option<String>,
    },
    HideOnboarding,
    Reset,
}

/// Field edits applied to an existing material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub category: Option<MaterialCategory>,
    pub mass_kg: Option<f64>,
    pub qty: Option<u32>,
    pub notes: Option<String>,
}

/// What an applied action changed, for callers, logging and metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEffect {
    MaterialAdded(Material),
    MaterialUpdated(Material),
    MaterialArchived(String),
    SuggestionsGenerated(Vec<Suggestion>),
    SuggestionAccepted {
        suggestion_id: String,
        already_present: bool,
    },
    Placed(PlacedItem),
    Moved(PlacedItem),
    Rotated(PlacedItem),
    Removed {
        placed_id: String,
        suggestion_restored: bool,
    },
    PlacedSelected(Option<String>),
    OnboardingHidden,
    ResetApplied,
    Noop,
}

/// Apply one action to the plan document.
///
/// The only failures are placement rejections; on `Err` the state is
/// guaranteed unchanged.
pub fn apply(
    state: &mut AppState,
    grid: &Grid,
    action: PlanAction,
) -> Result<PlanEffect, PlacementError> {
    match action {
        PlanAction::AddMaterial {
            name,
            category,
            mass_kg,
            qty,
            notes,
        } => Ok(add_material(state, name, category, mass_kg, qty, notes)),
        PlanAction::UpdateMaterial { id, patch } => Ok(update_material(state, &id, patch)),
        PlanAction::ArchiveMaterial { id } => Ok(archive_material(state, &id)),
        PlanAction::SelectMaterial { id } => Ok(select_material(state, id)),
        PlanAction::AcceptSuggestion { suggestion } => Ok(accept_suggestion(state, suggestion)),
        PlanAction::Place { suggestion, x, y } => place(state, grid, suggestion, x, y),
        PlanAction::Move { id, x, y } => move_item(state, grid, &id, x, y),
        PlanAction::Rotate { id } => rotate_item(state, grid, &id),
        PlanAction::Remove { id } => Ok(remove_item(state, &id)),
        PlanAction::SelectPlaced { id } => {
            state.ui.selected_placed_id = id.clone();
            Ok(PlanEffect::PlacedSelected(id))
        }
        PlanAction::HideOnboarding => {
            state.ui.show_onboarding = false;
            Ok(PlanEffect::OnboardingHidden)
        }
        PlanAction::Reset => {
            *state = AppState::seed();
            Ok(PlanEffect::ResetApplied)
        }
    }
}

fn add_material(
    state: &mut AppState,
    name: String,
    category: MaterialCategory,
    mass_kg: f64,
    qty: u32,
    notes: Option<String>,
) -> PlanEffect {
    let material = Material {
        id: state.next_material_id(),
        name,
        category,
        mass_kg,
        qty,
        status: MaterialStatus::New,
        notes,
    };
    state.materials.push(material.clone());
    PlanEffect::MaterialAdded(material)
}

fn update_material(state: &mut AppState, id: &str, patch: MaterialPatch) -> PlanEffect {
    let Some(material) = state.material_mut(id) else {
        return PlanEffect::Noop;
    };
    if let Some(name) = patch.name {
        material.name = name;
    }
    if let Some(category) = patch.category {
        material.category = category;
    }
    if let Some(mass_kg) = patch.mass_kg {
        material.mass_kg = mass_kg;
    }
    if let Some(qty) = patch.qty {
        material.qty = qty;
    }
    if let Some(notes) = patch.notes {
        material.notes = Some(notes);
    }
    PlanEffect::MaterialUpdated(material.clone())
}

fn archive_material(state: &mut AppState, id: &str) -> PlanEffect {
    let Some(material) = state.material_mut(id) else {
        return PlanEffect::Noop;
    };
    // Terminal state; existing toolbox and placed entries stay as they are.
    material.status = MaterialStatus::Archived;
    PlanEffect::MaterialArchived(id.to_string())
}

fn select_material(state: &mut AppState, id: Option<String>) -> PlanEffect {
    let suggestions = match id.as_deref() {
        Some(id) => catalog::generate(&state.materials, id),
        None => Vec::new(),
    };
    state.suggestions = suggestions.clone();
    state.ui.selected_material_id = id;
    PlanEffect::SuggestionsGenerated(suggestions)
}

fn accept_suggestion(state: &mut AppState, suggestion: Suggestion) -> PlanEffect {
    if state.toolbox.iter().any(|s| s.id == suggestion.id) {
        return PlanEffect::SuggestionAccepted {
            suggestion_id: suggestion.id,
            already_present: true,
        };
    }

    // Conditional transition: only a material still `new` becomes planned,
    // so duplicate accepts for the same material cannot re-transition it.
    if let Some(material) = state.material_mut(&suggestion.material_id) {
        if material.status == MaterialStatus::New {
            material.status = MaterialStatus::Planned;
        }
    }

    let suggestion_id = suggestion.id.clone();
    state.toolbox.push(suggestion);
    PlanEffect::SuggestionAccepted {
        suggestion_id,
        already_present: false,
    }
}

fn place(
    state: &mut AppState,
    grid: &Grid,
    suggestion: Suggestion,
    x: u16,
    y: u16,
) -> Result<PlanEffect, PlacementError> {
    let candidate = Candidate {
        x,
        y,
        footprint: suggestion.footprint,
    };
    grid.validate(&state.placed, candidate, None)?;

    let item = PlacedItem {
        id: state.next_placed_id(),
        suggestion_id: suggestion.id.clone(),
        material_id: suggestion.material_id.clone(),
        x,
        y,
        rotation: Rotation::R0,
        footprint: suggestion.footprint,
    };

    state.toolbox.retain(|s| s.id != suggestion.id);
    if let Some(material) = state.material_mut(&suggestion.material_id) {
        if material.status == MaterialStatus::Planned {
            material.status = MaterialStatus::Placed;
        }
    }
    state.placed.push(item.clone());
    Ok(PlanEffect::Placed(item))
}

fn move_item(
    state: &mut AppState,
    grid: &Grid,
    id: &str,
    x: u16,
    y: u16,
) -> Result<PlanEffect, PlacementError> {
    let Some(index) = state.placed.iter().position(|p| p.id == id) else {
        return Ok(PlanEffect::Noop);
    };
    let candidate = Candidate {
        x,
        y,
        footprint: state.placed[index].footprint,
    };
    grid.validate(&state.placed, candidate, Some(id))?;

    let item = &mut state.placed[index];
    item.x = x;
    item.y = y;
    Ok(PlanEffect::Moved(item.clone()))
}

fn rotate_item(state: &mut AppState, grid: &Grid, id: &str) -> Result<PlanEffect, PlacementError> {
    let Some(index) = state.placed.iter().position(|p| p.id == id) else {
        return Ok(PlanEffect::Noop);
    };

    let current = &state.placed[index];
    let next = current.rotation.next();
    // Footprint swaps exactly when crossing between the upright {0,180}
    // and sideways {90,270} classes.
    let footprint = if current.rotation.is_sideways() != next.is_sideways() {
        current.footprint.rotated()
    } else {
        current.footprint
    };
    let candidate = Candidate {
        x: current.x,
        y: current.y,
        footprint,
    };
    grid.validate(&state.placed, candidate, Some(id))?;

    let item = &mut state.placed[index];
    item.rotation = next;
    item.footprint = footprint;
    Ok(PlanEffect::Rotated(item.clone()))
}

fn remove_item(state: &mut AppState, id: &str) -> PlanEffect {
    let Some(index) = state.placed.iter().position(|p| p.id == id) else {
        return PlanEffect::Noop;
    };
    let item = state.placed.remove(index);

    let mut suggestion_restored = false;
    if let Some(suggestion) = catalog::resolve(&state.materials, &item.suggestion_id) {
        if !state.toolbox.iter().any(|s| s.id == suggestion.id) {
            state.toolbox.push(suggestion);
            suggestion_restored = true;
        }
    }

    // Revert only when no other placement still references the material,
    // and never out of the archived state.
    if !state.has_placement_for(&item.material_id) {
        if let Some(material) = state.material_mut(&item.material_id) {
            if material.status == MaterialStatus::Placed {
                material.status = MaterialStatus::Planned;
            }
        }
    }

    PlanEffect::Removed {
        placed_id: item.id,
        suggestion_restored,
    }
}

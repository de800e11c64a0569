//! State module orchestrator following the RSB module specification.

mod core;

pub use core::{AppState, UiState};

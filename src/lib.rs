//! Planning core for a habitat waste-reuse workbench.
//!
//! The crate owns the in-memory plan document and the logic around it:
//! the material inventory and its lifecycle, the category-keyed reuse
//! suggestion catalog, and the grid placement engine with bounds and
//! collision validation. An embedding UI layer drives everything through
//! the [`Planner`] facade; rendering, input handling and chrome live
//! outside this crate.

pub mod catalog;
pub mod error;
pub mod grid;
pub mod logging;
pub mod material;
pub mod metrics;
pub mod planner;
pub mod state;
pub mod store;

pub use catalog::{generate, resolve, templates_for, Benefit, Effort, Suggestion, Template};
pub use error::{PlanError, Result};
pub use grid::{
    Candidate, Footprint, Grid, PlacedItem, PlacementError, Rotation, DEFAULT_GRID_CELLS,
};
pub use logging::{
    json_kv, FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError,
    LoggingResult, MemorySink,
};
pub use material::{seed_materials, Material, MaterialCategory, MaterialStatus};
pub use metrics::{compute_metrics, MassMetrics, MetricSnapshot, PlannerMetrics};
pub use planner::{
    MaterialPatch, PlanAction, PlanEffect, PlanSnapshot, Planner, PlannerConfig,
};
pub use state::{AppState, UiState};
pub use store::{
    JsonFileStore, MemoryStore, StateStore, StoreError, StoreResult, ONBOARDING_KEY, STATE_KEY,
};

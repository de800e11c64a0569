//! Grid module orchestrator following the RSB module specification.
//!
//! Downstream code imports placement types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use core::{Candidate, Footprint, Grid, PlacedItem, PlacementError, Rotation, DEFAULT_GRID_CELLS};

//! Material module orchestrator following the RSB module specification.

mod core;

pub use core::{seed_materials, Material, MaterialCategory, MaterialStatus};

//! Catalog module orchestrator following the RSB module specification.
//!
//! The catalog is the static table of pre-authored reuse templates, keyed
//! by material category, plus the pure generator that stamps them onto a
//! concrete material.

mod core;

pub use core::{generate, resolve, templates_for, Benefit, Effort, Suggestion, Template};

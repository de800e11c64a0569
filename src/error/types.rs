use thiserror::Error;

use crate::grid::PlacementError;
use crate::store::StoreError;

/// Unified result type for the planning core.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors surfaced by the planning core.
///
/// Placement rejections are the only expected domain failures; store and
/// serialization errors only reach callers through explicit export paths,
/// never through state transitions.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("placement rejected: {0}")]
    Placement(#[from] PlacementError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

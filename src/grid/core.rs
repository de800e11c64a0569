use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default side length of the square habitat floor plan, in cells.
pub const DEFAULT_GRID_CELLS: u16 = 10;

/// Rejection kinds surfaced when a candidate placement cannot commit.
///
/// Both are recoverable and expected; callers surface them as transient
/// user feedback and retry with a different position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("item does not fit within the habitat grid")]
    OutOfBounds,
    #[error("target cells are already occupied")]
    Collision,
}

/// Width × height in grid cells occupied by a pending or placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub w: u16,
    pub h: u16,
}

impl Footprint {
    pub const fn new(w: u16, h: u16) -> Self {
        Self { w, h }
    }

    /// The same footprint turned a quarter turn.
    pub const fn rotated(self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }
}

/// Quarter-turn orientation of a placed item.
///
/// Serialized as degrees so exported documents stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Advance by +90 degrees, wrapping at 360.
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// True for the {90, 270} class, where the footprint swaps w and h
    /// relative to the upright {0, 180} class.
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(format!("invalid rotation `{other}`")),
        }
    }
}

/// A reuse suggestion realized at a grid location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: String,
    pub suggestion_id: String,
    pub material_id: String,
    pub x: u16,
    pub y: u16,
    pub rotation: Rotation,
    pub footprint: Footprint,
}

impl PlacedItem {
    /// Strict rectangle overlap: touching edges do not intersect.
    pub fn intersects(&self, other: &PlacedItem) -> bool {
        rects_overlap(
            self.x,
            self.y,
            self.footprint,
            other.x,
            other.y,
            other.footprint,
        )
    }

    fn as_candidate(&self) -> Candidate {
        Candidate {
            x: self.x,
            y: self.y,
            footprint: self.footprint,
        }
    }
}

/// Candidate rectangle submitted for validation before any commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub x: u16,
    pub y: u16,
    pub footprint: Footprint,
}

/// Fixed-size square habitat floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: u16,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cells: DEFAULT_GRID_CELLS,
        }
    }
}

impl Grid {
    pub fn new(cells: u16) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> u16 {
        self.cells
    }

    /// Whether the candidate rectangle is fully contained in the grid.
    pub fn contains(&self, candidate: &Candidate) -> bool {
        u32::from(candidate.x) + u32::from(candidate.footprint.w) <= u32::from(self.cells)
            && u32::from(candidate.y) + u32::from(candidate.footprint.h) <= u32::from(self.cells)
    }

    /// Validate a candidate against bounds, then against every placed item
    /// other than `exclude`. `exclude` lets an item move or rotate in place
    /// without colliding with itself.
    pub fn validate(
        &self,
        existing: &[PlacedItem],
        candidate: Candidate,
        exclude: Option<&str>,
    ) -> Result<(), PlacementError> {
        if !self.contains(&candidate) {
            return Err(PlacementError::OutOfBounds);
        }

        let collision = existing
            .iter()
            .filter(|item| exclude != Some(item.id.as_str()))
            .any(|item| {
                let c = item.as_candidate();
                rects_overlap(c.x, c.y, c.footprint, candidate.x, candidate.y, candidate.footprint)
            });

        if collision {
            return Err(PlacementError::Collision);
        }

        Ok(())
    }
}

fn rects_overlap(ax: u16, ay: u16, af: Footprint, bx: u16, by: u16, bf: Footprint) -> bool {
    let (ax, ay, aw, ah) = (u32::from(ax), u32::from(ay), u32::from(af.w), u32::from(af.h));
    let (bx, by, bw, bh) = (u32::from(bx), u32::from(by), u32::from(bf.w), u32::from(bf.h));
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

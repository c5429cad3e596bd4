//! Spiral id system
//!
//! Converts XY grid coordinates to clockwise spiral ids and back. Spiral ids
//! allow addressing an unbounded 2D grid with a single non-negative number
//! starting at the origin cell. Drawn with the Y axis pointing down (the
//! map-rendering convention), the grid looks like this:
//!
//! ```text
//!        -2   -1   +0   +1   +2
//!      +----+----+----+----+----+
//!  -2  | 16 | 17 | 18 | 19 | 20 |
//!      +----+----+----+----+----+
//!  -1  | 15 |  4 |  5 |  6 | 21 |
//!      +----+----+----+----+----+
//!  +0  | 14 |  3 |  0 |  7 | 22 |
//!      +----+----+----+----+----+
//!  +1  | 13 |  2 |  1 |  8 | 23 |
//!      +----+----+----+----+----+
//!  +2  | 12 | 11 | 10 |  9 | 24 |
//!      +----+----+----+----+----+
//! ```
//!
//! Ring k (the cells at Chebyshev distance k from the origin) holds 8k cells,
//! occupies ids `[(2k-1)^2, (2k+1)^2)`, starts at cell (k-1, k) and walks its
//! four edges in clockwise order, ending at (k, k) next to the following
//! ring's start. Both conversion directions are closed-form, no walk is
//! simulated.
//!
//! Supported domain: every cell whose ring number fits `i32`, i.e. all
//! coordinates with components above `i32::MIN`. The `i32::MIN` row and
//! column belong to ring 2^31, whose tail ids exceed `u64`.

mod iter;

pub use iter::SpiralCells;

use bevy::math::IVec2;
use serde::{Deserialize, Serialize};

/// Error type for spiral grid conversions
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SpiralError {
    /// No grid cell maps to this id: either a signed id below zero, or an id
    /// at or beyond `ring_first_id(2^31)` where cells no longer fit 32 bits.
    #[error("spiral id {id} does not identify a grid cell")]
    InvalidIndex { id: i128 },
    /// World-space conversions require a strictly positive, finite cell size.
    #[error("grid size must be positive and finite, got {grid_size}")]
    InvalidGridSize { grid_size: f32 },
}

/// A cell id on the clockwise spiral.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SpiralId(u64);

impl SpiralId {
    /// Id of the origin cell (0, 0).
    pub const ORIGIN: Self = Self(0);

    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Build an id from a signed value, as handed over by scripting layers
    /// that lack unsigned integers. No cell maps to a negative id.
    pub fn from_signed(id: i64) -> Result<Self, SpiralError> {
        u64::try_from(id)
            .map(Self)
            .map_err(|_| SpiralError::InvalidIndex { id: id as i128 })
    }

    /// Ring number (Chebyshev distance from the origin) of the cell this id
    /// names.
    #[inline]
    pub fn ring(self) -> u32 {
        ((self.0.isqrt() + 1) / 2) as u32
    }
}

impl TryFrom<i64> for SpiralId {
    type Error = SpiralError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::from_signed(id)
    }
}

/// First id of ring k: `(2k-1)^2`, or 0 for the origin ring.
#[inline]
pub const fn ring_first_id(ring: u32) -> u64 {
    if ring == 0 {
        return 0;
    }
    let w = 2 * ring as u64 - 1;
    w * w
}

/// Number of cells in ring k: 8k, or 1 for the origin ring.
#[inline]
pub const fn cells_in_ring(ring: u32) -> u64 {
    if ring == 0 {
        1
    } else {
        8 * ring as u64
    }
}

/// Ring number of a cell: max(|x|, |y|).
#[inline]
pub fn cell_ring(cell: IVec2) -> u32 {
    cell.x.unsigned_abs().max(cell.y.unsigned_abs())
}

/// The four edges of a ring annulus, in clockwise walk order (Y-down
/// rendering). Corner ownership follows the walk: an edge owns the corner it
/// ends on, so (-k, +k) belongs to PosY, (-k, -k) to NegX, (+k, -k) to NegY
/// and (+k, +k) to PosX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingEdge {
    /// y == +k, walked from (k-1, k) towards -x.
    PosY,
    /// x == -k, walked from (-k, k-1) towards -y.
    NegX,
    /// y == -k, walked from (-k+1, -k) towards +x.
    NegY,
    /// x == +k, walked from (k, -k+1) towards +y.
    PosX,
}

impl RingEdge {
    /// Which edge of its ring a cell lies on. The origin lies on no edge.
    pub fn of(cell: IVec2) -> Option<Self> {
        let ring = cell_ring(cell);
        if ring == 0 {
            return None;
        }
        Some(edge_and_offset(cell.x as i64, cell.y as i64, ring as i64).0)
    }

    #[inline]
    const fn walk_index(self) -> u64 {
        match self {
            RingEdge::PosY => 0,
            RingEdge::NegX => 1,
            RingEdge::NegY => 2,
            RingEdge::PosX => 3,
        }
    }
}

/// Edge of the cell and 0-based offset along that edge's walk direction.
/// Caller guarantees k == max(|x|, |y|) >= 1.
fn edge_and_offset(x: i64, y: i64, k: i64) -> (RingEdge, i64) {
    if y == k && x < k {
        (RingEdge::PosY, k - 1 - x)
    } else if x == -k {
        (RingEdge::NegX, k - 1 - y)
    } else if y == -k {
        (RingEdge::NegY, x + k - 1)
    } else {
        (RingEdge::PosX, y + k - 1)
    }
}

/// Convert grid coordinates to a spiral id.
///
/// Note that this takes grid coordinates as in grid cells; world locations
/// are converted by the [`crate::world`] module.
pub fn coord_to_spiral_id(cell: IVec2) -> SpiralId {
    let ring = cell_ring(cell);
    debug_assert!(
        ring <= i32::MAX as u32,
        "cell {cell} lies on ring {ring}, beyond the spiral id range"
    );
    if ring == 0 {
        return SpiralId::ORIGIN;
    }

    let (edge, along) = edge_and_offset(cell.x as i64, cell.y as i64, ring as i64);
    let edge_len = 2 * ring as u64;
    SpiralId::new(ring_first_id(ring) + edge.walk_index() * edge_len + along as u64)
}

/// Convert a spiral id back to grid coordinates.
///
/// Fails with [`SpiralError::InvalidIndex`] for ids on rings beyond the
/// 32-bit coordinate range.
pub fn spiral_id_to_coord(id: SpiralId) -> Result<IVec2, SpiralError> {
    if id == SpiralId::ORIGIN {
        return Ok(IVec2::ZERO);
    }

    let ring = id.ring();
    if ring > i32::MAX as u32 {
        return Err(SpiralError::InvalidIndex {
            id: id.value() as i128,
        });
    }

    let edge_len = 2 * ring as u64;
    let offset = id.value() - ring_first_id(ring);
    let k = ring as i64;
    let along = (offset % edge_len) as i64;

    let cell = match offset / edge_len {
        0 => IVec2::new((k - 1 - along) as i32, k as i32),
        1 => IVec2::new(-k as i32, (k - 1 - along) as i32),
        2 => IVec2::new((-k + 1 + along) as i32, -k as i32),
        _ => IVec2::new(k as i32, (-k + 1 + along) as i32),
    };
    Ok(cell)
}

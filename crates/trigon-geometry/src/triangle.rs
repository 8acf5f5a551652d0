//! Equilateral apex solver.
//!
//! Given a base segment between two partners `(x1, y1)` and `(x2, y2)`, the two
//! equilateral triangles on that base have their third vertex at
//!
//! ```text
//! flip = -1 (top) or 1 (bottom)
//! s1 = (x1 + x2 + flip * sqrt(3) * (y1 - y2)) / 2
//! s2 = (y1 + y2 + flip * sqrt(3) * (x2 - x1)) / 2
//! ```
//!
//! The two solutions are reflections of each other across the base.
//! Only two partners in two dimensions are supported.

use crate::coord::Coord;
use crate::error::{GeometryError, Result};

/// Number of partners the solver works with.
pub const PARTNERS_PER_POINT: usize = 2;

/// Dimensionality the solver works in.
pub const SOLVER_DIMENSIONS: usize = 2;

/// Which of the two mirror-image triangles a point aims for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriangleSide {
    #[default]
    Bottom,
    Top,
}

impl TriangleSide {
    /// The other side.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Bottom => Self::Top,
            Self::Top => Self::Bottom,
        }
    }

    /// Switch to the other side in place.
    #[inline]
    pub fn flip(&mut self) {
        *self = self.flipped();
    }

    /// Sign applied to the height term of the apex formula.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Bottom => 1.0,
            Self::Top => -1.0,
        }
    }

    pub const fn is_top(self) -> bool {
        matches!(self, Self::Top)
    }
}

/// Third vertex of the equilateral triangle on the two partners.
pub fn apex(partners: &[&[f64]], side: TriangleSide) -> Result<Coord> {
    let [first, second] = partners else {
        return Err(GeometryError::UnsupportedPartnerCount {
            count: partners.len(),
        });
    };

    if first.len() != second.len() {
        return Err(GeometryError::DimensionMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    if first.len() != SOLVER_DIMENSIONS {
        return Err(GeometryError::UnsupportedDimension { dim: first.len() });
    }

    let (x1, y1) = (first[0], first[1]);
    let (x2, y2) = (second[0], second[1]);
    let flip = side.sign();
    let root3 = 3.0f64.sqrt();

    let s1 = (x1 + x2 + flip * root3 * (y1 - y2)) / 2.0;
    let s2 = (y1 + y2 + flip * root3 * (x2 - x1)) / 2.0;

    Ok(Coord::new(vec![s1, s2]))
}

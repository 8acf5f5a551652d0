//! Trigon Geometry Kernel
//!
//! Pure vector math for the Trigon point field: Euclidean distance, inclusive
//! bounding regions, and the equilateral apex solver that gives every point its
//! target.
//!
//! # Equilateral Assembly
//!
//! Every point is bound to exactly two partners. Its ideal position is the third
//! vertex of an equilateral triangle erected on the segment between them. There
//! are always two such vertices, mirror images across the partner segment; a
//! [`TriangleSide`] selects one.
//!
//! # Bounding Regions
//!
//! The field is constrained by [`Bounds`]: a list of [`Region`]s, each a list of
//! half-space [`Constraint`]s. A spot is in bounds if any region contains it.
//! Lying exactly on a boundary counts as inside.

mod bounds;
mod coord;
mod error;
mod triangle;

pub use bounds::{Bounds, Constraint, Region, Side};
pub use coord::{distance, Coord};
pub use error::{GeometryError, Result};
pub use triangle::{apex, TriangleSide, PARTNERS_PER_POINT, SOLVER_DIMENSIONS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_field_is_the_unit_hundred_square() {
        let bounds = Bounds::default();
        assert!(bounds.contains(&[0.0, 0.0]));
        assert!(bounds.contains(&[100.0, 100.0]));
        assert!(!bounds.contains(&[100.5, 50.0]));
    }

    #[test]
    fn apex_is_equidistant_from_partners() {
        let a = [10.0, 10.0];
        let b = [30.0, 10.0];
        let spot = apex(&[&a, &b], TriangleSide::Bottom).unwrap();

        let base = distance(&a, &b).unwrap();
        assert!((distance(&spot, &a).unwrap() - base).abs() < 1e-9);
        assert!((distance(&spot, &b).unwrap() - base).abs() < 1e-9);
    }
}

//! Real-valued coordinates of arbitrary dimension.
//!
//! A point's dimension is fixed the first time it is given a coordinate. Every
//! operation that combines two coordinates checks their lengths agree and
//! reports [`GeometryError::DimensionMismatch`] otherwise.

use std::ops::{Deref, DerefMut};

use crate::error::{GeometryError, Result};

/// A position in the field.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Coord(Vec<f64>);

impl Coord {
    /// Create a coordinate from its components.
    pub fn new(components: Vec<f64>) -> Self {
        Self(components)
    }

    /// Number of components.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Borrow the components.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &[f64]) -> Result<f64> {
        distance(&self.0, other)
    }

    /// Bit patterns of every component, for exact equality and hashing.
    pub fn to_bits(&self) -> Vec<u64> {
        self.0.iter().map(|c| c.to_bits()).collect()
    }
}

impl Deref for Coord {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for Coord {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl From<Vec<f64>> for Coord {
    fn from(components: Vec<f64>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[f64; N]> for Coord {
    fn from(components: [f64; N]) -> Self {
        Self(components.to_vec())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Euclidean distance between two coordinates of equal length.
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(GeometryError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let squared: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();

    Ok(squared.sqrt())
}

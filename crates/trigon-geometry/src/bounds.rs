//! Axis-aligned bounding regions.
//!
//! A [`Constraint`] is a half-space per axis: every component of a spot must be
//! at least (or at most) the matching boundary component. A [`Region`] is the
//! intersection of its constraints, and [`Bounds`] is the union of its regions.
//!
//! A constraint only speaks for the axes its boundary defines. A boundary
//! shorter than the spot leaves the remaining axes unconstrained.

/// Which side of a boundary a spot has to be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// `spot[i] >= boundary[i]`
    AtLeast,
    /// `spot[i] <= boundary[i]`
    AtMost,
}

/// A half-space constraint on every axis the boundary defines.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub side: Side,
    pub boundary: Vec<f64>,
}

impl Constraint {
    /// Lower bound: every axis at least `boundary`.
    pub fn at_least(boundary: impl Into<Vec<f64>>) -> Self {
        Self {
            side: Side::AtLeast,
            boundary: boundary.into(),
        }
    }

    /// Upper bound: every axis at most `boundary`.
    pub fn at_most(boundary: impl Into<Vec<f64>>) -> Self {
        Self {
            side: Side::AtMost,
            boundary: boundary.into(),
        }
    }

    /// Whether the spot is on the required side of every defined axis.
    /// Lying on the boundary satisfies the constraint.
    pub fn satisfied_by(&self, spot: &[f64]) -> bool {
        self.boundary.iter().zip(spot).all(|(b, s)| match self.side {
            Side::AtLeast => s >= b,
            Side::AtMost => s <= b,
        })
    }

    /// Summed absolute distance the spot is on the wrong side, over all axes.
    pub fn shortfall(&self, spot: &[f64]) -> f64 {
        self.boundary
            .iter()
            .zip(spot)
            .filter(|(b, s)| match self.side {
                Side::AtLeast => s < b,
                Side::AtMost => s > b,
            })
            .map(|(b, s)| (b - s).abs())
            .sum()
    }

    /// Clamp the spot onto the allowed side.
    pub fn clamp(&self, spot: &mut [f64]) {
        for (s, b) in spot.iter_mut().zip(&self.boundary) {
            *s = match self.side {
                Side::AtLeast => s.max(*b),
                Side::AtMost => s.min(*b),
            };
        }
    }
}

/// The intersection of a set of constraints.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Region {
    pub constraints: Vec<Constraint>,
}

impl Region {
    /// Create a region from its constraints.
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    /// A box with inclusive corners `lower` and `upper`.
    pub fn rectangle(lower: impl Into<Vec<f64>>, upper: impl Into<Vec<f64>>) -> Self {
        Self::new(vec![Constraint::at_least(lower), Constraint::at_most(upper)])
    }

    /// Whether every constraint holds.
    pub fn contains(&self, spot: &[f64]) -> bool {
        self.constraints.iter().all(|c| c.satisfied_by(spot))
    }

    /// Manhattan-style cost of moving the spot into this region.
    pub fn correction_cost(&self, spot: &[f64]) -> f64 {
        self.constraints.iter().map(|c| c.shortfall(spot)).sum()
    }

    /// Clamp the spot axis by axis until every constraint holds.
    ///
    /// This is not a nearest-point projection in general: constraints are
    /// applied in order, so contradictory constraints leave the last one
    /// winning.
    pub fn snap(&self, spot: &mut [f64]) {
        for constraint in &self.constraints {
            constraint.clamp(spot);
        }
    }
}

/// The union of the regions a point may occupy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Bounds {
    pub regions: Vec<Region>,
}

impl Bounds {
    /// Create bounds from a list of regions.
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Bounds made of a single box.
    pub fn rectangle(lower: impl Into<Vec<f64>>, upper: impl Into<Vec<f64>>) -> Self {
        Self::new(vec![Region::rectangle(lower, upper)])
    }

    /// Whether any region contains the spot.
    pub fn contains(&self, spot: &[f64]) -> bool {
        self.regions.iter().any(|r| r.contains(spot))
    }

    /// The region needing the least total correction to enter.
    /// Earlier regions win ties. `None` only when there are no regions.
    pub fn cheapest_region(&self, spot: &[f64]) -> Option<&Region> {
        let mut best: Option<(&Region, f64)> = None;
        for region in &self.regions {
            let cost = region.correction_cost(spot);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((region, cost)),
            }
        }
        best.map(|(region, _)| region)
    }

    /// Snap the spot into the cheapest region. Returns `false` if there is no
    /// region to snap into.
    pub fn snap_into_cheapest(&self, spot: &mut [f64]) -> bool {
        match self.cheapest_region(spot) {
            Some(region) => {
                region.snap(spot);
                true
            }
            None => false,
        }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether there are no regions (nothing is ever in bounds).
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for Bounds {
    /// The `[0, 100]` square.
    fn default() -> Self {
        Self::rectangle([0.0, 0.0], [100.0, 100.0])
    }
}

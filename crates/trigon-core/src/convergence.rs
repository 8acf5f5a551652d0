//! Equilibrium: every point sits on the apex of its partners' triangle.
//!
//! A point is converged under tolerance `ε` when, for each partner `i`,
//!
//! ```text
//! |distance(point, partner_i) - distance(partner_i, partner_(i+1 mod n))| <= ε
//! ```
//!
//! i.e. the point is as far from each partner as the partners are from each
//! other. The system is converged when every point is.

use trigon_geometry::distance;

use crate::error::Result;

/// Distances from a point to its partners and between consecutive partners.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartnerDistances {
    /// `distance(point, partner_i)`
    pub to_partners: Vec<f64>,
    /// `distance(partner_i, partner_(i+1 mod n))`
    pub between_partners: Vec<f64>,
}

impl PartnerDistances {
    /// Measure a point against its partners.
    pub fn measure(coord: &[f64], partners: &[&[f64]]) -> Result<Self> {
        let n = partners.len();
        let mut to_partners = Vec::with_capacity(n);
        let mut between_partners = Vec::with_capacity(n);

        for (i, partner) in partners.iter().enumerate() {
            to_partners.push(distance(coord, partner)?);
            between_partners.push(distance(partner, partners[(i + 1) % n])?);
        }

        Ok(Self {
            to_partners,
            between_partners,
        })
    }

    /// Per-partner gap between the two distances.
    pub fn deviations(&self) -> impl Iterator<Item = f64> + '_ {
        self.to_partners
            .iter()
            .zip(&self.between_partners)
            .map(|(to, between)| (to - between).abs())
    }

    /// Largest per-partner deviation (0 with no partners).
    pub fn max_deviation(&self) -> f64 {
        self.deviations().fold(0.0, f64::max)
    }

    /// Whether every deviation is within `tolerance` (inclusive).
    pub fn within(&self, tolerance: f64) -> bool {
        self.deviations().all(|d| d <= tolerance)
    }
}

/// Whether a point at `coord` is converged with respect to `partners`.
pub fn is_converged(coord: &[f64], partners: &[&[f64]], tolerance: f64) -> Result<bool> {
    Ok(PartnerDistances::measure(coord, partners)?.within(tolerance))
}

/// Convergence summary across a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvergenceReport {
    /// Points within tolerance
    pub converged: usize,
    /// Points checked
    pub total: usize,
    /// Worst deviation seen across all points
    pub max_deviation: f64,
}

impl ConvergenceReport {
    /// Fold one point's distances into the report.
    pub fn record(&mut self, distances: &PartnerDistances, tolerance: f64) {
        self.total += 1;
        if distances.within(tolerance) {
            self.converged += 1;
        }
        self.max_deviation = self.max_deviation.max(distances.max_deviation());
    }

    /// Whether every point checked is converged.
    pub fn is_converged(&self) -> bool {
        self.converged == self.total
    }

    /// Points still outside tolerance.
    pub fn remaining(&self) -> usize {
        self.total - self.converged
    }
}

//! Collision risk scoring.
//!
//! The score is a weighted sum of three terms, clamped to `[0, 1]`:
//!
//! ```text
//! risk = clamp(w_d·ln(density / d_ref) + w_c·(count / c_ref) + w_k·clustering, 0, 1)
//! ```
//!
//! Intermediate terms may be negative (sparse regions) or exceed one
//! (crowded regions); only the sum is bounded.

use debris_common::{Measurement, RegionMetrics};
use debris_config::RiskWeights;
use debris_math::clamp_unit;
use serde::Serialize;
use tracing::trace;

/// The three weighted terms behind a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskComponents {
    /// `-inf` when density is not positive (serialized as null).
    pub density_term: f64,
    pub count_term: f64,
    pub cluster_term: f64,
    pub score: f64,
}

/// Risk score in `[0, 1]` for one measurement.
///
/// `density <= 0` (and NaN density) has no logarithm; it scores 0.0.
pub fn risk_score(
    weights: &RiskWeights,
    density: f64,
    object_count: u64,
    clustering_index: f64,
) -> f64 {
    risk_components(weights, density, object_count, clustering_index).score
}

/// Risk score with its per-term breakdown.
pub fn risk_components(
    weights: &RiskWeights,
    density: f64,
    object_count: u64,
    clustering_index: f64,
) -> RiskComponents {
    let count_term = (object_count as f64 / weights.count_reference) * weights.count_weight;
    let cluster_term = clustering_index * weights.cluster_weight;

    if density.is_nan() || density <= 0.0 {
        trace!(density, "non-positive density, risk floored at zero");
        return RiskComponents {
            density_term: f64::NEG_INFINITY,
            count_term,
            cluster_term,
            score: 0.0,
        };
    }

    let density_term = (density / weights.density_reference).ln() * weights.density_weight;
    let score = clamp_unit(density_term + count_term + cluster_term);

    RiskComponents {
        density_term,
        count_term,
        cluster_term,
        score,
    }
}

/// Risk score for a [`Measurement`].
pub fn measurement_risk(weights: &RiskWeights, m: &Measurement) -> f64 {
    risk_score(weights, m.density, m.object_count, m.clustering_index)
}

/// Risk score for a region record.
pub fn region_risk(weights: &RiskWeights, r: &RegionMetrics) -> f64 {
    risk_score(weights, r.density, r.object_count, r.clustering)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn w() -> RiskWeights {
        RiskWeights::default()
    }

    #[test]
    fn reference_density_contributes_nothing() {
        // ln(1000/1000) = 0, so only count and cluster terms remain.
        let score = risk_score(&w(), 1000.0, 25_000, 0.5);
        assert!(approx_eq(score, 0.2 + 0.15, 1e-12));
    }

    #[test]
    fn crowded_region_saturates() {
        assert_eq!(risk_score(&w(), 5000.0, 40_000, 0.9), 1.0);
    }

    #[test]
    fn sparse_region_floors_at_zero() {
        assert_eq!(risk_score(&w(), 1.0, 1, 0.0), 0.0);
    }

    #[test]
    fn zero_and_negative_density_score_zero() {
        assert_eq!(risk_score(&w(), 0.0, 40_000, 0.9), 0.0);
        assert_eq!(risk_score(&w(), -5.0, 40_000, 0.9), 0.0);
        assert_eq!(risk_score(&w(), f64::NAN, 40_000, 0.9), 0.0);
    }

    #[test]
    fn nan_clustering_scores_zero() {
        assert_eq!(risk_score(&w(), 2000.0, 10, f64::NAN), 0.0);
    }

    #[test]
    fn components_sum_to_unclamped_score() {
        let c = risk_components(&w(), 2000.0, 10_000, 0.2);
        let raw = c.density_term + c.count_term + c.cluster_term;
        assert!(approx_eq(c.score, raw, 1e-12));
        assert!(approx_eq(c.density_term, 2f64.ln() * 0.3, 1e-12));
        assert!(approx_eq(c.count_term, 0.08, 1e-12));
    }

    #[test]
    fn custom_weights_apply() {
        let weights = RiskWeights {
            count_weight: 1.0,
            density_weight: 0.0,
            cluster_weight: 0.0,
            ..RiskWeights::default()
        };
        assert!(approx_eq(risk_score(&weights, 1.0, 25_000, 1.0), 0.5, 1e-12));
    }

    #[test]
    fn measurement_and_region_agree() {
        let r = RegionMetrics::new(3000.0, 20_000, 0.4);
        assert_eq!(
            region_risk(&w(), &r),
            measurement_risk(&w(), &r.measurement())
        );
    }
}

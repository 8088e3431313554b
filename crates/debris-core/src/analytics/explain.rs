//! Risk-factor decomposition.
//!
//! Five fixed factors each get a raw weight from the input metrics; the
//! contribution of a factor is its share of the total weight.

use debris_common::{FactorMetrics, RiskFactor};
use debris_config::FactorWeights;
use debris_math::{non_negative, normalize_weights};
use tracing::debug;

pub const DEBRIS_GROWTH: &str = "Debris Growth";
pub const OBJECT_COUNT: &str = "Object Count";
pub const CLUSTERING: &str = "Clustering";
pub const ORBITAL_DECAY: &str = "Orbital Decay";
pub const INCLINATION_IMPACT: &str = "Inclination Impact";

/// Decompose a risk estimate into weighted contributors.
///
/// Factors come back in fixed order: growth, count, clustering, decay,
/// inclination. `weight` is reported raw, so a shrinking population shows
/// a negative growth weight; contributions are computed from weights
/// floored at zero. A missing, zero or NaN inclination factor uses the
/// configured default. When every floored weight is zero each contribution
/// is zero.
pub fn explain_risk_factors(weights: &FactorWeights, metrics: &FactorMetrics) -> Vec<RiskFactor> {
    let inclination = match metrics.inclination_factor {
        Some(f) if f != 0.0 && !f.is_nan() => f,
        _ => weights.default_inclination_weight,
    };

    let raw = [
        (DEBRIS_GROWTH, metrics.growth_rate / weights.growth_reference),
        (
            OBJECT_COUNT,
            metrics.object_count as f64 / weights.count_reference,
        ),
        (CLUSTERING, metrics.clustering_index),
        (ORBITAL_DECAY, weights.orbital_decay_weight),
        (INCLINATION_IMPACT, inclination),
    ];

    let floored: Vec<f64> = raw.iter().map(|&(_, w)| non_negative(w)).collect();
    let contributions = normalize_weights(&floored);
    if contributions.iter().all(|&c| c == 0.0) {
        debug!("factor weights sum to zero or are not finite, contributions are zero");
    }

    raw.iter()
        .zip(contributions)
        .map(|(&(name, weight), contribution)| RiskFactor {
            name: name.to_string(),
            weight,
            contribution,
        })
        .collect()
}

/// Factors sorted by descending contribution.
pub fn ranked_factors(factors: &[RiskFactor]) -> Vec<RiskFactor> {
    let mut ranked = factors.to_vec();
    ranked.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    ranked
}

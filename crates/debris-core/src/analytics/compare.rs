//! Side-by-side comparison of two regions.

use debris_common::RegionMetrics;
use debris_config::RiskWeights;
use serde::Serialize;

use super::risk::region_risk;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionComparison {
    pub region_a: String,
    pub region_b: String,
    pub risk_a: f64,
    pub risk_b: f64,
    /// `a − b`.
    pub density_delta: f64,
    /// `a − b`.
    pub risk_delta: f64,
    /// `a − b`; `None` unless both regions report a growth rate.
    pub growth_delta: Option<f64>,
    pub insights: Vec<String>,
}

/// Compare region `a` against region `b`. Deltas are `a − b`.
pub fn compare_regions(
    weights: &RiskWeights,
    label_a: &str,
    a: &RegionMetrics,
    label_b: &str,
    b: &RegionMetrics,
) -> RegionComparison {
    let risk_a = region_risk(weights, a);
    let risk_b = region_risk(weights, b);
    let density_delta = a.density - b.density;
    let risk_delta = risk_a - risk_b;
    let growth_delta = match (a.growth_rate, b.growth_rate) {
        (Some(ga), Some(gb)) => Some(ga - gb),
        _ => None,
    };

    let mut insights = vec![
        format!(
            "{} has {} {} debris density than {}",
            label_a,
            density_delta.abs(),
            if density_delta > 0.0 { "higher" } else { "lower" },
            label_b
        ),
        format!(
            "{} shows {} collision risk ({:.0} percentage points difference)",
            label_a,
            if risk_delta > 0.0 { "higher" } else { "lower" },
            (risk_delta * 100.0).abs()
        ),
    ];
    if let Some(delta) = growth_delta {
        insights.push(format!(
            "Growth rate in {} is {} than in {}",
            label_a,
            if delta > 0.0 { "faster" } else { "slower" },
            label_b
        ));
    }

    RegionComparison {
        region_a: label_a.to_string(),
        region_b: label_b.to_string(),
        risk_a,
        risk_b,
        density_delta,
        risk_delta,
        growth_delta,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_a_minus_b() {
        let a = RegionMetrics::new(5000.0, 40_000, 0.9).with_growth_rate(0.04);
        let b = RegionMetrics::new(2000.0, 10_000, 0.2).with_growth_rate(0.01);
        let cmp = compare_regions(&RiskWeights::default(), "750-800 km", &a, "600-650 km", &b);
        assert_eq!(cmp.density_delta, 3000.0);
        assert!(cmp.risk_delta > 0.0);
        assert!((cmp.growth_delta.unwrap() - 0.03).abs() < 1e-12);
        assert_eq!(cmp.insights.len(), 3);
        assert_eq!(
            cmp.insights[0],
            "750-800 km has 3000 higher debris density than 600-650 km"
        );
        assert!(cmp.insights[1].starts_with("750-800 km shows higher collision risk"));
        assert!(cmp.insights[2].contains("faster"));
    }

    #[test]
    fn missing_growth_skips_growth_insight() {
        let a = RegionMetrics::new(1000.0, 1_000, 0.1);
        let b = RegionMetrics::new(3000.0, 30_000, 0.6).with_growth_rate(0.02);
        let cmp = compare_regions(&RiskWeights::default(), "A", &a, "B", &b);
        assert_eq!(cmp.growth_delta, None);
        assert_eq!(cmp.insights.len(), 2);
        assert!(cmp.insights[0].contains("lower"));
        assert!(cmp.insights[1].contains("lower collision risk"));
    }

    #[test]
    fn risk_difference_in_points() {
        // risks: 0.35 vs 0.15 with count weight only
        let weights = RiskWeights {
            density_weight: 0.0,
            cluster_weight: 0.0,
            count_weight: 1.0,
            ..RiskWeights::default()
        };
        let a = RegionMetrics::new(1000.0, 17_500, 0.0);
        let b = RegionMetrics::new(1000.0, 7_500, 0.0);
        let cmp = compare_regions(&weights, "A", &a, "B", &b);
        assert!(cmp.insights[1].contains("(20 percentage points difference)"));
    }
}

//! Hotspot ranking across a region map.

use debris_common::{Hotspot, RegionMap};
use debris_config::RiskWeights;
use tracing::trace;

use super::clock::{format_timestamp, Clock};
use super::risk::region_risk;

/// Regions whose risk score is strictly above `threshold`, highest first.
///
/// The clock is read once, so every hotspot of one call carries the same
/// timestamp. Ties keep no particular order.
pub fn identify_hotspots(
    weights: &RiskWeights,
    regions: &RegionMap,
    threshold: f64,
    clock: &dyn Clock,
) -> Vec<Hotspot> {
    let timestamp = format_timestamp(clock.now());

    let mut hotspots: Vec<Hotspot> = regions
        .iter()
        .filter_map(|(region, metrics)| {
            let risk_score = region_risk(weights, metrics);
            trace!(region = %region, risk_score, "scored region");
            (risk_score > threshold).then(|| Hotspot {
                region: region.clone(),
                risk_score,
                density: metrics.density,
                timestamp: timestamp.clone(),
            })
        })
        .collect();

    hotspots.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use debris_common::RegionMetrics;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
    }

    fn regions(entries: &[(&str, f64, u64, f64)]) -> RegionMap {
        entries
            .iter()
            .map(|&(name, d, c, k)| (name.to_string(), RegionMetrics::new(d, c, k)))
            .collect()
    }

    #[test]
    fn only_risky_region_is_returned() {
        let map = regions(&[("A", 5000.0, 40_000, 0.9), ("B", 1.0, 1, 0.0)]);
        let hotspots = identify_hotspots(&RiskWeights::default(), &map, 0.5, &clock());
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].region, "A");
        assert_eq!(hotspots[0].density, 5000.0);
        assert_eq!(hotspots[0].timestamp, "2026-03-01T12:00:00.000Z");
    }

    #[test]
    fn sorted_descending() {
        let map = regions(&[
            ("low", 1500.0, 20_000, 0.3),
            ("top", 5000.0, 40_000, 0.9),
            ("mid", 2500.0, 30_000, 0.5),
        ]);
        let hotspots = identify_hotspots(&RiskWeights::default(), &map, 0.0, &clock());
        assert_eq!(hotspots.len(), 3);
        assert!(hotspots
            .windows(2)
            .all(|w| w[0].risk_score >= w[1].risk_score));
        assert_eq!(hotspots[0].region, "top");
        assert_eq!(hotspots[2].region, "low");
    }

    #[test]
    fn threshold_is_strict() {
        // ln(1000/1000) = 0 and 25000/50000 * 0.5 = 0.25 exactly
        let weights = RiskWeights {
            count_weight: 0.5,
            cluster_weight: 0.0,
            ..RiskWeights::default()
        };
        let map = regions(&[("edge", 1000.0, 25_000, 0.5)]);
        assert!(identify_hotspots(&weights, &map, 0.25, &clock()).is_empty());
        assert_eq!(identify_hotspots(&weights, &map, 0.2, &clock()).len(), 1);
    }

    #[test]
    fn empty_map_yields_nothing() {
        let hotspots = identify_hotspots(&RiskWeights::default(), &RegionMap::new(), 0.7, &clock());
        assert!(hotspots.is_empty());
    }

    #[test]
    fn shared_timestamp_per_call() {
        let map = regions(&[("A", 5000.0, 40_000, 0.9), ("B", 4000.0, 45_000, 0.8)]);
        let hotspots = identify_hotspots(&RiskWeights::default(), &map, 0.5, &clock());
        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].timestamp, hotspots[1].timestamp);
    }
}

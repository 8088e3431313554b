//! Altitude bands and the mean-motion altitude approximation.
//!
//! Catalog records carry mean motion (revolutions per day) rather than an
//! altitude. Kepler's third law on a circular orbit gives the semi-major
//! axis; subtracting the mean Earth radius gives an altitude good enough for
//! sorting objects into bands.

use debris_common::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Earth's gravitational parameter, km³/s².
pub const EARTH_MU_KM3_S2: f64 = 398_600.441_8;

/// Mean Earth radius, km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Approximate altitude in km for a mean motion in revolutions per day.
///
/// `None` for non-positive or non-finite mean motion.
pub fn altitude_from_mean_motion(rev_per_day: f64) -> Option<f64> {
    if !rev_per_day.is_finite() || rev_per_day <= 0.0 {
        return None;
    }
    let n = rev_per_day * 2.0 * PI / SECONDS_PER_DAY;
    let semi_major_axis = (EARTH_MU_KM3_S2 / (n * n)).cbrt();
    Some(semi_major_axis - EARTH_RADIUS_KM)
}

/// Inclusive altitude range in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AltitudeBand {
    pub min_km: f64,
    pub max_km: f64,
}

impl AltitudeBand {
    pub fn new(min_km: f64, max_km: f64) -> Result<Self, Error> {
        if !(min_km.is_finite() && max_km.is_finite()) || min_km > max_km {
            return Err(Error::InvalidInput(format!(
                "altitude band must satisfy min <= max, got {min_km}-{max_km} km"
            )));
        }
        Ok(Self { min_km, max_km })
    }

    pub fn contains(&self, altitude_km: f64) -> bool {
        altitude_km >= self.min_km && altitude_km <= self.max_km
    }

    /// Dashboard label, e.g. `750-800 km`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AltitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} km", self.min_km, self.max_km)
    }
}

impl FromStr for AltitudeBand {
    type Err = Error;

    /// Parses `750-800 km`, `750-800km` or `750-800`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_suffix("km")
            .or_else(|| trimmed.strip_suffix("KM"))
            .unwrap_or(trimmed)
            .trim();

        let (lo, hi) = body
            .split_once('-')
            .ok_or_else(|| Error::InvalidInput(format!("invalid altitude band: {s:?}")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidInput(format!("invalid altitude band: {s:?}")))
        };
        AltitudeBand::new(parse(lo)?, parse(hi)?)
    }
}

/// Anything with a mean motion in revolutions per day.
pub trait MeanMotion {
    fn mean_motion(&self) -> f64;
}

/// A catalogued object reduced to what altitude filtering needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogObject {
    #[serde(alias = "OBJECT_ID", alias = "objectId")]
    pub object_id: String,
    /// Revolutions per day.
    #[serde(alias = "MEAN_MOTION", alias = "meanMotion")]
    pub mean_motion: f64,
}

impl MeanMotion for CatalogObject {
    fn mean_motion(&self) -> f64 {
        self.mean_motion
    }
}

/// Records whose derived altitude falls inside `band`. Records with an
/// unusable mean motion are dropped.
pub fn filter_by_altitude<'a, T: MeanMotion>(records: &'a [T], band: &AltitudeBand) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| altitude_from_mean_motion(r.mean_motion()).is_some_and(|alt| band.contains(alt)))
        .collect()
}

//! Input documents for the CLI.
//!
//! The analytics functions trust their inputs; this module is where the
//! CLI rejects what they must never see (non-finite values, malformed
//! documents) with typed errors.
//!
//! Accepted shapes:
//! - series: `1,2,3` / `1 2 3` text, a JSON array, or `{"series": [...]}`
//! - regions: a JSON object of region name to metrics, or `{"regions": {...}}`
//! - dashboard: `{"regions": {...}, "risk_series": [...]}`
//! - catalog: a JSON array of `{"object_id", "mean_motion"}` records

use std::io::Read;
use std::path::Path;

use debris_common::{Error, RegionMap, Result};
use serde::Deserialize;

use crate::analytics::CatalogObject;

/// Path that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a whole file, or stdin for `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesDoc {
    Bare(Vec<f64>),
    Wrapped {
        #[serde(alias = "values", alias = "risk_series", alias = "riskSeries")]
        series: Vec<f64>,
    },
}

/// Parse a series from inline text or a JSON document.
pub fn parse_series(text: &str) -> Result<Vec<f64>> {
    let trimmed = text.trim();
    let values = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        match serde_json::from_str::<SeriesDoc>(trimmed) {
            Ok(SeriesDoc::Bare(v)) | Ok(SeriesDoc::Wrapped { series: v }) => v,
            Err(e) => {
                return Err(Error::InvalidSeries(format!(
                    "expected a JSON array of numbers or {{\"series\": [...]}}: {e}"
                )))
            }
        }
    } else {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .enumerate()
            .map(|(i, tok)| {
                tok.parse::<f64>().map_err(|_| {
                    Error::InvalidSeries(format!("value {} ({tok:?}) is not a number", i))
                })
            })
            .collect::<Result<Vec<f64>>>()?
    };
    ensure_finite(&values)?;
    Ok(values)
}

/// Series from exactly one of an inline argument or an input file.
pub fn load_series(inline: Option<&str>, input: Option<&Path>) -> Result<Vec<f64>> {
    match (inline, input) {
        (Some(text), None) => parse_series(text),
        (None, Some(path)) => parse_series(&read_source(path)?),
        (Some(_), Some(_)) => Err(Error::InvalidInput(
            "pass either --series or --input, not both".to_string(),
        )),
        (None, None) => Err(Error::InvalidInput(
            "a series is required: pass --series or --input".to_string(),
        )),
    }
}

fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(Error::InvalidSeries(format!(
            "value {} is not finite ({})",
            i, values[i]
        ))),
        None => Ok(()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegionsDoc {
    Wrapped { regions: RegionMap },
    Bare(RegionMap),
}

/// Parse a region map document.
pub fn parse_regions(text: &str) -> Result<RegionMap> {
    let regions = match serde_json::from_str::<RegionsDoc>(text) {
        Ok(RegionsDoc::Wrapped { regions }) | Ok(RegionsDoc::Bare(regions)) => regions,
        Err(e) => {
            return Err(Error::InvalidInput(format!(
                "expected an object of region name to {{density, object_count, clustering}}: {e}"
            )))
        }
    };
    validate_regions(&regions)?;
    Ok(regions)
}

fn validate_regions(regions: &RegionMap) -> Result<()> {
    for (name, m) in regions {
        if !m.density.is_finite() || !m.clustering.is_finite() {
            return Err(Error::InvalidInput(format!(
                "region {name:?} has a non-finite density or clustering"
            )));
        }
        if m.growth_rate.is_some_and(|g| !g.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "region {name:?} has a non-finite growth rate"
            )));
        }
    }
    Ok(())
}

/// Regions plus global risk history, for dashboard summaries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardInput {
    #[serde(default)]
    pub regions: RegionMap,
    #[serde(default, alias = "riskSeries")]
    pub risk_series: Vec<f64>,
}

pub fn parse_dashboard(text: &str) -> Result<DashboardInput> {
    let doc: DashboardInput = serde_json::from_str(text).map_err(|e| {
        Error::InvalidInput(format!(
            "expected {{\"regions\": {{...}}, \"risk_series\": [...]}}: {e}"
        ))
    })?;
    validate_regions(&doc.regions)?;
    ensure_finite(&doc.risk_series)?;
    Ok(doc)
}

/// Parse a catalog export for altitude filtering.
pub fn parse_catalog(text: &str) -> Result<Vec<CatalogObject>> {
    serde_json::from_str(text).map_err(|e| {
        Error::InvalidInput(format!(
            "expected a JSON array of {{object_id, mean_motion}} records: {e}"
        ))
    })
}

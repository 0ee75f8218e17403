//! World population tree: `World` -> region -> country.
//!
//! Input is the two World Bank API payloads (country populations and
//! country-to-region membership), each a `[metadata, [records...]]` array.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::types::ScannedTree;
use crate::error::TreeError;
use crate::tree::arena::WeightedTree;
use crate::tree::path::PopulationPath;

/// Region the World Bank uses for aggregate rows ("World", "Euro area", ...).
const AGGREGATES_REGION: &str = "Aggregates";

/// A region and the countries it lists, in payload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub countries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Named {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PopulationRecord {
    country: Named,
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: Option<String>,
    region: Named,
}

/// Country name -> population. Records without a readable integer are ignored.
pub fn parse_populations(json: &str) -> Result<HashMap<String, u64>> {
    let (_meta, records): (Value, Vec<PopulationRecord>) =
        serde_json::from_str(json).context("malformed population payload")?;

    let mut populations = HashMap::with_capacity(records.len());
    for record in records {
        let (Some(country), Some(value)) = (record.country.value, record.value) else {
            continue;
        };
        match as_population(&value) {
            Some(population) => {
                populations.insert(country, population);
            }
            None => tracing::debug!("Ignoring population {} for '{}'", value, country),
        }
    }
    Ok(populations)
}

/// Regions in first-appearance order. Unnamed countries and aggregate rows are
/// ignored, so every returned region lists at least one country.
pub fn parse_regions(json: &str) -> Result<Vec<Region>> {
    let (_meta, records): (Value, Vec<CountryRecord>) =
        serde_json::from_str(json).context("malformed region payload")?;

    let mut regions: Vec<Region> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        let (Some(country), Some(region)) = (record.name, record.region.value) else {
            continue;
        };
        if region == AGGREGATES_REGION {
            continue;
        }
        let slot = *index.entry(region.clone()).or_insert_with(|| {
            regions.push(Region {
                name: region,
                countries: Vec::new(),
            });
            regions.len() - 1
        });
        regions[slot].countries.push(country);
    }
    Ok(regions)
}

/// Build the three-level tree. Countries missing from `populations` are dropped;
/// a region left with no countries stays as a zero-sized node.
pub fn build_population_tree(
    populations: &HashMap<String, u64>,
    regions: &[Region],
) -> Result<ScannedTree, TreeError> {
    let mut tree = WeightedTree::with_path_format(Box::new(PopulationPath));

    let mut region_ids = Vec::with_capacity(regions.len());
    for region in regions {
        let mut countries = Vec::with_capacity(region.countries.len());
        for country in &region.countries {
            if let Some(&population) = populations.get(country) {
                countries.push(tree.leaf(country, population)?);
            }
        }
        region_ids.push(tree.internal(&region.name, countries)?);
    }

    let root = tree.internal("World", region_ids)?;
    tracing::info!(
        "Population tree built: {} regions, world population {}",
        regions.len(),
        tree.size(root)
    );
    Ok(ScannedTree { tree, root })
}

/// Read both payloads from disk and build the tree.
pub fn load_population_files(populations: &Path, regions: &Path) -> Result<ScannedTree> {
    let population_json = std::fs::read_to_string(populations)
        .with_context(|| format!("cannot read {}", populations.display()))?;
    let region_json = std::fs::read_to_string(regions)
        .with_context(|| format!("cannot read {}", regions.display()))?;

    let populations = parse_populations(&population_json)?;
    let regions = parse_regions(&region_json)?;
    Ok(build_population_tree(&populations, &regions)?)
}

fn as_population(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

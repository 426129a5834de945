//! Static catalog: resources, buildings and their level curves
//!
//! Catalog rows are shared by every planet and never change while a planet
//! lives. Building curves turn a level into a cost, a production or a
//! storage figure; every curve rounds to the nearest integer.

use crate::{BuildingId, ResourceId};
use serde::{Deserialize, Serialize};

/// Definition of a resource type (metal, crystal, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    /// Amount a newly created planet starts with
    pub start_amount: f64,
    /// Intrinsic production per minute of a newly created planet
    pub start_production: i64,
    /// Storage cap of a newly created planet
    pub start_storage: i64,
}

/// Definition of a building type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
}

/// Cost curve of a building for one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingCost {
    pub building: BuildingId,
    pub resource: ResourceId,
    pub cost: i64,
    pub progress: f64,
}

impl BuildingCost {
    /// Cost of reaching `level`: `round(cost · progress^(level - 1))`
    pub fn cost_at(&self, level: u32) -> i64 {
        let exponent = level as i32 - 1;
        round(self.cost as f64 * self.progress.powi(exponent))
    }
}

/// Production curve of a building for one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingResourceProduction {
    pub building: BuildingId,
    pub resource: ResourceId,
    pub base: i64,
    pub progress: f64,
}

impl BuildingResourceProduction {
    /// Production per minute at `level`: `round(base · level · progress^level)`
    pub fn production_at(&self, level: u32) -> i64 {
        let level_f = level as f64;
        round(self.base as f64 * level_f * self.progress.powi(level as i32))
    }
}

/// Storage curve of a building for one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingResourceStorage {
    pub building: BuildingId,
    pub resource: ResourceId,
    pub base: i64,
    pub scale: f64,
    pub progress: f64,
}

impl BuildingResourceStorage {
    /// Storage at `level`: `round(base + scale · (progress^level - 1))`
    pub fn storage_at(&self, level: u32) -> i64 {
        let growth = self.progress.powi(level as i32) - 1.0;
        round(self.base as f64 + self.scale * growth)
    }
}

/// Every curve attached to one building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub building: Building,
    #[serde(default)]
    pub costs: Vec<BuildingCost>,
    #[serde(default)]
    pub productions: Vec<BuildingResourceProduction>,
    #[serde(default)]
    pub storages: Vec<BuildingResourceStorage>,
}

impl BuildingSpec {
    /// Create a spec without curves
    pub fn new(building: Building) -> Self {
        Self {
            building,
            costs: Vec::new(),
            productions: Vec::new(),
            storages: Vec::new(),
        }
    }
}

/// Find a resource by name
pub fn find_resource_by_name<'a>(resources: &'a [Resource], name: &str) -> Option<&'a Resource> {
    resources.iter().find(|r| r.name == name)
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

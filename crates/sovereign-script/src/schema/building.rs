//! Building definition schema
//!
//! Curves refer to resources by name; the loader resolves them to ids.

use serde::{Deserialize, Serialize};

/// Cost of a level: `round(cost * progress^(level - 1))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDef {
    pub resource: String,
    pub cost: i64,
    #[serde(default = "default_progress")]
    pub progress: f64,
}

/// Production of a level: `round(base * level * progress^level)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionDef {
    pub resource: String,
    pub base: i64,
    #[serde(default = "default_progress")]
    pub progress: f64,
}

/// Storage of a level: `round(base + scale * (progress^level - 1))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageDef {
    pub resource: String,
    pub base: i64,
    #[serde(default)]
    pub scale: f64,
    #[serde(default = "default_progress")]
    pub progress: f64,
}

fn default_progress() -> f64 {
    1.0
}

/// Definition of a building and its level curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDef {
    /// Unique name
    pub name: String,
    #[serde(default)]
    pub costs: Vec<CostDef>,
    #[serde(default)]
    pub productions: Vec<ProductionDef>,
    #[serde(default)]
    pub storages: Vec<StorageDef>,
}

impl BuildingDef {
    /// Create a new building definition without curves
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            costs: Vec::new(),
            productions: Vec::new(),
            storages: Vec::new(),
        }
    }

    /// Every resource name the curves refer to
    pub fn referenced_resources(&self) -> impl Iterator<Item = &str> {
        self.costs
            .iter()
            .map(|c| c.resource.as_str())
            .chain(self.productions.iter().map(|p| p.resource.as_str()))
            .chain(self.storages.iter().map(|s| s.resource.as_str()))
    }
}

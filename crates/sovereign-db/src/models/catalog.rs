//! Catalog models for database storage.

use crate::keys;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use sovereign_core::{
    Building, BuildingCost, BuildingId, BuildingResourceProduction, BuildingResourceStorage,
    Resource, ResourceId,
};

/// Stored resource definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredResource {
    /// Primary key - resource ID.
    #[primary_key]
    pub id: u64,
    /// Unique resource name.
    #[secondary_key(unique)]
    pub name: String,
    pub start_amount: f64,
    pub start_production: i64,
    pub start_storage: i64,
}

impl StoredResource {
    pub fn from_entity(resource: &Resource) -> Self {
        Self {
            id: resource.id.raw(),
            name: resource.name.clone(),
            start_amount: resource.start_amount,
            start_production: resource.start_production,
            start_storage: resource.start_storage,
        }
    }

    pub fn to_entity(&self) -> Resource {
        Resource {
            id: ResourceId::new(self.id),
            name: self.name.clone(),
            start_amount: self.start_amount,
            start_production: self.start_production,
            start_storage: self.start_storage,
        }
    }
}

/// Stored building definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredBuilding {
    /// Primary key - building ID.
    #[primary_key]
    pub id: u64,
    /// Unique building name.
    #[secondary_key(unique)]
    pub name: String,
}

impl StoredBuilding {
    pub fn from_entity(building: &Building) -> Self {
        Self {
            id: building.id.raw(),
            name: building.name.clone(),
        }
    }

    pub fn to_entity(&self) -> Building {
        Building {
            id: BuildingId::new(self.id),
            name: self.name.clone(),
        }
    }
}

/// Stored cost curve, keyed by (building, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db(primary_key(building_resource -> String))]
pub struct StoredBuildingCost {
    pub building: u64,
    pub resource: u64,
    pub cost: i64,
    pub progress: f64,
}

impl StoredBuildingCost {
    pub fn building_resource(&self) -> String {
        keys::pair(self.building, self.resource)
    }

    pub fn from_entity(cost: &BuildingCost) -> Self {
        Self {
            building: cost.building.raw(),
            resource: cost.resource.raw(),
            cost: cost.cost,
            progress: cost.progress,
        }
    }

    pub fn to_entity(&self) -> BuildingCost {
        BuildingCost {
            building: BuildingId::new(self.building),
            resource: ResourceId::new(self.resource),
            cost: self.cost,
            progress: self.progress,
        }
    }
}

/// Stored production curve, keyed by (building, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db(primary_key(building_resource -> String))]
pub struct StoredBuildingResourceProduction {
    pub building: u64,
    pub resource: u64,
    pub base: i64,
    pub progress: f64,
}

impl StoredBuildingResourceProduction {
    pub fn building_resource(&self) -> String {
        keys::pair(self.building, self.resource)
    }

    pub fn from_entity(production: &BuildingResourceProduction) -> Self {
        Self {
            building: production.building.raw(),
            resource: production.resource.raw(),
            base: production.base,
            progress: production.progress,
        }
    }

    pub fn to_entity(&self) -> BuildingResourceProduction {
        BuildingResourceProduction {
            building: BuildingId::new(self.building),
            resource: ResourceId::new(self.resource),
            base: self.base,
            progress: self.progress,
        }
    }
}

/// Stored storage curve, keyed by (building, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 5, version = 1)]
#[native_db(primary_key(building_resource -> String))]
pub struct StoredBuildingResourceStorage {
    pub building: u64,
    pub resource: u64,
    pub base: i64,
    pub scale: f64,
    pub progress: f64,
}

impl StoredBuildingResourceStorage {
    pub fn building_resource(&self) -> String {
        keys::pair(self.building, self.resource)
    }

    pub fn from_entity(storage: &BuildingResourceStorage) -> Self {
        Self {
            building: storage.building.raw(),
            resource: storage.resource.raw(),
            base: storage.base,
            scale: storage.scale,
            progress: storage.progress,
        }
    }

    pub fn to_entity(&self) -> BuildingResourceStorage {
        BuildingResourceStorage {
            building: BuildingId::new(self.building),
            resource: ResourceId::new(self.resource),
            base: self.base,
            scale: self.scale,
            progress: self.progress,
        }
    }
}

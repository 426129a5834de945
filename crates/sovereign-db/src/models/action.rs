//! Building action models for database storage.

use crate::keys;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use sovereign_core::time::{from_micros, to_micros};
use sovereign_core::{
    ActionId, BuildingAction, BuildingActionCost, BuildingActionResourceProduction,
    BuildingActionResourceStorage, BuildingId, PlanetId, ResourceId,
};

/// Stored building action.
///
/// Secondary keys:
/// - `planet_building` (unique): at most one in-flight action per building
/// - `planet_completion`: a planet's actions ordered by `(completed_at, id)`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 20, version = 1)]
#[native_db(
    primary_key(action_id -> u64),
    secondary_key(planet_building -> String, unique),
    secondary_key(planet_completion -> String, unique)
)]
pub struct StoredBuildingAction {
    pub id: u64,
    pub planet: u64,
    pub building: u64,
    pub current_level: u32,
    pub desired_level: u32,
    pub created_at: i64,
    pub completed_at: i64,
}

impl StoredBuildingAction {
    pub fn action_id(&self) -> u64 {
        self.id
    }

    pub fn planet_building(&self) -> String {
        keys::pair(self.planet, self.building)
    }

    pub fn planet_completion(&self) -> String {
        keys::completion(self.planet, self.completed_at, self.id)
    }

    pub fn from_entity(action: &BuildingAction) -> Self {
        Self {
            id: action.id.raw(),
            planet: action.planet.raw(),
            building: action.building.raw(),
            current_level: action.current_level,
            desired_level: action.desired_level,
            created_at: to_micros(action.created_at),
            completed_at: to_micros(action.completed_at),
        }
    }

    pub fn to_entity(&self) -> BuildingAction {
        BuildingAction {
            id: ActionId::new(self.id),
            planet: PlanetId::new(self.planet),
            building: BuildingId::new(self.building),
            current_level: self.current_level,
            desired_level: self.desired_level,
            created_at: from_micros(self.created_at),
            completed_at: from_micros(self.completed_at),
        }
    }
}

/// Stored cost snapshot, keyed by (action, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 21, version = 1)]
#[native_db(primary_key(action_resource -> String))]
pub struct StoredBuildingActionCost {
    pub action: u64,
    pub resource: u64,
    pub amount: i64,
}

impl StoredBuildingActionCost {
    pub fn action_resource(&self) -> String {
        keys::pair(self.action, self.resource)
    }

    pub fn from_entity(cost: &BuildingActionCost) -> Self {
        Self {
            action: cost.action.raw(),
            resource: cost.resource.raw(),
            amount: cost.amount,
        }
    }

    pub fn to_entity(&self) -> BuildingActionCost {
        BuildingActionCost {
            action: ActionId::new(self.action),
            resource: ResourceId::new(self.resource),
            amount: self.amount,
        }
    }
}

/// Stored production delta, keyed by (action, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 22, version = 1)]
#[native_db(primary_key(action_resource -> String))]
pub struct StoredBuildingActionResourceProduction {
    pub action: u64,
    pub resource: u64,
    pub production: i64,
}

impl StoredBuildingActionResourceProduction {
    pub fn action_resource(&self) -> String {
        keys::pair(self.action, self.resource)
    }

    pub fn from_entity(production: &BuildingActionResourceProduction) -> Self {
        Self {
            action: production.action.raw(),
            resource: production.resource.raw(),
            production: production.production,
        }
    }

    pub fn to_entity(&self) -> BuildingActionResourceProduction {
        BuildingActionResourceProduction {
            action: ActionId::new(self.action),
            resource: ResourceId::new(self.resource),
            production: self.production,
        }
    }
}

/// Stored storage delta, keyed by (action, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 23, version = 1)]
#[native_db(primary_key(action_resource -> String))]
pub struct StoredBuildingActionResourceStorage {
    pub action: u64,
    pub resource: u64,
    pub storage: i64,
}

impl StoredBuildingActionResourceStorage {
    pub fn action_resource(&self) -> String {
        keys::pair(self.action, self.resource)
    }

    pub fn from_entity(storage: &BuildingActionResourceStorage) -> Self {
        Self {
            action: storage.action.raw(),
            resource: storage.resource.raw(),
            storage: storage.storage,
        }
    }

    pub fn to_entity(&self) -> BuildingActionResourceStorage {
        BuildingActionResourceStorage {
            action: ActionId::new(self.action),
            resource: ResourceId::new(self.resource),
            storage: self.storage,
        }
    }
}

/// Stored id sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 30, version = 1)]
#[native_db]
pub struct StoredSequence {
    /// Primary key - sequence name.
    #[primary_key]
    pub name: String,
    /// Next value handed out.
    pub next: u64,
}

//! Planet state models for database storage.
//!
//! Timestamps are stored as microseconds since the Unix epoch.

use crate::keys;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use sovereign_core::time::{from_micros, to_micros};
use sovereign_core::{
    BuildingId, Planet, PlanetBuilding, PlanetId, PlanetResource, PlanetResourceProduction,
    PlanetResourceStorage, PlayerId, ProductionOrigin, ResourceId,
};

/// Stored planet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 10, version = 1)]
#[native_db]
pub struct StoredPlanet {
    /// Primary key - planet ID.
    #[primary_key]
    pub id: u64,
    /// Owning player.
    #[secondary_key]
    pub player: u64,
    pub name: String,
    pub homeworld: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl StoredPlanet {
    pub fn from_entity(planet: &Planet) -> Self {
        Self {
            id: planet.id.raw(),
            player: planet.player.raw(),
            name: planet.name.clone(),
            homeworld: planet.homeworld,
            created_at: to_micros(planet.created_at),
            updated_at: to_micros(planet.updated_at),
        }
    }

    pub fn to_entity(&self) -> Planet {
        Planet {
            id: PlanetId::new(self.id),
            player: PlayerId::new(self.player),
            name: self.name.clone(),
            homeworld: self.homeworld,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}

/// Stored resource amount, keyed by (planet, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 11, version = 1)]
#[native_db(primary_key(planet_resource -> String))]
pub struct StoredPlanetResource {
    pub planet: u64,
    pub resource: u64,
    pub amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
    pub version: u64,
}

impl StoredPlanetResource {
    pub fn planet_resource(&self) -> String {
        keys::pair(self.planet, self.resource)
    }

    pub fn from_entity(resource: &PlanetResource) -> Self {
        Self {
            planet: resource.planet.raw(),
            resource: resource.resource.raw(),
            amount: resource.amount,
            created_at: to_micros(resource.created_at),
            updated_at: to_micros(resource.updated_at),
            version: resource.version,
        }
    }

    pub fn to_entity(&self) -> PlanetResource {
        PlanetResource {
            planet: PlanetId::new(self.planet),
            resource: ResourceId::new(self.resource),
            amount: self.amount,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
            version: self.version,
        }
    }
}

/// Stored production, keyed by (planet, origin, resource).
///
/// `building` is `None` for the planet's intrinsic production; the key
/// encodes that as its own origin segment, so there is at most one intrinsic
/// row per (planet, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 12, version = 1)]
#[native_db(primary_key(planet_origin_resource -> String))]
pub struct StoredPlanetResourceProduction {
    pub planet: u64,
    pub building: Option<u64>,
    pub resource: u64,
    pub production: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub version: u64,
}

impl StoredPlanetResourceProduction {
    pub fn planet_origin_resource(&self) -> String {
        keys::production(self.planet, self.origin(), self.resource)
    }

    fn origin(&self) -> ProductionOrigin {
        ProductionOrigin::from(self.building.map(BuildingId::new))
    }

    pub fn from_entity(production: &PlanetResourceProduction) -> Self {
        Self {
            planet: production.planet.raw(),
            building: production.origin.building().map(|b| b.raw()),
            resource: production.resource.raw(),
            production: production.production,
            created_at: to_micros(production.created_at),
            updated_at: to_micros(production.updated_at),
            version: production.version,
        }
    }

    pub fn to_entity(&self) -> PlanetResourceProduction {
        PlanetResourceProduction {
            planet: PlanetId::new(self.planet),
            origin: self.origin(),
            resource: ResourceId::new(self.resource),
            production: self.production,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
            version: self.version,
        }
    }
}

/// Stored storage cap, keyed by (planet, resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 13, version = 1)]
#[native_db(primary_key(planet_resource -> String))]
pub struct StoredPlanetResourceStorage {
    pub planet: u64,
    pub resource: u64,
    pub storage: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub version: u64,
}

impl StoredPlanetResourceStorage {
    pub fn planet_resource(&self) -> String {
        keys::pair(self.planet, self.resource)
    }

    pub fn from_entity(storage: &PlanetResourceStorage) -> Self {
        Self {
            planet: storage.planet.raw(),
            resource: storage.resource.raw(),
            storage: storage.storage,
            created_at: to_micros(storage.created_at),
            updated_at: to_micros(storage.updated_at),
            version: storage.version,
        }
    }

    pub fn to_entity(&self) -> PlanetResourceStorage {
        PlanetResourceStorage {
            planet: PlanetId::new(self.planet),
            resource: ResourceId::new(self.resource),
            storage: self.storage,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
            version: self.version,
        }
    }
}

/// Stored building level, keyed by (planet, building).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 14, version = 1)]
#[native_db(primary_key(planet_building -> String))]
pub struct StoredPlanetBuilding {
    pub planet: u64,
    pub building: u64,
    pub level: u32,
    pub created_at: i64,
    pub updated_at: i64,
    pub version: u64,
}

impl StoredPlanetBuilding {
    pub fn planet_building(&self) -> String {
        keys::pair(self.planet, self.building)
    }

    pub fn from_entity(building: &PlanetBuilding) -> Self {
        Self {
            planet: building.planet.raw(),
            building: building.building.raw(),
            level: building.level,
            created_at: to_micros(building.created_at),
            updated_at: to_micros(building.updated_at),
            version: building.version,
        }
    }

    pub fn to_entity(&self) -> PlanetBuilding {
        PlanetBuilding {
            planet: PlanetId::new(self.planet),
            building: BuildingId::new(self.building),
            level: self.level,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
            version: self.version,
        }
    }
}

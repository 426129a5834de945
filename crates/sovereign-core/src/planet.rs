//! Planet state rows
//!
//! Every row carries a `version` that storage bumps on each write. Amounts
//! are real-valued; callers that display integers round at the boundary.

use crate::catalog::{Building, Resource};
use crate::time::Timestamp;
use crate::{BuildingId, PlanetId, PlayerId, ResourceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A planet owned by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub player: PlayerId,
    pub name: String,
    pub homeworld: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Planet {
    /// Create a planet record
    pub fn new(
        id: PlanetId,
        player: PlayerId,
        name: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            player,
            name: name.into(),
            homeworld: false,
            created_at,
            updated_at: created_at,
        }
    }

    /// Mark this planet as the player's homeworld
    pub fn as_homeworld(mut self) -> Self {
        self.homeworld = true;
        self
    }
}

/// Where a production figure comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductionOrigin {
    /// The planet's base production, independent of buildings
    Intrinsic,
    /// Contribution of a building
    FromBuilding(BuildingId),
}

impl ProductionOrigin {
    /// Building contributing this production, if any
    pub fn building(&self) -> Option<BuildingId> {
        match self {
            ProductionOrigin::Intrinsic => None,
            ProductionOrigin::FromBuilding(id) => Some(*id),
        }
    }
}

impl From<Option<BuildingId>> for ProductionOrigin {
    fn from(building: Option<BuildingId>) -> Self {
        match building {
            Some(id) => ProductionOrigin::FromBuilding(id),
            None => ProductionOrigin::Intrinsic,
        }
    }
}

impl fmt::Display for ProductionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductionOrigin::Intrinsic => write!(f, "intrinsic"),
            ProductionOrigin::FromBuilding(id) => write!(f, "{}", id),
        }
    }
}

/// Amount of a resource held by a planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetResource {
    pub planet: PlanetId,
    pub resource: ResourceId,
    pub amount: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
}

/// Production per minute of one resource from one origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetResourceProduction {
    pub planet: PlanetId,
    pub origin: ProductionOrigin,
    pub resource: ResourceId,
    pub production: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
}

/// Storage cap of a resource on a planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetResourceStorage {
    pub planet: PlanetId,
    pub resource: ResourceId,
    pub storage: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
}

/// Level of a building on a planet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetBuilding {
    pub planet: PlanetId,
    pub building: BuildingId,
    pub level: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
}

/// Initial rows of a freshly created planet, derived from the catalog
#[derive(Debug, Clone, Default)]
pub struct PlanetSeed {
    pub resources: Vec<PlanetResource>,
    pub productions: Vec<PlanetResourceProduction>,
    pub storages: Vec<PlanetResourceStorage>,
    pub buildings: Vec<PlanetBuilding>,
}

impl PlanetSeed {
    /// Seed every resource at its start values and every building at level 0
    pub fn from_catalog(
        planet: PlanetId,
        resources: &[Resource],
        buildings: &[Building],
        at: Timestamp,
    ) -> Self {
        let mut seed = PlanetSeed::default();

        for resource in resources {
            seed.resources.push(PlanetResource {
                planet,
                resource: resource.id,
                amount: resource.start_amount,
                created_at: at,
                updated_at: at,
                version: 0,
            });
            seed.productions.push(PlanetResourceProduction {
                planet,
                origin: ProductionOrigin::Intrinsic,
                resource: resource.id,
                production: resource.start_production,
                created_at: at,
                updated_at: at,
                version: 0,
            });
            seed.storages.push(PlanetResourceStorage {
                planet,
                resource: resource.id,
                storage: resource.start_storage,
                created_at: at,
                updated_at: at,
                version: 0,
            });
        }

        for building in buildings {
            seed.buildings.push(PlanetBuilding {
                planet,
                building: building.id,
                level: 0,
                created_at: at,
                updated_at: at,
                version: 0,
            });
        }

        seed
    }
}

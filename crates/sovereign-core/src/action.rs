//! Building actions and their consolidation
//!
//! An action is a queued upgrade of one building on one planet by exactly
//! one level. Everything the action will do is computed once, when the
//! action is created, and stored alongside it:
//!
//! - the resources it costs (debited immediately),
//! - the production delta per resource (merged on completion),
//! - the storage delta per resource (merged on completion).
//!
//! Settlement never re-reads the catalog, so the effects applied at
//! completion always match the effects that were scheduled.

use crate::catalog::{
    BuildingCost, BuildingResourceProduction, BuildingResourceStorage, BuildingSpec, Resource,
};
use crate::completion::CompletionTime;
use crate::error::{Error, Result};
use crate::planet::{
    PlanetBuilding, PlanetResource, PlanetResourceProduction, PlanetResourceStorage,
    ProductionOrigin,
};
use crate::time::Timestamp;
use crate::{ActionId, BuildingId, PlanetId, ResourceId};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// A signed quantity of one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAmount {
    pub resource: ResourceId,
    pub amount: i64,
}

impl ResourceAmount {
    pub fn new(resource: ResourceId, amount: i64) -> Self {
        Self { resource, amount }
    }
}

/// Request to upgrade a building on a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub planet: PlanetId,
    pub building: BuildingId,
}

impl ActionRequest {
    pub fn new(planet: PlanetId, building: BuildingId) -> Self {
        Self { planet, building }
    }
}

/// A queued building upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingAction {
    pub id: ActionId,
    pub planet: PlanetId,
    pub building: BuildingId,
    pub current_level: u32,
    pub desired_level: u32,
    pub created_at: Timestamp,
    pub completed_at: Timestamp,
}

impl BuildingAction {
    /// Whether the action is due at `at`
    pub fn is_completed_at(&self, at: Timestamp) -> bool {
        self.completed_at <= at
    }

    /// Building row after this action completes
    pub fn upgrade(&self, building: PlanetBuilding) -> PlanetBuilding {
        PlanetBuilding {
            level: self.desired_level,
            updated_at: self.completed_at,
            ..building
        }
    }

    /// Building row for a planet that had no row for this building yet
    pub fn new_building(&self) -> PlanetBuilding {
        PlanetBuilding {
            planet: self.planet,
            building: self.building,
            level: self.desired_level,
            created_at: self.completed_at,
            updated_at: self.completed_at,
            version: 0,
        }
    }
}

/// Resource debit recorded when an action is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingActionCost {
    pub action: ActionId,
    pub resource: ResourceId,
    pub amount: i64,
}

/// Production delta applied when an action completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingActionResourceProduction {
    pub action: ActionId,
    pub resource: ResourceId,
    pub production: i64,
}

impl BuildingActionResourceProduction {
    /// Add this delta to the planet's existing production row
    pub fn merge_into(
        &self,
        production: PlanetResourceProduction,
        at: Timestamp,
    ) -> PlanetResourceProduction {
        PlanetResourceProduction {
            production: production.production + self.production,
            updated_at: at,
            ..production
        }
    }

    /// Production row created by the first level of a building
    pub fn to_planet_production(&self, action: &BuildingAction) -> PlanetResourceProduction {
        PlanetResourceProduction {
            planet: action.planet,
            origin: ProductionOrigin::FromBuilding(action.building),
            resource: self.resource,
            production: self.production,
            created_at: action.completed_at,
            updated_at: action.completed_at,
            version: 0,
        }
    }
}

/// Storage delta applied when an action completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingActionResourceStorage {
    pub action: ActionId,
    pub resource: ResourceId,
    pub storage: i64,
}

impl BuildingActionResourceStorage {
    /// Add this delta to the planet's storage row; storage never drops below 0
    pub fn merge_into(&self, storage: PlanetResourceStorage, at: Timestamp) -> PlanetResourceStorage {
        PlanetResourceStorage {
            storage: (storage.storage + self.storage).max(0),
            updated_at: at,
            ..storage
        }
    }
}

/// Fully consolidated action, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPlan {
    pub planet: PlanetId,
    pub building: BuildingId,
    pub current_level: u32,
    pub desired_level: u32,
    pub created_at: Timestamp,
    pub completed_at: Timestamp,
    pub costs: Vec<ResourceAmount>,
    pub productions: Vec<ResourceAmount>,
    pub storages: Vec<ResourceAmount>,
}

impl ActionPlan {
    /// Action row once storage assigned `id`
    pub fn to_action(&self, id: ActionId) -> BuildingAction {
        BuildingAction {
            id,
            planet: self.planet,
            building: self.building,
            current_level: self.current_level,
            desired_level: self.desired_level,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }

    pub fn cost_rows(&self, id: ActionId) -> Vec<BuildingActionCost> {
        self.costs
            .iter()
            .map(|c| BuildingActionCost {
                action: id,
                resource: c.resource,
                amount: c.amount,
            })
            .collect()
    }

    pub fn production_rows(&self, id: ActionId) -> Vec<BuildingActionResourceProduction> {
        self.productions
            .iter()
            .map(|p| BuildingActionResourceProduction {
                action: id,
                resource: p.resource,
                production: p.amount,
            })
            .collect()
    }

    pub fn storage_rows(&self, id: ActionId) -> Vec<BuildingActionResourceStorage> {
        self.storages
            .iter()
            .map(|s| BuildingActionResourceStorage {
                action: id,
                resource: s.resource,
                storage: s.amount,
            })
            .collect()
    }
}

/// Current and desired level of `building` given the planet's buildings
///
/// A building the planet has no row for is at level 0.
pub fn consolidate_level(building: BuildingId, buildings: &[PlanetBuilding]) -> (u32, u32) {
    let current = buildings
        .iter()
        .find(|b| b.building == building)
        .map(|b| b.level)
        .unwrap_or(0);
    (current, current + 1)
}

/// Cost of reaching `level`
pub fn determine_costs(costs: &[BuildingCost], level: u32) -> Vec<ResourceAmount> {
    costs
        .iter()
        .map(|cost| ResourceAmount::new(cost.resource, cost.cost_at(level)))
        .collect()
}

/// Production gained by going from `level - 1` to `level`
pub fn determine_production_deltas(
    productions: &[BuildingResourceProduction],
    level: u32,
) -> Vec<ResourceAmount> {
    productions
        .iter()
        .map(|p| {
            let previous = p.production_at(level.saturating_sub(1));
            ResourceAmount::new(p.resource, p.production_at(level) - previous)
        })
        .collect()
}

/// Storage gained by going from `level - 1` to `level`
pub fn determine_storage_deltas(
    storages: &[BuildingResourceStorage],
    level: u32,
) -> Vec<ResourceAmount> {
    storages
        .iter()
        .map(|s| {
            let previous = s.storage_at(level.saturating_sub(1));
            ResourceAmount::new(s.resource, s.storage_at(level) - previous)
        })
        .collect()
}

/// Check the planet holds every cost resource in sufficient quantity
pub fn validate_costs(resources: &[PlanetResource], costs: &[ResourceAmount]) -> Result<()> {
    for cost in costs {
        let held = resources
            .iter()
            .find(|r| r.resource == cost.resource)
            .ok_or(Error::UnknownResource(cost.resource))?;
        if held.amount < cost.amount as f64 {
            return Err(Error::NotEnoughResources {
                resource: cost.resource,
                required: cost.amount,
                available: held.amount,
            });
        }
    }
    Ok(())
}

/// Subtract a cost from a resource row
pub fn debit(resource: &PlanetResource, cost: i64) -> PlanetResource {
    PlanetResource {
        amount: resource.amount - cost as f64,
        ..resource.clone()
    }
}

/// Give a cost back to a resource row, losing whatever exceeds `cap`
pub fn refund(resource: &PlanetResource, cost: i64, cap: Option<i64>) -> PlanetResource {
    let mut amount = resource.amount + cost as f64;
    if let Some(cap) = cap {
        amount = amount.min(cap as f64);
    }
    PlanetResource {
        amount,
        ..resource.clone()
    }
}

/// Everything needed to consolidate an upgrade request
pub struct PlanInputs<'a> {
    pub spec: &'a BuildingSpec,
    pub catalog: &'a [Resource],
    pub resources: &'a [PlanetResource],
    pub buildings: &'a [PlanetBuilding],
}

/// Shortest build time; completion must stay strictly after creation
const MIN_DURATION_MICROS: i64 = 1;

/// Consolidate and validate an upgrade request at instant `at`
///
/// `inputs.resources` must already reflect integration up to `at`.
pub fn plan_action(
    request: ActionRequest,
    at: Timestamp,
    inputs: PlanInputs<'_>,
    completion: &dyn CompletionTime,
) -> Result<ActionPlan> {
    if inputs.spec.building.id != request.building {
        return Err(Error::UnknownBuilding(request.building));
    }

    let (current_level, desired_level) = consolidate_level(request.building, inputs.buildings);
    let costs = determine_costs(&inputs.spec.costs, desired_level);

    let duration = completion
        .duration(inputs.catalog, &costs)?
        .max(TimeDelta::microseconds(MIN_DURATION_MICROS));

    let productions = determine_production_deltas(&inputs.spec.productions, desired_level);
    let storages = determine_storage_deltas(&inputs.spec.storages, desired_level);

    validate_costs(inputs.resources, &costs)?;

    Ok(ActionPlan {
        planet: request.planet,
        building: request.building,
        current_level,
        desired_level,
        created_at: at,
        completed_at: at + duration,
        costs,
        productions,
        storages,
    })
}

//! Building action lifecycle: creation, cancellation and completion.
//!
//! Every function here works inside the caller's transaction. Creation
//! expects the planet to have been advanced to the transaction timestamp
//! already; completion advances it to the action's deadline itself.

use crate::error::{Error, Result};
use crate::resource::advance_planet;
use sovereign_core::action::{debit, plan_action, refund, PlanInputs};
use sovereign_core::{ActionId, ActionRequest, BuildingAction, CompletionTime, ProductionOrigin};
use sovereign_db::repositories::action_sidecars::{costs, productions, storages};
use sovereign_db::repositories::{
    building_actions, buildings, planet_buildings, planet_productions, planet_resources,
    planet_storages, planets, resources,
};
use sovereign_db::Transaction;
use std::sync::Arc;

/// Creates, cancels and settles building actions
#[derive(Clone)]
pub struct ActionEngine {
    completion: Arc<dyn CompletionTime>,
}

impl ActionEngine {
    pub fn new(completion: Arc<dyn CompletionTime>) -> Self {
        Self { completion }
    }

    /// Validate an upgrade request, debit its cost and persist the action.
    pub fn create(&self, tx: &Transaction<'_>, request: ActionRequest) -> Result<BuildingAction> {
        let planet = request.planet;
        if planets::get(tx, planet)?.is_none() {
            return Err(sovereign_db::Error::NotFound(planet.to_string()).into());
        }
        let spec = buildings::spec(tx, request.building)?
            .ok_or(Error::UnknownBuilding(request.building))?;

        if let Some(existing) =
            building_actions::get_for_planet_and_building(tx, planet, request.building)?
        {
            log::warn!(
                "Rejected upgrade of {} on {}: {} is still pending",
                request.building,
                planet,
                existing.id
            );
            return Err(Error::ConflictingStateForAction(format!(
                "{} already upgrades {} on {}",
                existing.id, request.building, planet
            )));
        }

        let catalog = resources::list(tx)?;
        let held = planet_resources::list_for_planet(tx, planet)?;
        let levels = planet_buildings::list_for_planet(tx, planet)?;
        let plan = plan_action(
            request,
            tx.timestamp(),
            PlanInputs {
                spec: &spec,
                catalog: &catalog,
                resources: &held,
                buildings: &levels,
            },
            self.completion.as_ref(),
        )?;

        for cost in &plan.costs {
            let resource = held
                .iter()
                .find(|r| r.resource == cost.resource)
                .ok_or(Error::ActionUsesUnknownResource(cost.resource))?;
            planet_resources::update(tx, &debit(resource, cost.amount))
                .map_err(Error::for_action)?;
        }

        let action = building_actions::create(tx, &plan).map_err(Error::for_action)?;
        log::info!(
            "Scheduled {} on {}: {} level {} -> {}, due {}",
            action.id,
            action.planet,
            action.building,
            action.current_level,
            action.desired_level,
            action.completed_at
        );
        Ok(action)
    }

    /// Cancel a pending action and refund its cost, clamped to storage.
    pub fn delete(&self, tx: &Transaction<'_>, id: ActionId) -> Result<BuildingAction> {
        let action = building_actions::get(tx, id)?
            .ok_or_else(|| sovereign_db::Error::NotFound(id.to_string()))?;
        if action.is_completed_at(tx.timestamp()) {
            return Err(Error::ActionAlreadyCompleted(id));
        }

        let held = planet_resources::list_for_planet(tx, action.planet)?;
        let caps = planet_storages::list_for_planet(tx, action.planet)?;
        for cost in costs::list_for_action(tx, id)? {
            let resource = held
                .iter()
                .find(|r| r.resource == cost.resource)
                .ok_or(Error::ActionUsesUnknownResource(cost.resource))?;
            let cap = caps
                .iter()
                .find(|s| s.resource == cost.resource)
                .map(|s| s.storage);
            planet_resources::update(tx, &refund(resource, cost.amount, cap))
                .map_err(Error::for_action)?;
        }

        building_actions::delete(tx, id)?;
        log::info!("Cancelled {} on {}", action.id, action.planet);
        Ok(action)
    }

    /// Apply a due action to its planet and remove it.
    pub fn complete(&self, tx: &Transaction<'_>, action: &BuildingAction) -> Result<()> {
        let at = action.completed_at;
        advance_planet(tx, action.planet, at)?;

        match planet_buildings::get_for_planet_and_building(tx, action.planet, action.building)? {
            Some(building) => planet_buildings::update(tx, &action.upgrade(building))?,
            None => planet_buildings::create(tx, &action.new_building())?,
        };

        let origin = ProductionOrigin::FromBuilding(action.building);
        for delta in productions::list_for_action(tx, action.id)? {
            match planet_productions::get(tx, action.planet, origin, delta.resource)? {
                Some(production) => {
                    planet_productions::update(tx, &delta.merge_into(production, at))?
                }
                None => planet_productions::create(tx, &delta.to_planet_production(action))?,
            };
        }

        for delta in storages::list_for_action(tx, action.id)? {
            let storage =
                planet_storages::get_for_planet_and_resource(tx, action.planet, delta.resource)?
                    .ok_or(Error::ActionUpdatesUnknownResource(delta.resource))?;
            planet_storages::update(tx, &delta.merge_into(storage, at))?;
        }

        building_actions::delete(tx, action.id)?;
        log::info!(
            "Completed {} on {}: {} now at level {}",
            action.id,
            action.planet,
            action.building,
            action.desired_level
        );
        Ok(())
    }
}

//! Building actions in flight.
//!
//! An action is persisted together with its sidecars and removed together
//! with them, either when it is settled or when it is cancelled.

use super::action_sidecars::{costs, productions, storages};
use super::{planets, sequences};
use crate::connection::Transaction;
use crate::error::{Error, Result};
use crate::keys;
use crate::models::{StoredBuildingAction, StoredBuildingActionKey};
use sovereign_core::time::to_micros;
use sovereign_core::{ActionId, ActionPlan, BuildingAction, BuildingId, PlanetId, PlayerId, Timestamp};

/// Rows of `$planet` on the `(planet, completed_at, id)` index.
macro_rules! scan_planet {
    ($r:expr, $planet:expr) => {{
        let scan = $r
            .scan()
            .secondary::<StoredBuildingAction>(StoredBuildingActionKey::planet_completion)?;
        let rows: std::result::Result<Vec<StoredBuildingAction>, _> =
            scan.start_with(keys::prefix($planet.raw()))?.collect();
        rows?
    }};
}

/// Persist a planned action and its sidecars under a fresh id.
///
/// A second action for the same (planet, building) fails with
/// [`Error::DuplicateKey`].
pub fn create(tx: &Transaction<'_>, plan: &ActionPlan) -> Result<BuildingAction> {
    let id = ActionId::new(sequences::next(tx, sequences::BUILDING_ACTION)?);
    let action = plan.to_action(id);
    tx.rw()?
        .insert(StoredBuildingAction::from_entity(&action))?;

    for cost in plan.cost_rows(id) {
        costs::create(tx, &cost)?;
    }
    for production in plan.production_rows(id) {
        productions::create(tx, &production)?;
    }
    for storage in plan.storage_rows(id) {
        storages::create(tx, &storage)?;
    }

    log::debug!(
        "Stored {} for {} on {} (level {} -> {})",
        action.id,
        action.building,
        action.planet,
        action.current_level,
        action.desired_level
    );
    Ok(action)
}

pub fn get(tx: &Transaction<'_>, id: ActionId) -> Result<Option<BuildingAction>> {
    let stored = read!(tx, r => r.get().primary::<StoredBuildingAction>(id.raw())?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn get_for_planet_and_building(
    tx: &Transaction<'_>,
    planet: PlanetId,
    building: BuildingId,
) -> Result<Option<BuildingAction>> {
    let stored = read!(tx, r => r.get().secondary::<StoredBuildingAction>(
        StoredBuildingActionKey::planet_building,
        keys::pair(planet.raw(), building.raw()),
    )?);
    Ok(stored.map(|s| s.to_entity()))
}

/// Every action of a planet, ordered by `(completed_at, id)`.
pub fn list_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<Vec<BuildingAction>> {
    let rows = read!(tx, r => scan_planet!(r, planet));
    Ok(rows.iter().map(StoredBuildingAction::to_entity).collect())
}

/// Actions of a planet with `completed_at <= until`, ordered by
/// `(completed_at, id)`.
pub fn list_before_completion_time(
    tx: &Transaction<'_>,
    planet: PlanetId,
    until: Timestamp,
) -> Result<Vec<BuildingAction>> {
    let until = to_micros(until);
    let rows = read!(tx, r => scan_planet!(r, planet));
    Ok(rows
        .iter()
        .take_while(|row| row.completed_at <= until)
        .map(StoredBuildingAction::to_entity)
        .collect())
}

/// Delete an action and its sidecars.
pub fn delete(tx: &Transaction<'_>, id: ActionId) -> Result<BuildingAction> {
    let rw = tx.rw()?;
    let stored = rw
        .get()
        .primary::<StoredBuildingAction>(id.raw())?
        .ok_or_else(|| Error::not_found(id))?;
    remove(tx, stored)
}

fn remove(tx: &Transaction<'_>, stored: StoredBuildingAction) -> Result<BuildingAction> {
    let action = stored.to_entity();
    costs::delete_for_action(tx, action.id)?;
    productions::delete_for_action(tx, action.id)?;
    storages::delete_for_action(tx, action.id)?;
    tx.rw()?.remove(stored)?;
    log::debug!("Removed {} from {}", action.id, action.planet);
    Ok(action)
}

pub fn delete_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<usize> {
    // The scan must be closed before rows are removed from its table.
    let rows = {
        let rw = tx.rw()?;
        scan_planet!(rw, planet)
    };
    let count = rows.len();
    for row in rows {
        remove(tx, row)?;
    }
    Ok(count)
}

pub fn delete_for_player(tx: &Transaction<'_>, player: PlayerId) -> Result<usize> {
    let mut count = 0;
    for planet in planets::list_for_player(tx, player)? {
        count += delete_for_planet(tx, planet.id)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{connection, t0};
    use crate::Context;
    use chrono::TimeDelta;
    use sovereign_core::{ResourceAmount, ResourceId};

    const METAL: ResourceId = ResourceId(1);

    fn plan(planet: u64, building: u64, minutes: i64) -> ActionPlan {
        ActionPlan {
            planet: PlanetId(planet),
            building: BuildingId(building),
            current_level: 0,
            desired_level: 1,
            created_at: t0(),
            completed_at: t0() + TimeDelta::minutes(minutes),
            costs: vec![ResourceAmount::new(METAL, 100)],
            productions: vec![ResourceAmount::new(METAL, 33)],
            storages: vec![ResourceAmount::new(METAL, 0)],
        }
    }

    #[test]
    fn test_create_assigns_ids_and_sidecars() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        let first = create(&tx, &plan(1, 1, 5)).unwrap();
        let second = create(&tx, &plan(1, 2, 5)).unwrap();
        assert_eq!(first.id, ActionId(1));
        assert_eq!(second.id, ActionId(2));

        let action_costs = costs::list_for_action(&tx, first.id).unwrap();
        assert_eq!(action_costs.len(), 1);
        assert_eq!(action_costs[0].amount, 100);
        assert_eq!(
            productions::list_for_action(&tx, first.id).unwrap()[0].production,
            33
        );
        assert_eq!(storages::list_for_action(&tx, first.id).unwrap().len(), 1);
        assert_eq!(get(&tx, first.id).unwrap(), Some(first));
    }

    #[test]
    fn test_second_action_for_same_building_is_rejected() {
        let (conn, _clock) = connection();
        let ctx = Context::new();
        let tx = conn.begin(&ctx).unwrap();
        create(&tx, &plan(1, 1, 5)).unwrap();
        tx.commit().unwrap();

        let tx = conn.begin(&ctx).unwrap();
        let err = create(&tx, &plan(1, 1, 9)).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
        drop(tx);

        let tx = conn.begin(&ctx).unwrap();
        let existing = get_for_planet_and_building(&tx, PlanetId(1), BuildingId(1))
            .unwrap()
            .unwrap();
        assert_eq!(existing.completed_at, t0() + TimeDelta::minutes(5));
    }

    #[test]
    fn test_listing_orders_by_completion_then_id() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        let late = create(&tx, &plan(1, 1, 10)).unwrap();
        let early = create(&tx, &plan(1, 2, 2)).unwrap();
        let tie = create(&tx, &plan(1, 3, 10)).unwrap();
        create(&tx, &plan(2, 1, 1)).unwrap();

        let ids: Vec<ActionId> = list_for_planet(&tx, PlanetId(1))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id, tie.id]);

        let due = list_before_completion_time(&tx, PlanetId(1), t0() + TimeDelta::minutes(10))
            .unwrap();
        assert_eq!(due.len(), 3);
        let due = list_before_completion_time(&tx, PlanetId(1), t0() + TimeDelta::minutes(9))
            .unwrap();
        assert_eq!(due, vec![early]);
        assert!(list_before_completion_time(&tx, PlanetId(1), t0())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_delete_cascades_to_sidecars() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        let action = create(&tx, &plan(1, 1, 5)).unwrap();

        let deleted = delete(&tx, action.id).unwrap();
        assert_eq!(deleted, action);
        assert_eq!(get(&tx, action.id).unwrap(), None);
        assert!(costs::list_for_action(&tx, action.id).unwrap().is_empty());
        assert!(productions::list_for_action(&tx, action.id)
            .unwrap()
            .is_empty());
        assert!(storages::list_for_action(&tx, action.id).unwrap().is_empty());

        // The building is free for a new action again.
        create(&tx, &plan(1, 1, 7)).unwrap();
    }

    #[test]
    fn test_delete_missing_action_is_not_found() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        let err = delete(&tx, ActionId(42)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_delete_for_planet() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        create(&tx, &plan(1, 1, 5)).unwrap();
        create(&tx, &plan(1, 2, 6)).unwrap();
        let kept = create(&tx, &plan(2, 1, 5)).unwrap();

        assert_eq!(delete_for_planet(&tx, PlanetId(1)).unwrap(), 2);
        assert!(list_for_planet(&tx, PlanetId(1)).unwrap().is_empty());
        assert_eq!(list_for_planet(&tx, PlanetId(2)).unwrap(), vec![kept]);
    }

    #[test]
    fn test_delete_for_planet_removes_sidecars_and_commits() {
        let (conn, _clock) = connection();
        let ctx = Context::new();
        let tx = conn.begin(&ctx).unwrap();
        let first = create(&tx, &plan(1, 1, 5)).unwrap();
        let second = create(&tx, &plan(1, 2, 5)).unwrap();
        tx.commit().unwrap();

        let tx = conn.begin(&ctx).unwrap();
        assert_eq!(delete_for_planet(&tx, PlanetId(1)).unwrap(), 2);
        tx.commit().unwrap();

        let tx = conn.read(&ctx).unwrap();
        assert!(list_for_planet(&tx, PlanetId(1)).unwrap().is_empty());
        for id in [first.id, second.id] {
            assert!(costs::list_for_action(&tx, id).unwrap().is_empty());
            assert!(productions::list_for_action(&tx, id).unwrap().is_empty());
            assert!(storages::list_for_action(&tx, id).unwrap().is_empty());
        }
    }
}

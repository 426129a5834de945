//! Planets and their cascades.

use super::{
    building_actions, buildings, planet_buildings, planet_productions, planet_resources,
    planet_storages, resources, sequences,
};
use crate::connection::Transaction;
use crate::error::{Error, Result};
use crate::models::{StoredPlanet, StoredPlanetKey};
use sovereign_core::{Planet, PlanetId, PlanetSeed, PlayerId};

/// Create a planet at the transaction timestamp and seed its state from the
/// catalog: every resource at its start values, every building at level 0.
pub fn create(
    tx: &Transaction<'_>,
    player: PlayerId,
    name: &str,
    homeworld: bool,
) -> Result<Planet> {
    let at = tx.timestamp();
    let id = PlanetId::new(sequences::next(tx, sequences::PLANET)?);
    let mut planet = Planet::new(id, player, name, at);
    planet.homeworld = homeworld;
    tx.rw()?.insert(StoredPlanet::from_entity(&planet))?;

    let catalog = resources::list(tx)?;
    let catalog_buildings = buildings::list(tx)?;
    let seed = PlanetSeed::from_catalog(id, &catalog, &catalog_buildings, at);
    for resource in &seed.resources {
        planet_resources::create(tx, resource)?;
    }
    for production in &seed.productions {
        planet_productions::create(tx, production)?;
    }
    for storage in &seed.storages {
        planet_storages::create(tx, storage)?;
    }
    for building in &seed.buildings {
        planet_buildings::create(tx, building)?;
    }

    log::info!(
        "Created {} '{}' for {} with {} resources and {} buildings",
        planet.id,
        planet.name,
        planet.player,
        seed.resources.len(),
        seed.buildings.len()
    );
    Ok(planet)
}

pub fn get(tx: &Transaction<'_>, id: PlanetId) -> Result<Option<Planet>> {
    let stored = read!(tx, r => r.get().primary::<StoredPlanet>(id.raw())?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn list(tx: &Transaction<'_>) -> Result<Vec<Planet>> {
    let rows = read!(tx, r => scan_all!(r, StoredPlanet));
    Ok(rows.iter().map(StoredPlanet::to_entity).collect())
}

pub fn list_for_player(tx: &Transaction<'_>, player: PlayerId) -> Result<Vec<Planet>> {
    let rows = read!(tx, r => {
        let scan = r.scan().secondary::<StoredPlanet>(StoredPlanetKey::player)?;
        let rows: std::result::Result<Vec<StoredPlanet>, _> =
            scan.start_with(player.raw())?.collect();
        rows?
    });
    Ok(rows.iter().map(StoredPlanet::to_entity).collect())
}

/// Delete a planet with all of its state rows and actions.
pub fn delete(tx: &Transaction<'_>, id: PlanetId) -> Result<Planet> {
    let rw = tx.rw()?;
    let stored = rw
        .get()
        .primary::<StoredPlanet>(id.raw())?
        .ok_or_else(|| Error::not_found(id))?;

    let actions = building_actions::delete_for_planet(tx, id)?;
    planet_resources::delete_for_planet(tx, id)?;
    planet_productions::delete_for_planet(tx, id)?;
    planet_storages::delete_for_planet(tx, id)?;
    planet_buildings::delete_for_planet(tx, id)?;

    let planet = stored.to_entity();
    tx.rw()?.remove(stored)?;
    log::info!("Deleted {} and {} pending actions", planet.id, actions);
    Ok(planet)
}

pub fn delete_for_player(tx: &Transaction<'_>, player: PlayerId) -> Result<usize> {
    let planets = list_for_player(tx, player)?;
    let count = planets.len();
    for planet in planets {
        delete(tx, planet.id)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::action_sidecars::costs;
    use crate::testing::{connection, install_catalog, t0, METAL, MINE};
    use crate::Context;
    use chrono::TimeDelta;
    use sovereign_core::{ActionPlan, ProductionOrigin, ResourceAmount};

    #[test]
    fn test_create_seeds_from_catalog() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        install_catalog(&tx);

        let planet = create(&tx, PlayerId(7), "Terra", true).unwrap();
        assert_eq!(planet.id, PlanetId(1));
        assert!(planet.homeworld);
        assert_eq!(planet.created_at, t0());

        let amounts = planet_resources::list_for_planet(&tx, planet.id).unwrap();
        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].resource, METAL);
        assert_eq!(amounts[0].amount, 500.0);
        assert_eq!(amounts[0].updated_at, t0());

        let productions = planet_productions::list_for_planet(&tx, planet.id).unwrap();
        assert_eq!(productions.len(), 1);
        assert_eq!(productions[0].origin, ProductionOrigin::Intrinsic);
        assert_eq!(productions[0].production, 60);

        let storage = planet_storages::get_for_planet_and_resource(&tx, planet.id, METAL)
            .unwrap()
            .unwrap();
        assert_eq!(storage.storage, 10_000);

        let mine = planet_buildings::get_for_planet_and_building(&tx, planet.id, MINE)
            .unwrap()
            .unwrap();
        assert_eq!(mine.level, 0);
    }

    #[test]
    fn test_list_for_player() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        install_catalog(&tx);
        let a = create(&tx, PlayerId(1), "A", true).unwrap();
        let b = create(&tx, PlayerId(2), "B", true).unwrap();
        let c = create(&tx, PlayerId(1), "C", false).unwrap();

        assert_eq!(list(&tx).unwrap().len(), 3);
        assert_eq!(list_for_player(&tx, PlayerId(1)).unwrap(), vec![a, c]);
        assert_eq!(list_for_player(&tx, PlayerId(2)).unwrap(), vec![b]);
        assert!(list_for_player(&tx, PlayerId(3)).unwrap().is_empty());
    }

    #[test]
    fn test_delete_cascades() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        install_catalog(&tx);
        let planet = create(&tx, PlayerId(1), "Doomed", false).unwrap();
        let action = building_actions::create(
            &tx,
            &ActionPlan {
                planet: planet.id,
                building: MINE,
                current_level: 0,
                desired_level: 1,
                created_at: t0(),
                completed_at: t0() + TimeDelta::minutes(3),
                costs: vec![ResourceAmount::new(METAL, 100)],
                productions: vec![],
                storages: vec![],
            },
        )
        .unwrap();

        delete(&tx, planet.id).unwrap();
        assert_eq!(get(&tx, planet.id).unwrap(), None);
        assert!(planet_resources::list_for_planet(&tx, planet.id)
            .unwrap()
            .is_empty());
        assert!(planet_productions::list_for_planet(&tx, planet.id)
            .unwrap()
            .is_empty());
        assert!(planet_storages::list_for_planet(&tx, planet.id)
            .unwrap()
            .is_empty());
        assert!(planet_buildings::list_for_planet(&tx, planet.id)
            .unwrap()
            .is_empty());
        assert_eq!(building_actions::get(&tx, action.id).unwrap(), None);
        assert!(costs::list_for_action(&tx, action.id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_for_player_keeps_other_players() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        install_catalog(&tx);
        create(&tx, PlayerId(1), "A", true).unwrap();
        create(&tx, PlayerId(1), "B", false).unwrap();
        let other = create(&tx, PlayerId(2), "C", true).unwrap();

        assert_eq!(delete_for_player(&tx, PlayerId(1)).unwrap(), 2);
        assert_eq!(list(&tx).unwrap(), vec![other]);
    }

    #[test]
    fn test_delete_missing_planet_is_not_found() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        assert!(matches!(
            delete(&tx, PlanetId(9)).unwrap_err(),
            Error::NotFound(_)
        ));
    }
}

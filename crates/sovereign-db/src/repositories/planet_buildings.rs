//! Building levels of planets.

use crate::connection::Transaction;
use crate::error::{Error, Result};
use crate::keys;
use crate::models::StoredPlanetBuilding;
use sovereign_core::{BuildingId, PlanetBuilding, PlanetId};

pub fn create(tx: &Transaction<'_>, building: &PlanetBuilding) -> Result<PlanetBuilding> {
    tx.rw()?
        .insert(StoredPlanetBuilding::from_entity(building))?;
    Ok(building.clone())
}

pub fn list_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<Vec<PlanetBuilding>> {
    let prefix = keys::prefix(planet.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredPlanetBuilding, prefix));
    Ok(rows.iter().map(StoredPlanetBuilding::to_entity).collect())
}

pub fn get_for_planet_and_building(
    tx: &Transaction<'_>,
    planet: PlanetId,
    building: BuildingId,
) -> Result<Option<PlanetBuilding>> {
    let key = keys::pair(planet.raw(), building.raw());
    let stored = read!(tx, r => r.get().primary::<StoredPlanetBuilding>(key)?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn update(tx: &Transaction<'_>, building: &PlanetBuilding) -> Result<PlanetBuilding> {
    let rw = tx.rw()?;
    let key = keys::pair(building.planet.raw(), building.building.raw());
    let current = rw
        .get()
        .primary::<StoredPlanetBuilding>(key)?
        .ok_or_else(|| {
            Error::conflict(format!(
                "{} on {} no longer exists",
                building.building, building.planet
            ))
        })?;
    if current.version != building.version {
        log::warn!(
            "Stale write to {} on {}",
            building.building,
            building.planet
        );
        return Err(Error::conflict(format!(
            "{} on {} changed (version {}, expected {})",
            building.building, building.planet, current.version, building.version
        )));
    }

    let mut next = building.clone();
    next.version += 1;
    rw.update(current, StoredPlanetBuilding::from_entity(&next))?;
    log::debug!(
        "{} on {} at level {} (version {})",
        next.building,
        next.planet,
        next.level,
        next.version
    );
    Ok(next)
}

pub fn delete_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<usize> {
    let rw = tx.rw()?;
    let rows = scan_prefix!(rw, StoredPlanetBuilding, keys::prefix(planet.raw()));
    let count = rows.len();
    for row in rows {
        rw.remove(row)?;
    }
    Ok(count)
}

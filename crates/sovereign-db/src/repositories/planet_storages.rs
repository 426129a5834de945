//! Storage caps of planets.

use crate::connection::Transaction;
use crate::error::{Error, Result};
use crate::keys;
use crate::models::StoredPlanetResourceStorage;
use sovereign_core::{PlanetId, PlanetResourceStorage, ResourceId};

pub fn create(
    tx: &Transaction<'_>,
    storage: &PlanetResourceStorage,
) -> Result<PlanetResourceStorage> {
    tx.rw()?
        .insert(StoredPlanetResourceStorage::from_entity(storage))?;
    Ok(storage.clone())
}

pub fn list_for_planet(
    tx: &Transaction<'_>,
    planet: PlanetId,
) -> Result<Vec<PlanetResourceStorage>> {
    let prefix = keys::prefix(planet.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredPlanetResourceStorage, prefix));
    Ok(rows
        .iter()
        .map(StoredPlanetResourceStorage::to_entity)
        .collect())
}

pub fn get_for_planet_and_resource(
    tx: &Transaction<'_>,
    planet: PlanetId,
    resource: ResourceId,
) -> Result<Option<PlanetResourceStorage>> {
    let key = keys::pair(planet.raw(), resource.raw());
    let stored = read!(tx, r => r.get().primary::<StoredPlanetResourceStorage>(key)?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn update(
    tx: &Transaction<'_>,
    storage: &PlanetResourceStorage,
) -> Result<PlanetResourceStorage> {
    let rw = tx.rw()?;
    let key = keys::pair(storage.planet.raw(), storage.resource.raw());
    let current = rw
        .get()
        .primary::<StoredPlanetResourceStorage>(key)?
        .ok_or_else(|| {
            Error::conflict(format!(
                "storage of {} on {} no longer exists",
                storage.resource, storage.planet
            ))
        })?;
    if current.version != storage.version {
        log::warn!(
            "Stale write to storage of {} on {}",
            storage.resource,
            storage.planet
        );
        return Err(Error::conflict(format!(
            "storage of {} on {} changed (version {}, expected {})",
            storage.resource, storage.planet, current.version, storage.version
        )));
    }

    let mut next = storage.clone();
    next.version += 1;
    rw.update(current, StoredPlanetResourceStorage::from_entity(&next))?;
    log::debug!(
        "Storage of {} on {}: {} (version {})",
        next.resource,
        next.planet,
        next.storage,
        next.version
    );
    Ok(next)
}

pub fn delete_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<usize> {
    let rw = tx.rw()?;
    let rows = scan_prefix!(rw, StoredPlanetResourceStorage, keys::prefix(planet.raw()));
    let count = rows.len();
    for row in rows {
        rw.remove(row)?;
    }
    Ok(count)
}

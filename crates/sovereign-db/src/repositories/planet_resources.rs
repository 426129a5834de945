//! Resource amounts held by planets.

use crate::connection::Transaction;
use crate::error::{Error, Result};
use crate::keys;
use crate::models::StoredPlanetResource;
use sovereign_core::{PlanetId, PlanetResource, ResourceId};

pub fn create(tx: &Transaction<'_>, resource: &PlanetResource) -> Result<PlanetResource> {
    tx.rw()?
        .insert(StoredPlanetResource::from_entity(resource))?;
    Ok(resource.clone())
}

pub fn list_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<Vec<PlanetResource>> {
    let prefix = keys::prefix(planet.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredPlanetResource, prefix));
    Ok(rows.iter().map(StoredPlanetResource::to_entity).collect())
}

pub fn get_for_planet_and_resource(
    tx: &Transaction<'_>,
    planet: PlanetId,
    resource: ResourceId,
) -> Result<Option<PlanetResource>> {
    let key = keys::pair(planet.raw(), resource.raw());
    let stored = read!(tx, r => r.get().primary::<StoredPlanetResource>(key)?);
    Ok(stored.map(|s| s.to_entity()))
}

/// Write `resource` if its version still matches the stored row.
pub fn update(tx: &Transaction<'_>, resource: &PlanetResource) -> Result<PlanetResource> {
    let rw = tx.rw()?;
    let key = keys::pair(resource.planet.raw(), resource.resource.raw());
    let current = rw.get().primary::<StoredPlanetResource>(key)?.ok_or_else(|| {
        Error::conflict(format!(
            "{} of {} no longer exists",
            resource.resource, resource.planet
        ))
    })?;
    if current.version != resource.version {
        log::warn!(
            "Stale write to {} of {}: version {} != {}",
            resource.resource,
            resource.planet,
            resource.version,
            current.version
        );
        return Err(Error::conflict(format!(
            "{} of {} changed (version {}, expected {})",
            resource.resource, resource.planet, current.version, resource.version
        )));
    }

    let mut next = resource.clone();
    next.version += 1;
    rw.update(current, StoredPlanetResource::from_entity(&next))?;
    log::debug!(
        "{} of {} at {}: amount {} (version {})",
        next.resource,
        next.planet,
        next.updated_at,
        next.amount,
        next.version
    );
    Ok(next)
}

pub fn delete_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<usize> {
    let rw = tx.rw()?;
    let rows = scan_prefix!(rw, StoredPlanetResource, keys::prefix(planet.raw()));
    let count = rows.len();
    for row in rows {
        rw.remove(row)?;
    }
    Ok(count)
}

//! Resource integration inside a transaction.

use crate::error::Result;
use sovereign_core::simulator::advance_resources;
use sovereign_core::time::truncate;
use sovereign_core::{PlanetId, PlanetResource, Timestamp};
use sovereign_db::repositories::{planet_productions, planet_resources, planet_storages};
use sovereign_db::Transaction;

/// Advance every resource of `planet` to `until` and write the rows that
/// changed.
///
/// `until` is truncated to storage precision first, so a repeated call
/// with the same instant writes nothing. Rows already at or past `until`
/// are left alone. A stale row version
/// fails with a store conflict and leaves the transaction to be dropped.
pub fn advance_planet(
    tx: &Transaction<'_>,
    planet: PlanetId,
    until: Timestamp,
) -> Result<Vec<PlanetResource>> {
    let until = truncate(until);
    let resources = planet_resources::list_for_planet(tx, planet)?;
    let productions = planet_productions::list_for_planet(tx, planet)?;
    let storages = planet_storages::list_for_planet(tx, planet)?;

    let advanced = advance_resources(&resources, &productions, &storages, until);
    let mut written = Vec::with_capacity(advanced.len());
    for resource in advanced {
        written.push(planet_resources::update(tx, &resource)?);
    }

    log::debug!(
        "Advanced {} of {} resources on {} to {}",
        written.len(),
        resources.len(),
        planet,
        until
    );
    Ok(written)
}

//! Production rates of planets, per origin.

use crate::connection::Transaction;
use crate::error::{Error, Result};
use crate::keys;
use crate::models::StoredPlanetResourceProduction;
use sovereign_core::{PlanetId, PlanetResourceProduction, ProductionOrigin, ResourceId};

pub fn create(
    tx: &Transaction<'_>,
    production: &PlanetResourceProduction,
) -> Result<PlanetResourceProduction> {
    tx.rw()?
        .insert(StoredPlanetResourceProduction::from_entity(production))?;
    log::debug!(
        "Created production of {} on {} from {}: {}",
        production.resource,
        production.planet,
        production.origin,
        production.production
    );
    Ok(production.clone())
}

/// Every production row of a planet, intrinsic rows first.
pub fn list_for_planet(
    tx: &Transaction<'_>,
    planet: PlanetId,
) -> Result<Vec<PlanetResourceProduction>> {
    let prefix = keys::prefix(planet.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredPlanetResourceProduction, prefix));
    Ok(rows
        .iter()
        .map(StoredPlanetResourceProduction::to_entity)
        .collect())
}

pub fn get(
    tx: &Transaction<'_>,
    planet: PlanetId,
    origin: ProductionOrigin,
    resource: ResourceId,
) -> Result<Option<PlanetResourceProduction>> {
    let key = keys::production(planet.raw(), origin, resource.raw());
    let stored = read!(tx, r => r.get().primary::<StoredPlanetResourceProduction>(key)?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn update(
    tx: &Transaction<'_>,
    production: &PlanetResourceProduction,
) -> Result<PlanetResourceProduction> {
    let rw = tx.rw()?;
    let key = keys::production(
        production.planet.raw(),
        production.origin,
        production.resource.raw(),
    );
    let current = rw
        .get()
        .primary::<StoredPlanetResourceProduction>(key)?
        .ok_or_else(|| {
            Error::conflict(format!(
                "production of {} on {} from {} no longer exists",
                production.resource, production.planet, production.origin
            ))
        })?;
    if current.version != production.version {
        log::warn!(
            "Stale write to production of {} on {} from {}",
            production.resource,
            production.planet,
            production.origin
        );
        return Err(Error::conflict(format!(
            "production of {} on {} from {} changed (version {}, expected {})",
            production.resource,
            production.planet,
            production.origin,
            current.version,
            production.version
        )));
    }

    let mut next = production.clone();
    next.version += 1;
    rw.update(current, StoredPlanetResourceProduction::from_entity(&next))?;
    log::debug!(
        "Production of {} on {} from {}: {} (version {})",
        next.resource,
        next.planet,
        next.origin,
        next.production,
        next.version
    );
    Ok(next)
}

pub fn delete_for_planet(tx: &Transaction<'_>, planet: PlanetId) -> Result<usize> {
    let rw = tx.rw()?;
    let rows = scan_prefix!(
        rw,
        StoredPlanetResourceProduction,
        keys::prefix(planet.raw())
    );
    let count = rows.len();
    for row in rows {
        rw.remove(row)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{connection, t0};
    use crate::Context;
    use sovereign_core::BuildingId;

    fn row(origin: ProductionOrigin, production: i64) -> PlanetResourceProduction {
        PlanetResourceProduction {
            planet: PlanetId(1),
            origin,
            resource: ResourceId(1),
            production,
            created_at: t0(),
            updated_at: t0(),
            version: 0,
        }
    }

    #[test]
    fn test_one_row_per_origin() {
        let (conn, _clock) = connection();
        let ctx = Context::new();
        let mine = ProductionOrigin::FromBuilding(BuildingId(1));
        let tx = conn.begin(&ctx).unwrap();
        create(&tx, &row(ProductionOrigin::Intrinsic, 60)).unwrap();
        create(&tx, &row(mine, 33)).unwrap();
        tx.commit().unwrap();

        let tx = conn.begin(&ctx).unwrap();
        let err = create(&tx, &row(mine, 10)).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
        drop(tx);

        let tx = conn.begin(&ctx).unwrap();
        let rows = list_for_planet(&tx, PlanetId(1)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].origin, ProductionOrigin::Intrinsic);
        assert_eq!(
            get(&tx, PlanetId(1), mine, ResourceId(1))
                .unwrap()
                .unwrap()
                .production,
            33
        );
    }

    #[test]
    fn test_update_checks_version() {
        let (conn, _clock) = connection();
        let tx = conn.begin(&Context::new()).unwrap();
        let created = create(&tx, &row(ProductionOrigin::Intrinsic, 60)).unwrap();

        let mut faster = created.clone();
        faster.production = 90;
        let written = update(&tx, &faster).unwrap();
        assert_eq!(written.version, 1);

        let err = update(&tx, &faster).unwrap_err();
        assert!(matches!(err, Error::ConflictingState(_)));
    }
}

//! Building catalog and its level curves.

use crate::connection::Transaction;
use crate::error::Result;
use crate::keys;
use crate::models::{
    StoredBuilding, StoredBuildingCost, StoredBuildingKey, StoredBuildingResourceProduction,
    StoredBuildingResourceStorage,
};
use sovereign_core::{
    Building, BuildingCost, BuildingId, BuildingResourceProduction, BuildingResourceStorage,
    BuildingSpec,
};

pub fn create(tx: &Transaction<'_>, building: &Building) -> Result<Building> {
    let rw = tx.rw()?;
    rw.insert(StoredBuilding::from_entity(building))?;
    log::debug!("Created building {} ({})", building.id, building.name);
    Ok(building.clone())
}

pub fn get(tx: &Transaction<'_>, id: BuildingId) -> Result<Option<Building>> {
    let stored = read!(tx, r => r.get().primary::<StoredBuilding>(id.raw())?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn get_by_name(tx: &Transaction<'_>, name: &str) -> Result<Option<Building>> {
    let stored = read!(tx, r => r
        .get()
        .secondary::<StoredBuilding>(StoredBuildingKey::name, name.to_string())?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn list(tx: &Transaction<'_>) -> Result<Vec<Building>> {
    let rows = read!(tx, r => scan_all!(r, StoredBuilding));
    Ok(rows.iter().map(StoredBuilding::to_entity).collect())
}

pub fn create_cost(tx: &Transaction<'_>, cost: &BuildingCost) -> Result<()> {
    tx.rw()?.insert(StoredBuildingCost::from_entity(cost))?;
    Ok(())
}

pub fn create_production(tx: &Transaction<'_>, production: &BuildingResourceProduction) -> Result<()> {
    tx.rw()?
        .insert(StoredBuildingResourceProduction::from_entity(production))?;
    Ok(())
}

pub fn create_storage(tx: &Transaction<'_>, storage: &BuildingResourceStorage) -> Result<()> {
    tx.rw()?
        .insert(StoredBuildingResourceStorage::from_entity(storage))?;
    Ok(())
}

pub fn list_costs(tx: &Transaction<'_>, building: BuildingId) -> Result<Vec<BuildingCost>> {
    let prefix = keys::prefix(building.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredBuildingCost, prefix));
    Ok(rows.iter().map(StoredBuildingCost::to_entity).collect())
}

pub fn list_productions(
    tx: &Transaction<'_>,
    building: BuildingId,
) -> Result<Vec<BuildingResourceProduction>> {
    let prefix = keys::prefix(building.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredBuildingResourceProduction, prefix));
    Ok(rows
        .iter()
        .map(StoredBuildingResourceProduction::to_entity)
        .collect())
}

pub fn list_storages(
    tx: &Transaction<'_>,
    building: BuildingId,
) -> Result<Vec<BuildingResourceStorage>> {
    let prefix = keys::prefix(building.raw());
    let rows = read!(tx, r => scan_prefix!(r, StoredBuildingResourceStorage, prefix));
    Ok(rows
        .iter()
        .map(StoredBuildingResourceStorage::to_entity)
        .collect())
}

/// A building together with all of its curves, or `None` if it is not in
/// the catalog.
pub fn spec(tx: &Transaction<'_>, id: BuildingId) -> Result<Option<BuildingSpec>> {
    let Some(building) = get(tx, id)? else {
        return Ok(None);
    };
    Ok(Some(BuildingSpec {
        building,
        costs: list_costs(tx, id)?,
        productions: list_productions(tx, id)?,
        storages: list_storages(tx, id)?,
    }))
}

//! Per-action cost snapshots and production/storage deltas.
//!
//! Sidecar rows live and die with their action; `delete_for_action` is only
//! called from the action repository's cascades.

use crate::connection::Transaction;
use crate::error::Result;
use crate::keys;
use crate::models::{
    StoredBuildingActionCost, StoredBuildingActionResourceProduction,
    StoredBuildingActionResourceStorage,
};
use sovereign_core::{
    ActionId, BuildingActionCost, BuildingActionResourceProduction, BuildingActionResourceStorage,
};

pub mod costs {
    use super::*;

    pub fn create(tx: &Transaction<'_>, cost: &BuildingActionCost) -> Result<()> {
        tx.rw()?.insert(StoredBuildingActionCost::from_entity(cost))?;
        Ok(())
    }

    pub fn list_for_action(tx: &Transaction<'_>, action: ActionId) -> Result<Vec<BuildingActionCost>> {
        let prefix = keys::prefix(action.raw());
        let rows = read!(tx, r => scan_prefix!(r, StoredBuildingActionCost, prefix));
        Ok(rows.iter().map(StoredBuildingActionCost::to_entity).collect())
    }

    pub(crate) fn delete_for_action(tx: &Transaction<'_>, action: ActionId) -> Result<()> {
        let rw = tx.rw()?;
        let rows = scan_prefix!(rw, StoredBuildingActionCost, keys::prefix(action.raw()));
        for row in rows {
            rw.remove(row)?;
        }
        Ok(())
    }
}

pub mod productions {
    use super::*;

    pub fn create(tx: &Transaction<'_>, production: &BuildingActionResourceProduction) -> Result<()> {
        tx.rw()?
            .insert(StoredBuildingActionResourceProduction::from_entity(production))?;
        Ok(())
    }

    pub fn list_for_action(
        tx: &Transaction<'_>,
        action: ActionId,
    ) -> Result<Vec<BuildingActionResourceProduction>> {
        let prefix = keys::prefix(action.raw());
        let rows = read!(tx, r => scan_prefix!(r, StoredBuildingActionResourceProduction, prefix));
        Ok(rows
            .iter()
            .map(StoredBuildingActionResourceProduction::to_entity)
            .collect())
    }

    pub(crate) fn delete_for_action(tx: &Transaction<'_>, action: ActionId) -> Result<()> {
        let rw = tx.rw()?;
        let rows = scan_prefix!(
            rw,
            StoredBuildingActionResourceProduction,
            keys::prefix(action.raw())
        );
        for row in rows {
            rw.remove(row)?;
        }
        Ok(())
    }
}

pub mod storages {
    use super::*;

    pub fn create(tx: &Transaction<'_>, storage: &BuildingActionResourceStorage) -> Result<()> {
        tx.rw()?
            .insert(StoredBuildingActionResourceStorage::from_entity(storage))?;
        Ok(())
    }

    pub fn list_for_action(
        tx: &Transaction<'_>,
        action: ActionId,
    ) -> Result<Vec<BuildingActionResourceStorage>> {
        let prefix = keys::prefix(action.raw());
        let rows = read!(tx, r => scan_prefix!(r, StoredBuildingActionResourceStorage, prefix));
        Ok(rows
            .iter()
            .map(StoredBuildingActionResourceStorage::to_entity)
            .collect())
    }

    pub(crate) fn delete_for_action(tx: &Transaction<'_>, action: ActionId) -> Result<()> {
        let rw = tx.rw()?;
        let rows = scan_prefix!(
            rw,
            StoredBuildingActionResourceStorage,
            keys::prefix(action.raw())
        );
        for row in rows {
            rw.remove(row)?;
        }
        Ok(())
    }
}

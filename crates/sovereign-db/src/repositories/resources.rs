//! Resource catalog.

use crate::connection::Transaction;
use crate::error::Result;
use crate::models::{StoredResource, StoredResourceKey};
use sovereign_core::{Resource, ResourceId};

pub fn create(tx: &Transaction<'_>, resource: &Resource) -> Result<Resource> {
    let rw = tx.rw()?;
    rw.insert(StoredResource::from_entity(resource))?;
    log::debug!("Created resource {} ({})", resource.id, resource.name);
    Ok(resource.clone())
}

pub fn get(tx: &Transaction<'_>, id: ResourceId) -> Result<Option<Resource>> {
    let stored = read!(tx, r => r.get().primary::<StoredResource>(id.raw())?);
    Ok(stored.map(|s| s.to_entity()))
}

pub fn get_by_name(tx: &Transaction<'_>, name: &str) -> Result<Option<Resource>> {
    let stored = read!(tx, r => r
        .get()
        .secondary::<StoredResource>(StoredResourceKey::name, name.to_string())?);
    Ok(stored.map(|s| s.to_entity()))
}

/// The whole catalog, ordered by id.
pub fn list(tx: &Transaction<'_>) -> Result<Vec<Resource>> {
    let rows = read!(tx, r => scan_all!(r, StoredResource));
    Ok(rows.iter().map(StoredResource::to_entity).collect())
}

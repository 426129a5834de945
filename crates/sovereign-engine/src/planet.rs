//! Planet lifecycle: creation with seeded state, snapshots and deletion.

use crate::error::Result;
use serde::Serialize;
use sovereign_core::{
    BuildingAction, Planet, PlanetBuilding, PlanetId, PlanetResource, PlanetResourceProduction,
    PlanetResourceStorage, PlayerId,
};
use sovereign_db::repositories::{
    building_actions, planet_buildings, planet_productions, planet_resources, planet_storages,
    planets,
};
use sovereign_db::{Connection, Context};

/// Everything known about a planet at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetSnapshot {
    pub planet: Planet,
    pub resources: Vec<PlanetResource>,
    pub productions: Vec<PlanetResourceProduction>,
    pub storages: Vec<PlanetResourceStorage>,
    pub buildings: Vec<PlanetBuilding>,
    pub actions: Vec<BuildingAction>,
}

/// Planet operations, one transaction each
pub struct PlanetService<'a> {
    conn: &'a Connection,
}

impl<'a> PlanetService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a planet seeded from the catalog.
    pub fn create_planet(
        &self,
        ctx: &Context,
        player: PlayerId,
        name: &str,
        homeworld: bool,
    ) -> Result<Planet> {
        let tx = self.conn.begin(ctx)?;
        let planet = planets::create(&tx, player, name, homeworld)?;
        tx.commit()?;
        Ok(planet)
    }

    /// Read a planet with all of its state rows and pending actions.
    ///
    /// Amounts are as last written; call
    /// [`Service::sync_planet`](crate::Service::sync_planet) first for
    /// up-to-date figures.
    pub fn get_planet(&self, ctx: &Context, id: PlanetId) -> Result<PlanetSnapshot> {
        let tx = self.conn.read(ctx)?;
        let planet =
            planets::get(&tx, id)?.ok_or_else(|| sovereign_db::Error::NotFound(id.to_string()))?;
        let snapshot = PlanetSnapshot {
            resources: planet_resources::list_for_planet(&tx, id)?,
            productions: planet_productions::list_for_planet(&tx, id)?,
            storages: planet_storages::list_for_planet(&tx, id)?,
            buildings: planet_buildings::list_for_planet(&tx, id)?,
            actions: building_actions::list_for_planet(&tx, id)?,
            planet,
        };
        tx.close();
        Ok(snapshot)
    }

    pub fn list_planets(&self, ctx: &Context) -> Result<Vec<Planet>> {
        let tx = self.conn.read(ctx)?;
        let all = planets::list(&tx)?;
        tx.close();
        Ok(all)
    }

    pub fn list_planets_for_player(&self, ctx: &Context, player: PlayerId) -> Result<Vec<Planet>> {
        let tx = self.conn.read(ctx)?;
        let owned = planets::list_for_player(&tx, player)?;
        tx.close();
        Ok(owned)
    }

    /// Delete a planet, its state rows and its actions.
    pub fn delete_planet(&self, ctx: &Context, id: PlanetId) -> Result<Planet> {
        let tx = self.conn.begin(ctx)?;
        let planet = planets::delete(&tx, id)?;
        tx.commit()?;
        Ok(planet)
    }

    /// Delete every planet of a player; returns how many were removed.
    pub fn delete_planets_for_player(&self, ctx: &Context, player: PlayerId) -> Result<usize> {
        let tx = self.conn.begin(ctx)?;
        let count = planets::delete_for_player(&tx, player)?;
        tx.commit()?;
        log::info!("Deleted {} planets of {}", count, player);
        Ok(count)
    }
}

//! Shared fixtures for the crate's tests.
//!
//! The catalog holds metal (500 start, 60/min, storage 10000) and a metal
//! mine costing `100 * 1.5^(L-1)` metal, producing `30 * L * 1.1^L` metal
//! per minute, with flat storage.

use crate::service::Service;
use chrono::{TimeZone, Utc};
use sovereign_core::{
    Building, BuildingCost, BuildingId, BuildingResourceProduction, BuildingResourceStorage,
    PlanetId, PlayerId, Resource, ResourceId, Timestamp, WeightedCostCompletion,
};
use sovereign_db::repositories::{buildings, planets, resources};
use sovereign_db::{Connection, Context, ManualClock, Transaction};
use std::sync::Arc;

pub(crate) const METAL: ResourceId = ResourceId(1);
pub(crate) const MINE: BuildingId = BuildingId(1);
pub(crate) const PLAYER: PlayerId = PlayerId(1);

pub(crate) struct Fixture {
    pub service: Service,
    pub clock: Arc<ManualClock>,
    pub planet: PlanetId,
    pub t0: Timestamp,
}

impl Fixture {
    pub fn conn(&self) -> &Connection {
        self.service.connection()
    }
}

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

pub(crate) fn install_catalog(tx: &Transaction<'_>) {
    resources::create(
        tx,
        &Resource {
            id: METAL,
            name: "metal".to_string(),
            start_amount: 500.0,
            start_production: 60,
            start_storage: 10_000,
        },
    )
    .unwrap();
    buildings::create(
        tx,
        &Building {
            id: MINE,
            name: "metal mine".to_string(),
        },
    )
    .unwrap();
    buildings::create_cost(
        tx,
        &BuildingCost {
            building: MINE,
            resource: METAL,
            cost: 100,
            progress: 1.5,
        },
    )
    .unwrap();
    buildings::create_production(
        tx,
        &BuildingResourceProduction {
            building: MINE,
            resource: METAL,
            base: 30,
            progress: 1.1,
        },
    )
    .unwrap();
    buildings::create_storage(
        tx,
        &BuildingResourceStorage {
            building: MINE,
            resource: METAL,
            base: 0,
            scale: 0.0,
            progress: 1.0,
        },
    )
    .unwrap();
}

/// A service over an in-memory store with one seeded planet created at
/// [`t0`], using the default weighted completion time.
pub(crate) fn fixture() -> Fixture {
    init_logger();
    let clock = Arc::new(ManualClock::new(t0()));
    let conn = Connection::in_memory().unwrap().with_clock(clock.clone());

    let planet = {
        let tx = conn.begin(&Context::new()).unwrap();
        install_catalog(&tx);
        let planet = planets::create(&tx, PLAYER, "Terra", true).unwrap();
        tx.commit().unwrap();
        planet.id
    };

    Fixture {
        service: Service::new(conn, Arc::new(WeightedCostCompletion::default())),
        clock,
        planet,
        t0: t0(),
    }
}

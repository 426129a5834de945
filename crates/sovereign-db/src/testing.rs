//! Shared fixtures for the crate's tests.

use crate::clock::ManualClock;
use crate::connection::{Connection, Transaction};
use crate::repositories::{buildings, resources};
use chrono::{TimeZone, Utc};
use sovereign_core::{
    Building, BuildingCost, BuildingId, BuildingResourceProduction, BuildingResourceStorage,
    Resource, ResourceId, Timestamp,
};
use std::sync::Arc;

pub(crate) const METAL: ResourceId = ResourceId(1);
pub(crate) const MINE: BuildingId = BuildingId(1);

pub(crate) fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

pub(crate) fn connection() -> (Connection, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let conn = Connection::in_memory().unwrap().with_clock(clock.clone());
    (conn, clock)
}

/// Metal (500 start, 60/min, 10000 storage) and a metal mine.
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

//! Resource integration
//!
//! Advances planet resource amounts from their last `updated_at` to a target
//! instant. Production is expressed per minute; the accumulated amount is
//! clamped to `[0, cap]` where the cap is the planet's storage for that
//! resource.
//!
//! The functions here are pure: they return the rows that need to be
//! written, leaving version checks and persistence to the store.

use crate::planet::{PlanetResource, PlanetResourceProduction, PlanetResourceStorage};
use crate::time::{minutes_between, Timestamp};
use crate::ResourceId;
use indexmap::IndexMap;

/// Per-resource production rates and storage caps of one planet
#[derive(Debug, Clone, Default)]
pub struct ResourceRates {
    production: IndexMap<ResourceId, i64>,
    storage: IndexMap<ResourceId, i64>,
}

impl ResourceRates {
    /// Aggregate productions over every origin and collect storage caps
    pub fn new(productions: &[PlanetResourceProduction], storages: &[PlanetResourceStorage]) -> Self {
        let mut rates = Self::default();
        for production in productions {
            *rates.production.entry(production.resource).or_insert(0) += production.production;
        }
        for storage in storages {
            *rates.storage.entry(storage.resource).or_insert(0) += storage.storage;
        }
        rates
    }

    /// Total production per minute of a resource (0 without production rows)
    pub fn production(&self, resource: ResourceId) -> i64 {
        self.production.get(&resource).copied().unwrap_or(0)
    }

    /// Storage cap of a resource, if the planet stores it at all
    pub fn storage(&self, resource: ResourceId) -> Option<i64> {
        self.storage.get(&resource).copied()
    }
}

/// Advance one resource row to `until`
///
/// Returns `None` when `until` is not after the row's `updated_at`, meaning
/// nothing has to be written. Otherwise the returned row carries
/// `updated_at = until`, even when the amount itself is unchanged, so the
/// same interval is never integrated twice.
///
/// Without a storage cap the amount does not accumulate; only the timestamp
/// moves forward.
pub fn advance_resource(
    resource: &PlanetResource,
    rate_per_minute: f64,
    cap: Option<f64>,
    until: Timestamp,
) -> Option<PlanetResource> {
    if until <= resource.updated_at {
        return None;
    }

    let mut advanced = resource.clone();
    advanced.updated_at = until;

    let Some(cap) = cap else {
        return Some(advanced);
    };

    let cap = cap.max(0.0);
    if resource.amount >= cap {
        advanced.amount = cap;
    } else {
        let elapsed = minutes_between(resource.updated_at, until);
        let accumulated = resource.amount + rate_per_minute * elapsed;
        advanced.amount = accumulated.clamp(0.0, cap);
    }

    Some(advanced)
}

/// Advance every resource row of a planet to `until`
///
/// Only rows that actually need a write are returned, in input order.
pub fn advance_resources(
    resources: &[PlanetResource],
    productions: &[PlanetResourceProduction],
    storages: &[PlanetResourceStorage],
    until: Timestamp,
) -> Vec<PlanetResource> {
    let rates = ResourceRates::new(productions, storages);

    resources
        .iter()
        .filter_map(|resource| {
            let rate = rates.production(resource.resource) as f64;
            let cap = rates.storage(resource.resource).map(|s| s as f64);
            advance_resource(resource, rate, cap, until)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet::ProductionOrigin;
    use crate::{BuildingId, PlanetId};
    use chrono::{TimeDelta, TimeZone, Utc};

    const METAL: ResourceId = ResourceId(1);
    const CRYSTAL: ResourceId = ResourceId(2);

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn resource(id: ResourceId, amount: f64) -> PlanetResource {
        PlanetResource {
            planet: PlanetId(1),
            resource: id,
            amount,
            created_at: t0(),
            updated_at: t0(),
            version: 3,
        }
    }

    fn production(origin: ProductionOrigin, id: ResourceId, value: i64) -> PlanetResourceProduction {
        PlanetResourceProduction {
            planet: PlanetId(1),
            origin,
            resource: id,
            production: value,
            created_at: t0(),
            updated_at: t0(),
            version: 0,
        }
    }

    fn storage(id: ResourceId, value: i64) -> PlanetResourceStorage {
        PlanetResourceStorage {
            planet: PlanetId(1),
            resource: id,
            storage: value,
            created_at: t0(),
            updated_at: t0(),
            version: 0,
        }
    }

    #[test]
    fn test_integration_with_headroom() {
        let advanced =
            advance_resource(&resource(METAL, 500.0), 60.0, Some(10_000.0), t0() + TimeDelta::minutes(3))
                .unwrap();
        assert!((advanced.amount - 680.0).abs() < 1e-9);
        assert_eq!(advanced.updated_at, t0() + TimeDelta::minutes(3));
        // Versions are bumped by storage, not here
        assert_eq!(advanced.version, 3);
    }

    #[test]
    fn test_integration_saturates_at_cap() {
        let advanced = advance_resource(
            &resource(METAL, 9_990.0),
            60.0,
            Some(10_000.0),
            t0() + TimeDelta::minutes(3),
        )
        .unwrap();
        assert_eq!(advanced.amount, 10_000.0);
    }

    #[test]
    fn test_amount_above_cap_is_pinned_to_cap() {
        let advanced = advance_resource(
            &resource(METAL, 12_000.0),
            60.0,
            Some(10_000.0),
            t0() + TimeDelta::seconds(1),
        )
        .unwrap();
        assert_eq!(advanced.amount, 10_000.0);
    }

    #[test]
    fn test_negative_rate_floors_at_zero() {
        let advanced =
            advance_resource(&resource(METAL, 10.0), -60.0, Some(10_000.0), t0() + TimeDelta::minutes(5))
                .unwrap();
        assert_eq!(advanced.amount, 0.0);
    }

    #[test]
    fn test_no_write_when_target_not_later() {
        assert!(advance_resource(&resource(METAL, 500.0), 60.0, Some(10_000.0), t0()).is_none());
        assert!(advance_resource(
            &resource(METAL, 500.0),
            60.0,
            Some(10_000.0),
            t0() - TimeDelta::minutes(1)
        )
        .is_none());
    }

    #[test]
    fn test_missing_storage_only_moves_timestamp() {
        let until = t0() + TimeDelta::minutes(10);
        let advanced = advance_resource(&resource(METAL, 500.0), 60.0, None, until).unwrap();
        assert_eq!(advanced.amount, 500.0);
        assert_eq!(advanced.updated_at, until);
    }

    #[test]
    fn test_rates_sum_all_origins() {
        let productions = vec![
            production(ProductionOrigin::Intrinsic, METAL, 60),
            production(ProductionOrigin::FromBuilding(BuildingId(1)), METAL, 33),
            production(ProductionOrigin::Intrinsic, CRYSTAL, 20),
        ];
        let rates = ResourceRates::new(&productions, &[storage(METAL, 100)]);
        assert_eq!(rates.production(METAL), 93);
        assert_eq!(rates.production(CRYSTAL), 20);
        assert_eq!(rates.production(ResourceId(99)), 0);
        assert_eq!(rates.storage(METAL), Some(100));
        assert_eq!(rates.storage(CRYSTAL), None);
    }

    #[test]
    fn test_advance_resources_uses_zero_rate_without_production() {
        let resources = vec![resource(METAL, 500.0), resource(CRYSTAL, 100.0)];
        let productions = vec![production(ProductionOrigin::Intrinsic, METAL, 60)];
        let storages = vec![storage(METAL, 10_000), storage(CRYSTAL, 10_000)];
        let until = t0() + TimeDelta::minutes(2);

        let advanced = advance_resources(&resources, &productions, &storages, until);

        assert_eq!(advanced.len(), 2);
        assert!((advanced[0].amount - 620.0).abs() < 1e-9);
        assert_eq!(advanced[1].amount, 100.0);
        assert!(advanced.iter().all(|r| r.updated_at == until));
    }
}

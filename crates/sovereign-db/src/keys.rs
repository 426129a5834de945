//! Composite key encoding.
//!
//! Composite keys are fixed-width lowercase hex segments joined by `:`, so
//! byte order equals numeric order and a planet's rows share a scannable
//! prefix.

use sovereign_core::ProductionOrigin;

/// Segment for the intrinsic (building-less) production origin.
const INTRINSIC: &str = "-";

pub(crate) fn segment(id: u64) -> String {
    format!("{:016x}", id)
}

/// Prefix shared by every key starting with `id`.
pub(crate) fn prefix(id: u64) -> String {
    format!("{:016x}:", id)
}

pub(crate) fn pair(first: u64, second: u64) -> String {
    format!("{:016x}:{:016x}", first, second)
}

pub(crate) fn origin(origin: ProductionOrigin) -> String {
    match origin {
        ProductionOrigin::Intrinsic => INTRINSIC.to_string(),
        ProductionOrigin::FromBuilding(building) => format!("b{}", segment(building.raw())),
    }
}

pub(crate) fn production(planet: u64, production_origin: ProductionOrigin, resource: u64) -> String {
    format!(
        "{}{}:{}",
        prefix(planet),
        origin(production_origin),
        segment(resource)
    )
}

/// Order-preserving encoding of a signed timestamp.
pub(crate) fn ordered_micros(micros: i64) -> String {
    // Flipping the sign bit maps i64 order onto u64 order.
    segment((micros as u64) ^ (1 << 63))
}

pub(crate) fn completion(planet: u64, completed_at_micros: i64, action: u64) -> String {
    format!(
        "{}{}:{}",
        prefix(planet),
        ordered_micros(completed_at_micros),
        segment(action)
    )
}

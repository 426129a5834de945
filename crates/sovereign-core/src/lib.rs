//! Sovereign Core - planet economy model
//!
//! This crate holds the pure part of the planet-state engine:
//! - Identifier newtypes for players, planets, catalog rows and actions
//! - Catalog definitions and their level curves (cost, production, storage)
//! - Planet state rows (`PlanetResource`, `PlanetBuilding`, ...)
//! - Resource integration over wall-clock time, clamped to storage
//! - Building action consolidation and the completion-time strategy
//!
//! Nothing in here performs I/O; persistence lives in `sovereign-db` and the
//! transactional orchestration in `sovereign-engine`.

pub mod action;
pub mod catalog;
pub mod completion;
mod error;
mod identity;
pub mod planet;
pub mod simulator;
pub mod time;

pub use action::{
    ActionPlan, ActionRequest, BuildingAction, BuildingActionCost,
    BuildingActionResourceProduction, BuildingActionResourceStorage, ResourceAmount,
};
pub use catalog::{
    Building, BuildingCost, BuildingResourceProduction, BuildingResourceStorage, BuildingSpec,
    Resource,
};
pub use completion::{CompletionTime, FixedCompletion, WeightedCostCompletion};
pub use error::{Error, Result};
pub use identity::{ActionId, BuildingId, PlanetId, PlayerId, ResourceId};
pub use planet::{
    Planet, PlanetBuilding, PlanetResource, PlanetResourceProduction, PlanetResourceStorage,
    PlanetSeed, ProductionOrigin,
};
pub use time::Timestamp;

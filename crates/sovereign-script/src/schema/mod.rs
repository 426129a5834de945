//! Schema definitions for RON catalog files

pub mod building;
pub mod resource;

pub use building::{BuildingDef, CostDef, ProductionDef, StorageDef};
pub use resource::ResourceDef;

//! Sovereign Script - RON loader and schema definitions
//!
//! Loads the game catalog from RON files:
//! - Resource definitions with their planet start values
//! - Building definitions with cost, production and storage curves
//!
//! Names are resolved to ids when loading finishes, and the resulting
//! [`Catalog`] can be installed into a store with [`install_catalog`].

mod catalog;
mod error;
mod loader;
mod schema;

pub use catalog::{install_catalog, Catalog};
pub use error::{Error, Result};
pub use loader::Loader;
pub use schema::{BuildingDef, CostDef, ProductionDef, ResourceDef, StorageDef};

//! Sovereign Engine - planet simulation over a transactional store
//!
//! This crate orchestrates the pure model of `sovereign-core` against the
//! repositories of `sovereign-db`:
//! - `update_planet_until`: integrate resources up to a point in time
//! - `create_action` / `delete_action`: schedule or cancel an upgrade
//! - `process_actions_until`: settle due upgrades, one transaction each
//! - `sync_planet`: the lazy catch-up run before a planet is served
//!
//! There is no background loop; hosts drive completion by calling
//! `process_actions_until` (or `sync_planet`) when they touch a planet.

pub mod action;
pub mod config;
mod error;
pub mod planet;
pub mod resource;
pub mod service;
#[cfg(test)]
mod testing;

pub use action::ActionEngine;
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use planet::{PlanetService, PlanetSnapshot};
pub use service::{ProcessReport, Service};

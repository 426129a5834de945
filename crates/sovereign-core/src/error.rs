//! Error types for sovereign-core

use crate::{BuildingId, ResourceId};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Action uses resource {0} which the planet does not hold")]
    UnknownResource(ResourceId),

    #[error("Not enough of {resource}: required {required}, available {available}")]
    NotEnoughResources {
        resource: ResourceId,
        required: i64,
        available: f64,
    },

    #[error("Building not found in catalog: {0}")]
    UnknownBuilding(BuildingId),

    #[error("Invalid completion time: {0}")]
    InvalidCompletionTime(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

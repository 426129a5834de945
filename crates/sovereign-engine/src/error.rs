//! Error types for sovereign-engine

use sovereign_core::{ActionId, BuildingId, ResourceId};
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine's public operations
#[derive(Debug, Error)]
pub enum Error {
    /// The action cannot be created or changed given the current state:
    /// a duplicate action for the building, or a stale optimistic lock
    #[error("conflicting state for action: {0}")]
    ConflictingStateForAction(String),

    /// A cost references a resource the planet does not hold
    #[error("action uses unknown resource {0}")]
    ActionUsesUnknownResource(ResourceId),

    /// A storage delta references a resource the planet has no storage for
    #[error("action updates unknown resource {0}")]
    ActionUpdatesUnknownResource(ResourceId),

    /// The action is already past its completion time and can no longer be cancelled
    #[error("{0} is already completed")]
    ActionAlreadyCompleted(ActionId),

    #[error("not enough {resource}: {required} required, {available} available")]
    NotEnoughResources {
        resource: ResourceId,
        required: i64,
        available: f64,
    },

    #[error("unknown building {0}")]
    UnknownBuilding(BuildingId),

    #[error("invalid completion time: {0}")]
    InvalidCompletionTime(String),

    /// Settling due actions failed while syncing a planet
    #[error("failed to process actions: {0}")]
    ActionSchedulingFailed(Box<Error>),

    /// Advancing resources failed while syncing a planet
    #[error("failed to update planet resources: {0}")]
    PlanetResourceUpdateFailed(Box<Error>),

    /// Engine configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("store error: {0}")]
    Store(#[from] sovereign_db::Error),
}

impl Error {
    /// Status the HTTP layer answers with for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Error::ConflictingStateForAction(_) | Error::ActionAlreadyCompleted(_) => 409,
            Error::ActionUsesUnknownResource(_)
            | Error::NotEnoughResources { .. }
            | Error::UnknownBuilding(_) => 400,
            Error::ActionSchedulingFailed(inner) | Error::PlanetResourceUpdateFailed(inner) => {
                inner.http_status()
            }
            Error::Store(sovereign_db::Error::NotFound(_)) => 404,
            Error::Store(sovereign_db::Error::ConflictingState(_))
            | Error::Store(sovereign_db::Error::DuplicateKey(_)) => 409,
            _ => 500,
        }
    }

    /// Stable numeric code reported alongside the message
    pub fn code(&self) -> u16 {
        match self {
            Error::ActionUsesUnknownResource(_) | Error::ActionUpdatesUnknownResource(_) => 240,
            Error::ConflictingStateForAction(_) => 242,
            Error::ActionAlreadyCompleted(_) => 243,
            Error::UnknownBuilding(_) | Error::InvalidCompletionTime(_) => 270,
            Error::NotEnoughResources { .. } => 272,
            Error::ActionSchedulingFailed(_) | Error::PlanetResourceUpdateFailed(_) => 241,
            Error::Config(_) | Error::Store(_) => 1,
        }
    }

    /// Whether re-issuing the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::ConflictingStateForAction(_) => true,
            Error::ActionSchedulingFailed(inner) | Error::PlanetResourceUpdateFailed(inner) => {
                inner.is_retryable()
            }
            Error::Store(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Map lock failures and unique-index violations met while changing an
    /// action to [`Error::ConflictingStateForAction`]
    pub(crate) fn for_action(err: sovereign_db::Error) -> Self {
        match err {
            sovereign_db::Error::ConflictingState(what) | sovereign_db::Error::DuplicateKey(what) => {
                Error::ConflictingStateForAction(what)
            }
            other => Error::Store(other),
        }
    }
}

impl From<sovereign_core::Error> for Error {
    fn from(err: sovereign_core::Error) -> Self {
        match err {
            sovereign_core::Error::UnknownResource(resource) => {
                Error::ActionUsesUnknownResource(resource)
            }
            sovereign_core::Error::NotEnoughResources {
                resource,
                required,
                available,
            } => Error::NotEnoughResources {
                resource,
                required,
                available,
            },
            sovereign_core::Error::UnknownBuilding(building) => Error::UnknownBuilding(building),
            sovereign_core::Error::InvalidCompletionTime(reason) => {
                Error::InvalidCompletionTime(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status() {
        assert_eq!(Error::ActionAlreadyCompleted(ActionId(1)).http_status(), 409);
        assert_eq!(
            Error::ConflictingStateForAction("dup".into()).http_status(),
            409
        );
        assert_eq!(
            Error::ActionUsesUnknownResource(ResourceId(1)).http_status(),
            400
        );
        assert_eq!(
            Error::NotEnoughResources {
                resource: ResourceId(1),
                required: 100,
                available: 5.0
            }
            .http_status(),
            400
        );
        assert_eq!(
            Error::Store(sovereign_db::Error::NotFound("planet:1".into())).http_status(),
            404
        );
        assert_eq!(
            Error::ActionSchedulingFailed(Box::new(Error::ActionAlreadyCompleted(ActionId(1))))
                .http_status(),
            409
        );
    }

    #[test]
    fn test_for_action_maps_lock_failures() {
        let err = Error::for_action(sovereign_db::Error::ConflictingState("v".into()));
        assert!(matches!(err, Error::ConflictingStateForAction(_)));
        assert!(err.is_retryable());

        let err = Error::for_action(sovereign_db::Error::Cancelled);
        assert!(matches!(err, Error::Store(sovereign_db::Error::Cancelled)));
        assert!(err.is_retryable());

        let err = Error::for_action(sovereign_db::Error::NotFound("x".into()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_core_errors_convert() {
        let err: Error = sovereign_core::Error::UnknownResource(ResourceId(3)).into();
        assert!(matches!(err, Error::ActionUsesUnknownResource(ResourceId(3))));
        assert_eq!(err.code(), 240);
    }
}

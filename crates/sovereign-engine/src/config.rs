//! Engine Configuration - completion-time tuning and database location
//!
//! The configuration is plain data read from RON. Fields left out of the
//! file take their defaults.
//!
//! ```ron
//! (
//!     completion: (
//!         units_per_hour: 2500.0,
//!         resources: ["metal", "crystal"],
//!     ),
//!     database: Some("data/sovereign.db"),
//! )
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sovereign_core::WeightedCostCompletion;
use sovereign_db::Connection;
use std::path::{Path, PathBuf};

/// Configuration for the engine
///
/// # Example
///
/// ```
/// use sovereign_engine::EngineConfig;
///
/// let config = EngineConfig::from_ron("(completion: (units_per_hour: 1000.0))").unwrap();
/// assert_eq!(config.completion.units_per_hour, 1000.0);
/// assert!(config.database.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Build-time strategy parameters
    #[serde(default)]
    pub completion: WeightedCostCompletion,

    /// Database file; `None` keeps everything in memory
    #[serde(default)]
    pub database: Option<PathBuf>,
}

impl EngineConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: EngineConfig = ron::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_ron(&text)?;
        log::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let rate = self.completion.units_per_hour;
        if rate.is_nan() || rate <= 0.0 {
            return Err(Error::Config(format!(
                "units_per_hour must be positive, got {}",
                rate
            )));
        }
        Ok(())
    }

    /// Open the configured database, or an in-memory one
    pub fn connect(&self) -> Result<Connection> {
        let connection = match &self.database {
            Some(path) => Connection::open(path)?,
            None => Connection::in_memory()?,
        };
        Ok(connection)
    }
}

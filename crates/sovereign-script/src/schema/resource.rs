//! Resource definition schema

use serde::{Deserialize, Serialize};

/// Definition of a resource (e.g., metal, crystal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Unique name, used by buildings to refer to this resource
    pub name: String,
    /// Amount a new planet starts with
    #[serde(default)]
    pub start_amount: f64,
    /// Intrinsic production of a new planet, per minute
    #[serde(default)]
    pub start_production: i64,
    /// Storage cap of a new planet
    #[serde(default)]
    pub start_storage: i64,
}

impl ResourceDef {
    /// Create a new resource definition with zero start values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_amount: 0.0,
            start_production: 0,
            start_storage: 0,
        }
    }
}

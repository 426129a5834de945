//! Completion time of building actions
//!
//! The duration of an upgrade is derived from what it costs. The formula is
//! a strategy so the action engine can be exercised independently of the
//! game's economic tuning.

use crate::action::ResourceAmount;
use crate::catalog::{find_resource_by_name, Resource};
use crate::error::Result;
use crate::time::hours_ceil;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Computes how long a building action takes from its costs
pub trait CompletionTime: Send + Sync {
    /// Duration of an action costing `costs`, given the resource catalog
    fn duration(&self, resources: &[Resource], costs: &[ResourceAmount]) -> Result<TimeDelta>;
}

/// Default number of weighted resource units built per hour
pub const DEFAULT_UNITS_PER_HOUR: f64 = 2500.0;

/// Build time proportional to the cost in a set of weighted resources
///
/// `duration = Σ cost(weighted resources) / units_per_hour` hours, rounded
/// up to the microsecond. Weighted resources missing from the catalog or
/// from the costs contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCostCompletion {
    #[serde(default = "default_units_per_hour")]
    pub units_per_hour: f64,
    #[serde(default = "default_weighted_resources")]
    pub resources: Vec<String>,
}

fn default_units_per_hour() -> f64 {
    DEFAULT_UNITS_PER_HOUR
}

fn default_weighted_resources() -> Vec<String> {
    vec!["metal".to_string(), "crystal".to_string()]
}

impl Default for WeightedCostCompletion {
    fn default() -> Self {
        Self {
            units_per_hour: default_units_per_hour(),
            resources: default_weighted_resources(),
        }
    }
}

impl WeightedCostCompletion {
    /// Sum of costs counted towards the build time
    fn weighted_cost(&self, resources: &[Resource], costs: &[ResourceAmount]) -> f64 {
        self.resources
            .iter()
            .filter_map(|name| find_resource_by_name(resources, name))
            .map(|resource| {
                costs
                    .iter()
                    .filter(|cost| cost.resource == resource.id)
                    .map(|cost| cost.amount as f64)
                    .sum::<f64>()
            })
            .sum()
    }
}

impl CompletionTime for WeightedCostCompletion {
    fn duration(&self, resources: &[Resource], costs: &[ResourceAmount]) -> Result<TimeDelta> {
        if self.units_per_hour.is_nan() || self.units_per_hour <= 0.0 {
            return Err(crate::Error::InvalidCompletionTime(format!(
                "units per hour must be positive, got {}",
                self.units_per_hour
            )));
        }
        let hours = self.weighted_cost(resources, costs) / self.units_per_hour;
        Ok(hours_ceil(hours))
    }
}

/// Constant build time, mostly useful in tests and demos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCompletion(pub TimeDelta);

impl CompletionTime for FixedCompletion {
    fn duration(&self, _resources: &[Resource], _costs: &[ResourceAmount]) -> Result<TimeDelta> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceId;

    fn catalog() -> Vec<Resource> {
        vec![
            Resource {
                id: ResourceId(1),
                name: "metal".to_string(),
                start_amount: 500.0,
                start_production: 60,
                start_storage: 10_000,
            },
            Resource {
                id: ResourceId(2),
                name: "crystal".to_string(),
                start_amount: 500.0,
                start_production: 30,
                start_storage: 10_000,
            },
            Resource {
                id: ResourceId(3),
                name: "deuterium".to_string(),
                start_amount: 0.0,
                start_production: 0,
                start_storage: 10_000,
            },
        ]
    }

    #[test]
    fn test_metal_only_cost() {
        let strategy = WeightedCostCompletion::default();
        let costs = vec![ResourceAmount::new(ResourceId(1), 100)];
        let duration = strategy.duration(&catalog(), &costs).unwrap();
        assert_eq!(duration, TimeDelta::seconds(144));
    }

    #[test]
    fn test_unweighted_resources_are_ignored() {
        let strategy = WeightedCostCompletion::default();
        let costs = vec![
            ResourceAmount::new(ResourceId(1), 1500),
            ResourceAmount::new(ResourceId(2), 1000),
            ResourceAmount::new(ResourceId(3), 99_999),
        ];
        let duration = strategy.duration(&catalog(), &costs).unwrap();
        assert_eq!(duration, TimeDelta::hours(1));
    }

    #[test]
    fn test_weighted_resource_missing_from_catalog() {
        let strategy = WeightedCostCompletion {
            units_per_hour: 2500.0,
            resources: vec!["metal".to_string(), "unobtainium".to_string()],
        };
        let costs = vec![ResourceAmount::new(ResourceId(1), 2500)];
        let duration = strategy.duration(&catalog(), &costs).unwrap();
        assert_eq!(duration, TimeDelta::hours(1));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let strategy = WeightedCostCompletion {
            units_per_hour: 0.0,
            resources: vec!["metal".to_string()],
        };
        assert!(strategy.duration(&catalog(), &[]).is_err());
    }

    #[test]
    fn test_strategy_from_ron() {
        let strategy: WeightedCostCompletion = ron::from_str("(units_per_hour: 1000.0)").unwrap();
        assert_eq!(strategy.units_per_hour, 1000.0);
        assert_eq!(strategy.resources, vec!["metal", "crystal"]);
    }
}

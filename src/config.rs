//! Run configuration: cost ceiling, grid resolution, seeding mode and the
//! crossover bridge weight.
//!
//! # Example
//! ```rust
//! use multicost::*;
//!
//! let config = PropagationConfig::from_toml_str(
//!     r#"
//!     max_cost = "250"
//!     seed_cost = "raster"
//!
//!     [resolution]
//!     ns_res = 30.0
//!     ew_res = 10.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(Some(250.0), config.max_cost.limit());
//! assert_eq!(SeedCost::Raster, config.seed_cost);
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PropagationError, Result};
use crate::seeds::SeedCost;

/// Optional ceiling on accumulated cost. Zero means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "MaxCostRepr")]
pub struct MaxCost(u64);

impl MaxCost {
    pub const UNBOUNDED: MaxCost = MaxCost(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The ceiling as a cost value, or `None` when unbounded.
    pub fn limit(self) -> Option<f64> {
        (self.0 != 0).then_some(self.0 as f64)
    }

    pub fn is_unbounded(self) -> bool {
        self.0 == 0
    }

    /// Whether `cost` lies beyond the ceiling.
    #[inline]
    pub fn exceeded_by(self, cost: f64) -> bool {
        self.limit().is_some_and(|max| cost > max)
    }
}

impl TryFrom<i64> for MaxCost {
    type Error = PropagationError;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(MaxCost)
            .map_err(|_| PropagationError::NegativeMaxCost(value))
    }
}

impl FromStr for MaxCost {
    type Err = PropagationError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| PropagationError::InvalidMaxCost(s.to_string()))?;
        MaxCost::try_from(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaxCostRepr {
    Int(i64),
    Text(String),
}

impl TryFrom<MaxCostRepr> for MaxCost {
    type Error = PropagationError;

    fn try_from(repr: MaxCostRepr) -> Result<Self> {
        match repr {
            MaxCostRepr::Int(v) => MaxCost::try_from(v),
            MaxCostRepr::Text(s) => s.parse(),
        }
    }
}

/// Cell size along each axis. Only the ratio matters for step weights.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resolution {
    /// North-south (row) cell size.
    pub ns_res: f64,
    /// East-west (column) cell size.
    pub ew_res: f64,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            ns_res: 1.0,
            ew_res: 1.0,
        }
    }
}

impl Resolution {
    pub fn new(ns_res: f64, ew_res: f64) -> Self {
        Self { ns_res, ew_res }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.ns_res) && ok(self.ew_res) {
            Ok(())
        } else {
            Err(PropagationError::InvalidResolution {
                ns_res: self.ns_res,
                ew_res: self.ew_res,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropagationConfig {
    pub max_cost: MaxCost,
    pub resolution: Resolution,
    /// How [crate::seeds::from_start_raster] turns start cells into seed
    /// costs. [crate::Propagator] takes seeds as given and does not read it.
    pub seed_cost: SeedCost,
    /// Direction weight of the step between a crossover cell and its
    /// counterpart on the other layer.
    pub bridge_weight: f64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_cost: MaxCost::UNBOUNDED,
            resolution: Resolution::default(),
            seed_cost: SeedCost::Zero,
            bridge_weight: 1.0,
        }
    }
}

impl PropagationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: PropagationConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_cost(mut self, max_cost: MaxCost) -> Self {
        self.max_cost = max_cost;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_seed_cost(mut self, seed_cost: SeedCost) -> Self {
        self.seed_cost = seed_cost;
        self
    }

    pub fn with_bridge_weight(mut self, weight: f64) -> Self {
        self.bridge_weight = weight;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.resolution.validate()?;
        if !self.bridge_weight.is_finite() || self.bridge_weight < 0.0 {
            return Err(PropagationError::InvalidBridgeWeight(self.bridge_weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_cost_parsing() {
        assert_eq!(MaxCost::new(40), "40".parse().unwrap());
        assert_eq!(MaxCost::UNBOUNDED, " 0 ".parse().unwrap());
        assert!(matches!(
            "-3".parse::<MaxCost>(),
            Err(PropagationError::NegativeMaxCost(-3))
        ));
        assert!(matches!(
            "lots".parse::<MaxCost>(),
            Err(PropagationError::InvalidMaxCost(_))
        ));
    }

    #[test]
    fn max_cost_limit() {
        assert_eq!(None, MaxCost::UNBOUNDED.limit());
        assert!(!MaxCost::UNBOUNDED.exceeded_by(1e300));
        assert!(MaxCost::new(5).exceeded_by(5.5));
        assert!(!MaxCost::new(5).exceeded_by(5.0));
    }

    #[test]
    fn defaults_from_empty_document() {
        let config = PropagationConfig::from_toml_str("").unwrap();
        assert_eq!(PropagationConfig::default(), config);
    }

    #[test]
    fn integer_max_cost_in_toml() {
        let config = PropagationConfig::from_toml_str("max_cost = 12").unwrap();
        assert_eq!(Some(12.0), config.max_cost.limit());
    }

    #[test]
    fn negative_max_cost_in_toml_is_rejected() {
        let err = PropagationConfig::from_toml_str("max_cost = -1").unwrap_err();
        assert!(matches!(err, PropagationError::Config(_)));
    }

    #[test]
    fn bad_resolution_is_rejected() {
        let err = PropagationConfig::new()
            .with_resolution(Resolution::new(0.0, 1.0))
            .validate()
            .unwrap_err();
        assert!(matches!(err, PropagationError::InvalidResolution { .. }));
    }

    #[test]
    fn bad_bridge_weight_is_rejected() {
        let err = PropagationConfig::new()
            .with_bridge_weight(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PropagationError::InvalidBridgeWeight(_)));
    }
}

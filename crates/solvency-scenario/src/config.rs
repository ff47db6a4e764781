// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Scenario configuration and validation.
//!
//! A `ScenarioConfig` describes the shape of generated snapshots and the
//! closed ranges every quantity is drawn from. Configurations are validated
//! once, by `ScenarioConfigBuilder::build`, so a generator never has to
//! handle an impossible range.

use std::fmt::Display;

/// A closed range `min..=max` of non-negative quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantityRange {
    pub min: i64,
    pub max: i64,
}

impl QuantityRange {
    #[inline]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`.
    #[inline]
    pub const fn exactly(value: i64) -> Self {
        Self::new(value, value)
    }

    /// Returns `true` if `value` lies within the range.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Display for QuantityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// The quantity a range applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    Available,
    Assigned,
    TotalDemand,
}

impl Display for RangeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Assigned => write!(f, "assigned"),
            Self::TotalDemand => write!(f, "total demand"),
        }
    }
}

/// Reasons a scenario configuration is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioConfigError {
    /// `min > max`.
    InvertedRange {
        field: RangeField,
        range: QuantityRange,
    },
    /// `min < 0`.
    NegativeRange {
        field: RangeField,
        range: QuantityRange,
    },
    /// A process could be assigned more units than its total demand,
    /// which would produce a negative need.
    DemandBelowAssigned {
        total_demand_min: i64,
        assigned_max: i64,
    },
}

impl Display for ScenarioConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedRange { field, range } => {
                write!(f, "The {} range {} has min greater than max", field, range)
            }
            Self::NegativeRange { field, range } => {
                write!(f, "The {} range {} contains negative values", field, range)
            }
            Self::DemandBelowAssigned {
                total_demand_min,
                assigned_max,
            } => write!(
                f,
                "The minimum total demand ({}) must be at least the maximum assigned quantity ({})",
                total_demand_min, assigned_max
            ),
        }
    }
}

impl std::error::Error for ScenarioConfigError {}

/// Validated parameters of a scenario generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioConfig {
    num_resources: usize,
    num_processes: usize,
    available: QuantityRange,
    assigned: QuantityRange,
    total_demand: QuantityRange,
}

impl Default for ScenarioConfig {
    /// 20 resource types with 5 to 10 units each, 20 processes holding 0 to 2
    /// units and demanding 4 to 8 units of every type.
    fn default() -> Self {
        Self {
            num_resources: 20,
            num_processes: 20,
            available: QuantityRange::new(5, 10),
            assigned: QuantityRange::new(0, 2),
            total_demand: QuantityRange::new(4, 8),
        }
    }
}

impl ScenarioConfig {
    /// Returns a builder initialized with the default configuration.
    #[inline]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::new()
    }

    #[inline]
    pub fn num_resources(&self) -> usize {
        self.num_resources
    }

    #[inline]
    pub fn num_processes(&self) -> usize {
        self.num_processes
    }

    #[inline]
    pub fn available(&self) -> QuantityRange {
        self.available
    }

    #[inline]
    pub fn assigned(&self) -> QuantityRange {
        self.assigned
    }

    #[inline]
    pub fn total_demand(&self) -> QuantityRange {
        self.total_demand
    }
}

impl Display for ScenarioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScenarioConfig(resources: {}, processes: {}, available: {}, assigned: {}, total demand: {})",
            self.num_resources, self.num_processes, self.available, self.assigned, self.total_demand
        )
    }
}

/// Builder for `ScenarioConfig`. Starts from the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioConfigBuilder {
    config: ScenarioConfig,
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: ScenarioConfig::default(),
        }
    }

    #[inline]
    pub fn num_resources(mut self, num_resources: usize) -> Self {
        self.config.num_resources = num_resources;
        self
    }

    #[inline]
    pub fn num_processes(mut self, num_processes: usize) -> Self {
        self.config.num_processes = num_processes;
        self
    }

    #[inline]
    pub fn available(mut self, range: QuantityRange) -> Self {
        self.config.available = range;
        self
    }

    #[inline]
    pub fn assigned(mut self, range: QuantityRange) -> Self {
        self.config.assigned = range;
        self
    }

    #[inline]
    pub fn total_demand(mut self, range: QuantityRange) -> Self {
        self.config.total_demand = range;
        self
    }

    /// Validates the ranges and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioConfigError` if a range is inverted or negative, or
    /// if `total_demand.min < assigned.max`.
    pub fn build(self) -> Result<ScenarioConfig, ScenarioConfigError> {
        let config = self.config;
        check_range(RangeField::Available, config.available)?;
        check_range(RangeField::Assigned, config.assigned)?;
        check_range(RangeField::TotalDemand, config.total_demand)?;

        if config.total_demand.min < config.assigned.max {
            return Err(ScenarioConfigError::DemandBelowAssigned {
                total_demand_min: config.total_demand.min,
                assigned_max: config.assigned.max,
            });
        }

        Ok(config)
    }
}

#[inline]
fn check_range(field: RangeField, range: QuantityRange) -> Result<(), ScenarioConfigError> {
    if range.min > range.max {
        return Err(ScenarioConfigError::InvertedRange { field, range });
    }
    if range.min < 0 {
        return Err(ScenarioConfigError::NegativeRange { field, range });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScenarioConfig::builder().build().unwrap();
        assert_eq!(config, ScenarioConfig::default());
        assert_eq!(config.num_resources(), 20);
        assert_eq!(config.num_processes(), 20);
        assert_eq!(config.available(), QuantityRange::new(5, 10));
        assert_eq!(config.assigned(), QuantityRange::new(0, 2));
        assert_eq!(config.total_demand(), QuantityRange::new(4, 8));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = ScenarioConfig::builder()
            .available(QuantityRange::new(10, 5))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ScenarioConfigError::InvertedRange {
                field: RangeField::Available,
                range: QuantityRange::new(10, 5),
            }
        );
        assert_eq!(
            err.to_string(),
            "The available range 10..=5 has min greater than max"
        );
    }

    #[test]
    fn test_negative_range_is_rejected() {
        let err = ScenarioConfig::builder()
            .assigned(QuantityRange::new(-1, 2))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ScenarioConfigError::NegativeRange {
                field: RangeField::Assigned,
                ..
            }
        ));
    }

    #[test]
    fn test_demand_below_assigned_is_rejected() {
        let err = ScenarioConfig::builder()
            .assigned(QuantityRange::new(0, 5))
            .total_demand(QuantityRange::new(4, 8))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ScenarioConfigError::DemandBelowAssigned {
                total_demand_min: 4,
                assigned_max: 5,
            }
        );
    }

    #[test]
    fn test_demand_equal_to_assigned_is_accepted() {
        let config = ScenarioConfig::builder()
            .num_resources(3)
            .num_processes(0)
            .assigned(QuantityRange::exactly(4))
            .total_demand(QuantityRange::new(4, 4))
            .build()
            .unwrap();
        assert_eq!(config.num_processes(), 0);
        assert!(config.assigned().contains(4));
        assert!(!config.assigned().contains(5));
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    FrequencyUnit, GradeLevel, IndicatorId, MaturityLevel, ModuleId, TransformationArea,
    TransformationYear,
};
use super::error::ScoringError;

const DEFAULT_WEIGHT: f64 = 1.0;
pub(crate) const DEFAULT_TOLERANCE: u8 = 1;

/// Linear normalization bounds for a frecuencia indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBounds {
    pub min: f64,
    pub max: f64,
}

impl FrequencyBounds {
    pub(crate) fn ensure_valid(self, indicator: &IndicatorId) -> Result<(), ScoringError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ScoringError::InvalidFrequencyBounds {
                indicator: indicator.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Outcome an indicator is expected to reach in a given program year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedOutcome {
    Level(MaturityLevel),
    Frequency { value: f64, unit: FrequencyUnit },
}

/// Per-indicator expectations across the transformation program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearExpectations {
    pub by_year: BTreeMap<TransformationYear, ExpectedOutcome>,
    /// Allowed shortfall, in levels, before an indicator counts as behind.
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
}

impl YearExpectations {
    pub fn expected_for(&self, year: TransformationYear) -> Option<ExpectedOutcome> {
        self.by_year.get(&year).copied()
    }
}

/// Configuration entry for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub module: ModuleId,
    #[serde(default)]
    pub frequency: Option<FrequencyBounds>,
    #[serde(default)]
    pub expectations: Option<YearExpectations>,
}

/// Configuration entry for one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub area: TransformationArea,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Configuration entry for one transformation area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
        }
    }
}

/// Grade and program-year context expectations are read against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringContext {
    pub grade: GradeLevel,
    pub year: TransformationYear,
}

/// Closed configuration for a scoring run: hierarchy membership, frequency
/// bounds, weights, and the grade/year context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub indicators: BTreeMap<IndicatorId, IndicatorConfig>,
    pub modules: BTreeMap<ModuleId, ModuleConfig>,
    pub areas: BTreeMap<TransformationArea, AreaConfig>,
    pub context: ScoringContext,
}

impl ScoringConfig {
    /// Fail-fast structural validation, run once before any arithmetic.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (id, indicator) in &self.indicators {
            if !self.modules.contains_key(&indicator.module) {
                return Err(ScoringError::UnknownModule {
                    module: indicator.module.clone(),
                    indicator: id.clone(),
                });
            }
            if let Some(bounds) = indicator.frequency {
                bounds.ensure_valid(id)?;
            }
        }

        for (id, module) in &self.modules {
            if !self.areas.contains_key(&module.area) {
                return Err(ScoringError::UnknownArea {
                    area: module.area,
                    module: id.clone(),
                });
            }
            if !module.weight.is_finite() || module.weight <= 0.0 {
                return Err(ScoringError::InvalidWeight {
                    entity: format!("module {id}"),
                    weight: module.weight,
                });
            }
        }

        for (area, config) in &self.areas {
            if !config.weight.is_finite() || config.weight <= 0.0 {
                return Err(ScoringError::InvalidWeight {
                    entity: format!("area {}", area.label()),
                    weight: config.weight,
                });
            }
        }

        Ok(())
    }
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

fn default_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

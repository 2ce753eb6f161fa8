use std::collections::BTreeMap;

use super::domain::{GradeCycle, GradeLevel, MaturityLevel, TransformationArea, TransformationYear};

/// Lookup abstraction for the maturity level an area is expected to show,
/// so the engine can be exercised against any expectation source.
pub trait ExpectedLevels: Send + Sync {
    fn expected_level(
        &self,
        area: TransformationArea,
        grade: GradeLevel,
        year: TransformationYear,
    ) -> MaturityLevel;
}

/// The network-wide default curve: schools are expected to reach Incipiente
/// during their first two years, En Desarrollo in year three, and Avanzado
/// from year four on, regardless of area or grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardExpectations;

impl StandardExpectations {
    pub const fn level_for_year(year: TransformationYear) -> MaturityLevel {
        match year {
            TransformationYear::Year1 | TransformationYear::Year2 => MaturityLevel::Emerging,
            TransformationYear::Year3 => MaturityLevel::Developing,
            TransformationYear::Year4 | TransformationYear::Year5 => MaturityLevel::Advanced,
        }
    }
}

impl ExpectedLevels for StandardExpectations {
    fn expected_level(
        &self,
        _area: TransformationArea,
        _grade: GradeLevel,
        year: TransformationYear,
    ) -> MaturityLevel {
        Self::level_for_year(year)
    }
}

/// Expectation table with per-area, per-cycle overrides on top of the
/// standard curve. Overrides are keyed by grade cycle rather than by exact
/// grade so one entry covers a whole school stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectationTable {
    pub overrides: BTreeMap<ExpectationKey, MaturityLevel>,
}

/// Composite key for one override entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpectationKey {
    pub area: TransformationArea,
    pub cycle: GradeCycle,
    pub year: TransformationYear,
}

impl ExpectationTable {
    pub fn with_override(
        mut self,
        area: TransformationArea,
        cycle: GradeCycle,
        year: TransformationYear,
        level: MaturityLevel,
    ) -> Self {
        self.overrides
            .insert(ExpectationKey { area, cycle, year }, level);
        self
    }
}

impl ExpectedLevels for ExpectationTable {
    fn expected_level(
        &self,
        area: TransformationArea,
        grade: GradeLevel,
        year: TransformationYear,
    ) -> MaturityLevel {
        let key = ExpectationKey {
            area,
            cycle: grade.cycle(),
            year,
        };
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or_else(|| StandardExpectations::level_for_year(year))
    }
}

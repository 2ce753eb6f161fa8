//! Deterministic scoring pipeline for school transformation assessments.
//! Raw indicator responses normalize per category and roll up through
//! weighted modules and areas, with a gap drill-down that compares each
//! indicator against the maturity expected for the school's program year.

pub(crate) mod aggregate;
pub(crate) mod cohort;
pub mod config;
pub mod domain;
pub(crate) mod error;
pub mod expectations;
pub(crate) mod gap;
pub(crate) mod normalize;

#[cfg(test)]
mod tests;

pub use aggregate::{AreaScore, AssessmentSummary, ModuleScore};
pub use cohort::{
    aggregate_gaps, aggregate_scores, AreaGapRollup, CohortGapOverview, CohortScores,
    CriticalIndicatorCount, ScoreAverages,
};
pub use config::{
    AreaConfig, ExpectedOutcome, FrequencyBounds, IndicatorConfig, ModuleConfig, ScoringConfig,
    ScoringContext, YearExpectations,
};
pub use domain::{
    AssessmentResponse, FrequencyUnit, GradeCycle, GradeLevel, IndicatorCategory, IndicatorId,
    MaturityLevel, ModuleId, RawValue, TransformationArea, TransformationYear,
};
pub use error::ScoringError;
pub use expectations::{ExpectationKey, ExpectationTable, ExpectedLevels, StandardExpectations};
pub use gap::{
    AreaGap, FrequencyAmount, GapAnalysis, GapAssessment, GapClassification, GapStanding, GapTally,
    IndicatorGap, ModuleGapReport,
};
pub use normalize::{score_response, score_responses, IndicatorScore};

use chrono::{DateTime, Utc};

/// Stateless engine applying one validated configuration to response sets.
pub struct ScoringEngine<E = StandardExpectations> {
    config: ScoringConfig,
    expectations: E,
}

impl ScoringEngine<StandardExpectations> {
    /// Build an engine on the network-wide default expectation curve.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        Self::with_expectations(config, StandardExpectations)
    }
}

impl<E: ExpectedLevels> ScoringEngine<E> {
    /// Build an engine with a custom expectation source. The configuration
    /// is validated here, once, so scoring never starts on a broken
    /// hierarchy.
    pub fn with_expectations(config: ScoringConfig, expectations: E) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self {
            config,
            expectations,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one response set into an immutable summary. `generated_at` is
    /// caller-supplied, so identical inputs reproduce identical output.
    pub fn score(
        &self,
        responses: &[AssessmentResponse],
        generated_at: DateTime<Utc>,
    ) -> Result<AssessmentSummary, ScoringError> {
        let indicator_scores = normalize::score_responses(responses, &self.config)?;
        let rollup = aggregate::roll_up(&indicator_scores, &self.config)?;
        let area_scores =
            gap::annotate_areas(rollup.area_scores, self.config.context, &self.expectations);

        Ok(AssessmentSummary {
            overall_score: rollup.overall_score,
            overall_level: rollup.overall_level,
            indicator_scores,
            module_scores: rollup.module_scores,
            area_scores,
            context: self.config.context,
            generated_at,
        })
    }

    /// Indicator-level drill-down for a summary this engine produced.
    pub fn indicator_gaps(&self, summary: &AssessmentSummary) -> Result<GapAnalysis, ScoringError> {
        gap::analyze(summary, &self.config)
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{mean, AreaScore, AssessmentSummary};
use super::config::{
    ExpectedOutcome, IndicatorConfig, ScoringConfig, ScoringContext, DEFAULT_TOLERANCE,
};
use super::domain::{
    FrequencyUnit, IndicatorCategory, IndicatorId, MaturityLevel, ModuleId, RawValue,
    TransformationArea, TransformationYear,
};
use super::error::ScoringError;
use super::expectations::ExpectedLevels;
use super::normalize::IndicatorScore;

/// Signed distance between an area's actual and expected maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaGap {
    pub expected_level: MaturityLevel,
    pub gap: i8,
}

impl AreaGap {
    /// Display standing, derived on demand rather than stored.
    pub const fn standing(self) -> GapStanding {
        if self.gap > 0 {
            GapStanding::Ahead
        } else if self.gap == 0 {
            GapStanding::OnTrack
        } else {
            GapStanding::Behind
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStanding {
    Ahead,
    OnTrack,
    Behind,
}

impl GapStanding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ahead => "Ahead",
            Self::OnTrack => "On Track",
            Self::Behind => "Behind",
        }
    }
}

/// Fill in expected level and signed gap for every determined area.
/// Undetermined areas keep `gap = None`; no data never reads as on target.
pub(crate) fn annotate_areas<E: ExpectedLevels>(
    mut area_scores: Vec<AreaScore>,
    context: ScoringContext,
    expectations: &E,
) -> Vec<AreaScore> {
    for area_score in &mut area_scores {
        if let Some(actual) = area_score.actual_level {
            let expected =
                expectations.expected_level(area_score.area, context.grade, context.year);
            area_score.gap = Some(AreaGap {
                expected_level: expected,
                gap: actual.index() as i8 - expected.index() as i8,
            });
        }
    }
    area_scores
}

/// Four-way classification of an indicator against its expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapClassification {
    Ahead,
    OnTrack,
    Behind,
    Critical,
}

impl GapClassification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ahead => "Ahead",
            Self::OnTrack => "On Track",
            Self::Behind => "Behind",
            Self::Critical => "Critical",
        }
    }
}

/// A frequency paired with the cadence it is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyAmount {
    pub value: f64,
    pub unit: FrequencyUnit,
}

impl FrequencyAmount {
    pub fn annualized(self) -> f64 {
        self.unit.annualize(self.value)
    }
}

/// How one indicator compares against its configured expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapAssessment {
    /// No usable expectation for the run's program year.
    NotConfigured,
    Level {
        expected_level: MaturityLevel,
        gap: i8,
        classification: GapClassification,
    },
    Frequency {
        actual: FrequencyAmount,
        expected: FrequencyAmount,
        gap_percent: f64,
        classification: GapClassification,
    },
}

impl GapAssessment {
    pub fn classification(&self) -> Option<GapClassification> {
        match self {
            Self::NotConfigured => None,
            Self::Level { classification, .. } | Self::Frequency { classification, .. } => {
                Some(*classification)
            }
        }
    }
}

/// Gap detail for one responding indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorGap {
    pub indicator: IndicatorId,
    pub category: IndicatorCategory,
    pub normalized_score: f64,
    pub actual_level: u8,
    pub tolerance: u8,
    pub assessment: GapAssessment,
}

/// Classification tallies across a set of indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapTally {
    pub total: usize,
    pub ahead: usize,
    pub on_track: usize,
    pub behind: usize,
    pub critical: usize,
    pub not_configured: usize,
}

impl GapTally {
    fn record(&mut self, assessment: &GapAssessment) {
        self.total += 1;
        match assessment.classification() {
            None => self.not_configured += 1,
            Some(GapClassification::Ahead) => self.ahead += 1,
            Some(GapClassification::OnTrack) => self.on_track += 1,
            Some(GapClassification::Behind) => self.behind += 1,
            Some(GapClassification::Critical) => self.critical += 1,
        }
    }

    pub fn merge(&mut self, other: &GapTally) {
        self.total += other.total;
        self.ahead += other.ahead;
        self.on_track += other.on_track;
        self.behind += other.behind;
        self.critical += other.critical;
        self.not_configured += other.not_configured;
    }
}

/// Gap roll-up for one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleGapReport {
    pub module: ModuleId,
    pub area: TransformationArea,
    pub indicators: Vec<IndicatorGap>,
    pub tally: GapTally,
    /// Mean level gap over the module's level-based expectations; frequency
    /// gaps are percentages and stay out of this mean.
    pub average_gap: Option<f64>,
}

/// Indicator-level gap drill-down for one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub context: ScoringContext,
    pub modules: Vec<ModuleGapReport>,
    pub tally: GapTally,
    pub average_gap: Option<f64>,
    pub critical: Vec<IndicatorId>,
    pub behind: Vec<IndicatorId>,
}

/// Actual 0-4 level implied by a normalized score: quarter steps for
/// profundidad, reached/not-reached for the binary categories.
pub(crate) fn score_to_actual_level(score: f64, category: IndicatorCategory) -> u8 {
    match category {
        IndicatorCategory::Profundidad => (score / 25.0).round() as u8,
        IndicatorCategory::Cobertura | IndicatorCategory::Frecuencia => {
            if score >= 50.0 {
                1
            } else {
                0
            }
        }
    }
}

pub(crate) fn classify_level_gap(
    gap: i8,
    tolerance: u8,
    category: IndicatorCategory,
) -> GapClassification {
    if gap >= 0 {
        return GapClassification::Ahead;
    }
    if i16::from(gap) >= -i16::from(tolerance) {
        return GapClassification::OnTrack;
    }
    if category == IndicatorCategory::Profundidad && gap <= -3 {
        return GapClassification::Critical;
    }
    if tolerance == 0 {
        return GapClassification::Critical;
    }
    GapClassification::Behind
}

/// Tolerance in levels maps to quarter steps of the expected cadence:
/// one level of slack allows a 25% shortfall, two allow 50%.
pub(crate) fn classify_frequency_gap(gap_percent: f64, tolerance: u8) -> GapClassification {
    if gap_percent >= 0.0 {
        return GapClassification::Ahead;
    }
    if gap_percent >= -25.0 * f64::from(tolerance) {
        return GapClassification::OnTrack;
    }
    if gap_percent <= -75.0 {
        return GapClassification::Critical;
    }
    GapClassification::Behind
}

/// Whole-percent shortfall or surplus of the actual cadence against the
/// expected one, compared on annualized counts.
pub(crate) fn frequency_gap_percent(actual: FrequencyAmount, expected: FrequencyAmount) -> f64 {
    let expected_annual = expected.annualized();
    if expected_annual == 0.0 {
        return 0.0;
    }
    ((actual.annualized() - expected_annual) / expected_annual * 100.0).round()
}

pub(crate) fn indicator_gap(
    score: &IndicatorScore,
    config: &IndicatorConfig,
    year: TransformationYear,
) -> IndicatorGap {
    let actual_level = score_to_actual_level(score.normalized_score, score.category);
    let (tolerance, expected) = match &config.expectations {
        Some(expectations) => (expectations.tolerance, expectations.expected_for(year)),
        None => (DEFAULT_TOLERANCE, None),
    };

    let assessment = match expected {
        None => GapAssessment::NotConfigured,
        Some(ExpectedOutcome::Level(expected_level)) => {
            let gap = actual_level as i8 - expected_level.index() as i8;
            GapAssessment::Level {
                expected_level,
                gap,
                classification: classify_level_gap(gap, tolerance, score.category),
            }
        }
        Some(ExpectedOutcome::Frequency { value, unit }) => match score.value {
            RawValue::Frequency {
                value: actual_value,
                unit: actual_unit,
            } => {
                let actual = FrequencyAmount {
                    value: actual_value,
                    unit: actual_unit.unwrap_or(FrequencyUnit::Anio),
                };
                let expected = FrequencyAmount { value, unit };
                let gap_percent = frequency_gap_percent(actual, expected);
                GapAssessment::Frequency {
                    actual,
                    expected,
                    gap_percent,
                    classification: classify_frequency_gap(gap_percent, tolerance),
                }
            }
            // A cadence expectation cannot be compared against a
            // non-frequency answer.
            _ => GapAssessment::NotConfigured,
        },
    };

    IndicatorGap {
        indicator: score.indicator.clone(),
        category: score.category,
        normalized_score: score.normalized_score,
        actual_level,
        tolerance,
        assessment,
    }
}

/// Build the indicator-level drill-down for a summary produced with the
/// same configuration. Only responding indicators take part; an unanswered
/// indicator carries no evidence either way.
pub(crate) fn analyze(
    summary: &AssessmentSummary,
    config: &ScoringConfig,
) -> Result<GapAnalysis, ScoringError> {
    let year = summary.context.year;

    let mut per_module: BTreeMap<ModuleId, Vec<IndicatorGap>> = config
        .modules
        .keys()
        .map(|id| (id.clone(), Vec::new()))
        .collect();

    for score in &summary.indicator_scores {
        let indicator = config.indicators.get(&score.indicator).ok_or_else(|| {
            ScoringError::UnknownIndicator {
                indicator: score.indicator.clone(),
            }
        })?;
        let bucket =
            per_module
                .get_mut(&indicator.module)
                .ok_or_else(|| ScoringError::UnknownModule {
                    module: indicator.module.clone(),
                    indicator: score.indicator.clone(),
                })?;
        bucket.push(indicator_gap(score, indicator, year));
    }

    let mut modules = Vec::with_capacity(per_module.len());
    let mut tally = GapTally::default();
    let mut level_gaps = Vec::new();
    let mut critical = Vec::new();
    let mut behind = Vec::new();

    for (module, module_config) in &config.modules {
        let indicators = per_module.remove(module).unwrap_or_default();
        let mut module_tally = GapTally::default();
        let mut module_level_gaps = Vec::new();

        for indicator in &indicators {
            module_tally.record(&indicator.assessment);
            if let GapAssessment::Level { gap, .. } = indicator.assessment {
                module_level_gaps.push(f64::from(gap));
            }
            match indicator.assessment.classification() {
                Some(GapClassification::Critical) => critical.push(indicator.indicator.clone()),
                Some(GapClassification::Behind) => behind.push(indicator.indicator.clone()),
                _ => {}
            }
        }

        tally.merge(&module_tally);
        level_gaps.extend_from_slice(&module_level_gaps);

        modules.push(ModuleGapReport {
            module: module.clone(),
            area: module_config.area,
            average_gap: mean(&module_level_gaps),
            tally: module_tally,
            indicators,
        });
    }

    Ok(GapAnalysis {
        context: summary.context,
        average_gap: mean(&level_gaps),
        tally,
        critical,
        behind,
        modules,
    })
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::{ScoringConfig, ScoringContext};
use super::domain::{MaturityLevel, ModuleId, TransformationArea};
use super::error::ScoringError;
use super::gap::AreaGap;
use super::normalize::{round2, IndicatorScore};

/// Aggregated score for one module. `average_score` is `None` when no
/// member indicator responded; a module with no data never reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleScore {
    pub module: ModuleId,
    pub average_score: Option<f64>,
    pub indicator_count: usize,
}

/// Aggregated score for one transformation area, annotated with its gap
/// once analysis has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaScore {
    pub area: TransformationArea,
    pub actual_score: Option<f64>,
    pub actual_level: Option<MaturityLevel>,
    pub gap: Option<AreaGap>,
}

/// Top-level aggregate produced once per scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub overall_score: Option<f64>,
    pub overall_level: Option<MaturityLevel>,
    pub indicator_scores: Vec<IndicatorScore>,
    pub module_scores: Vec<ModuleScore>,
    pub area_scores: Vec<AreaScore>,
    pub context: ScoringContext,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct WeightedScore {
    pub score: f64,
    pub weight: f64,
}

pub(crate) struct ScoreRollup {
    pub module_scores: Vec<ModuleScore>,
    pub area_scores: Vec<AreaScore>,
    pub overall_score: Option<f64>,
    pub overall_level: Option<MaturityLevel>,
}

/// Roll normalized indicator scores up to modules, areas, and the overall
/// score. Modules and areas without data stay `None` and drop out of every
/// weighted mean, numerator and denominator alike.
pub(crate) fn roll_up(
    scores: &[IndicatorScore],
    config: &ScoringConfig,
) -> Result<ScoreRollup, ScoringError> {
    let mut members: BTreeMap<&ModuleId, Vec<f64>> = config
        .modules
        .keys()
        .map(|id| (id, Vec::new()))
        .collect();

    for score in scores {
        let indicator = config.indicators.get(&score.indicator).ok_or_else(|| {
            ScoringError::UnknownIndicator {
                indicator: score.indicator.clone(),
            }
        })?;
        let bucket =
            members
                .get_mut(&indicator.module)
                .ok_or_else(|| ScoringError::UnknownModule {
                    module: indicator.module.clone(),
                    indicator: score.indicator.clone(),
                })?;
        bucket.push(score.normalized_score);
    }

    let mut area_inputs: BTreeMap<TransformationArea, Vec<WeightedScore>> =
        config.areas.keys().map(|area| (*area, Vec::new())).collect();
    let mut module_scores = Vec::with_capacity(config.modules.len());

    for (id, module) in &config.modules {
        let member_scores = members.remove(id).unwrap_or_default();
        let average_score = mean(&member_scores);

        let inputs =
            area_inputs
                .get_mut(&module.area)
                .ok_or_else(|| ScoringError::UnknownArea {
                    area: module.area,
                    module: id.clone(),
                })?;
        if let Some(average) = average_score {
            inputs.push(WeightedScore {
                score: average,
                weight: module.weight,
            });
        }

        module_scores.push(ModuleScore {
            module: id.clone(),
            average_score,
            indicator_count: member_scores.len(),
        });
    }

    let mut area_scores = Vec::with_capacity(config.areas.len());
    let mut overall_inputs = Vec::with_capacity(config.areas.len());

    for (area, area_config) in &config.areas {
        let inputs = area_inputs.remove(area).unwrap_or_default();
        let actual_score = weighted_mean(&inputs);
        let actual_level = actual_score.map(MaturityLevel::from_score);

        if let Some(score) = actual_score {
            overall_inputs.push(WeightedScore {
                score,
                weight: area_config.weight,
            });
        }

        area_scores.push(AreaScore {
            area: *area,
            actual_score,
            actual_level,
            gap: None,
        });
    }

    let overall_score = weighted_mean(&overall_inputs);
    let overall_level = overall_score.map(MaturityLevel::from_score);

    Ok(ScoreRollup {
        module_scores,
        area_scores,
        overall_score,
        overall_level,
    })
}

/// Arithmetic mean at two-decimal resolution; `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

/// Weighted mean over the entries that carry data, normalized by the weight
/// sum of those entries only.
pub(crate) fn weighted_mean(entries: &[WeightedScore]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total_weight: f64 = entries.iter().map(|entry| entry.weight).sum();
    if total_weight == 0.0 {
        return None;
    }
    let weighted_sum: f64 = entries.iter().map(|entry| entry.score * entry.weight).sum();
    Some(round2(weighted_sum / total_weight))
}

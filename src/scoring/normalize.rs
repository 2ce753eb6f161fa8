use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::domain::{AssessmentResponse, IndicatorCategory, IndicatorId, RawValue};
use super::error::ScoringError;

pub(crate) const MAX_DEPTH_LEVEL: u8 = 4;

/// Normalized 0-100 score derived from one raw response. The raw value is
/// echoed through so downstream analysis can reach it without the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub indicator: IndicatorId,
    pub category: IndicatorCategory,
    pub value: RawValue,
    pub normalized_score: f64,
}

/// Round to two decimals, the resolution every reported score carries.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize one response against its indicator configuration.
///
/// Out-of-range frequency values clamp to the configured bounds; every
/// other shape problem is a hard error.
pub fn score_response(
    response: &AssessmentResponse,
    config: &ScoringConfig,
) -> Result<IndicatorScore, ScoringError> {
    let indicator =
        config
            .indicators
            .get(&response.indicator)
            .ok_or_else(|| ScoringError::UnknownIndicator {
                indicator: response.indicator.clone(),
            })?;

    let normalized_score = match (response.category, response.value) {
        (IndicatorCategory::Cobertura, RawValue::Coverage(covered)) => {
            if covered {
                100.0
            } else {
                0.0
            }
        }
        (IndicatorCategory::Frecuencia, RawValue::Frequency { value, .. }) => {
            let bounds = indicator.frequency.ok_or_else(|| {
                ScoringError::MissingFrequencyBounds {
                    indicator: response.indicator.clone(),
                }
            })?;
            bounds.ensure_valid(&response.indicator)?;
            if !value.is_finite() {
                return Err(ScoringError::InvalidResponse {
                    indicator: response.indicator.clone(),
                    detail: format!("frequency value must be finite, got {value}"),
                });
            }
            let fraction = ((value - bounds.min) / (bounds.max - bounds.min)).clamp(0.0, 1.0);
            round2(fraction * 100.0)
        }
        (IndicatorCategory::Profundidad, RawValue::Depth(level)) => {
            if level > MAX_DEPTH_LEVEL {
                return Err(ScoringError::InvalidResponse {
                    indicator: response.indicator.clone(),
                    detail: format!("profundidad level must be between 0 and 4, got {level}"),
                });
            }
            f64::from(level) / f64::from(MAX_DEPTH_LEVEL) * 100.0
        }
        (category, value) => {
            return Err(ScoringError::InvalidResponse {
                indicator: response.indicator.clone(),
                detail: format!(
                    "{} response cannot carry a {} value",
                    category.label(),
                    value.kind()
                ),
            })
        }
    };

    Ok(IndicatorScore {
        indicator: response.indicator.clone(),
        category: response.category,
        value: response.value,
        normalized_score,
    })
}

/// Normalize a batch of responses into a canonical, id-sorted score list.
///
/// A second response for the same indicator is rejected so the result can
/// never depend on submission order.
pub fn score_responses(
    responses: &[AssessmentResponse],
    config: &ScoringConfig,
) -> Result<Vec<IndicatorScore>, ScoringError> {
    let mut seen = BTreeSet::new();
    let mut scores = Vec::with_capacity(responses.len());

    for response in responses {
        if !seen.insert(response.indicator.clone()) {
            return Err(ScoringError::DuplicateResponse {
                indicator: response.indicator.clone(),
            });
        }
        scores.push(score_response(response, config)?);
    }

    scores.sort_by(|a, b| a.indicator.cmp(&b.indicator));
    Ok(scores)
}

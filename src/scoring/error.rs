use super::domain::{IndicatorId, ModuleId, TransformationArea};

/// Failures that abort a scoring run; no partial summary survives any of them.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("response for indicator {indicator} is invalid: {detail}")]
    InvalidResponse {
        indicator: IndicatorId,
        detail: String,
    },
    #[error("more than one response submitted for indicator {indicator}")]
    DuplicateResponse { indicator: IndicatorId },
    #[error("frecuencia indicator {indicator} has no frequency bounds configured")]
    MissingFrequencyBounds { indicator: IndicatorId },
    #[error("frequency bounds for indicator {indicator} must satisfy min < max (min {min}, max {max})")]
    InvalidFrequencyBounds {
        indicator: IndicatorId,
        min: f64,
        max: f64,
    },
    #[error("response references indicator {indicator} absent from the scoring configuration")]
    UnknownIndicator { indicator: IndicatorId },
    #[error("indicator {indicator} references module {module} absent from the scoring configuration")]
    UnknownModule {
        module: ModuleId,
        indicator: IndicatorId,
    },
    #[error("module {module} references area {area:?} absent from the scoring configuration")]
    UnknownArea {
        area: TransformationArea,
        module: ModuleId,
    },
    #[error("weight for {entity} must be a positive finite number (found {weight})")]
    InvalidWeight { entity: String, weight: f64 },
}

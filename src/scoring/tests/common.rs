use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::scoring::{
    AreaConfig, AreaScore, AssessmentResponse, AssessmentSummary, ExpectedOutcome,
    FrequencyBounds, FrequencyUnit, GradeLevel, IndicatorCategory, IndicatorConfig, IndicatorId,
    MaturityLevel, ModuleConfig, ModuleId, ModuleScore, RawValue, ScoringConfig, ScoringContext,
    ScoringEngine, TransformationArea, TransformationYear, YearExpectations,
};

pub(super) fn indicator_id(raw: &str) -> IndicatorId {
    IndicatorId(raw.to_string())
}

pub(super) fn module_id(raw: &str) -> ModuleId {
    ModuleId(raw.to_string())
}

pub(super) fn context() -> ScoringContext {
    ScoringContext {
        grade: GradeLevel::TerceroBasico,
        year: TransformationYear::Year2,
    }
}

/// 2026-01-01T00:00:00Z, fixed so summaries compare byte for byte.
pub(super) fn generated_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_767_225_600, 0).expect("valid fixture timestamp")
}

pub(super) fn level_expectation(
    year: TransformationYear,
    level: MaturityLevel,
    tolerance: u8,
) -> YearExpectations {
    YearExpectations {
        by_year: BTreeMap::from([(year, ExpectedOutcome::Level(level))]),
        tolerance,
    }
}

pub(super) fn cadence_expectation(
    year: TransformationYear,
    value: f64,
    unit: FrequencyUnit,
    tolerance: u8,
) -> YearExpectations {
    YearExpectations {
        by_year: BTreeMap::from([(year, ExpectedOutcome::Frequency { value, unit })]),
        tolerance,
    }
}

pub(super) fn plain_indicator(module: &str) -> IndicatorConfig {
    IndicatorConfig {
        module: module_id(module),
        frequency: None,
        expectations: None,
    }
}

pub(super) fn bounded_indicator(module: &str, min: f64, max: f64) -> IndicatorConfig {
    IndicatorConfig {
        module: module_id(module),
        frequency: Some(FrequencyBounds { min, max }),
        expectations: None,
    }
}

pub(super) fn standard_module(area: TransformationArea) -> ModuleConfig {
    ModuleConfig { area, weight: 1.0 }
}

/// Two responding modules in different areas plus one module that never
/// receives answers, under the 3° Básico / year two context.
pub(super) fn base_config() -> ScoringConfig {
    let mut indicators = BTreeMap::new();
    indicators.insert(
        indicator_id("tutoria_activa"),
        IndicatorConfig {
            module: module_id("practicas_aula"),
            frequency: None,
            expectations: Some(level_expectation(
                TransformationYear::Year2,
                MaturityLevel::Emerging,
                1,
            )),
        },
    );
    indicators.insert(
        indicator_id("sesiones_semanales"),
        IndicatorConfig {
            module: module_id("practicas_aula"),
            frequency: Some(FrequencyBounds {
                min: 0.0,
                max: 10.0,
            }),
            expectations: Some(cadence_expectation(
                TransformationYear::Year2,
                2.0,
                FrequencyUnit::Semana,
                1,
            )),
        },
    );
    indicators.insert(
        indicator_id("rubricas_nivel"),
        IndicatorConfig {
            module: module_id("practicas_equipo"),
            frequency: None,
            expectations: Some(level_expectation(
                TransformationYear::Year2,
                MaturityLevel::Developing,
                1,
            )),
        },
    );
    indicators.insert(
        indicator_id("sin_expectativa"),
        plain_indicator("practicas_equipo"),
    );

    let mut modules = BTreeMap::new();
    modules.insert(
        module_id("practicas_aula"),
        ModuleConfig {
            area: TransformationArea::Personalizacion,
            weight: 2.0,
        },
    );
    modules.insert(
        module_id("practicas_equipo"),
        standard_module(TransformationArea::TrabajoDocente),
    );
    modules.insert(
        module_id("modulo_vacio"),
        standard_module(TransformationArea::Evaluacion),
    );

    let mut areas = BTreeMap::new();
    areas.insert(TransformationArea::Personalizacion, AreaConfig::default());
    areas.insert(TransformationArea::TrabajoDocente, AreaConfig::default());
    areas.insert(TransformationArea::Evaluacion, AreaConfig::default());

    ScoringConfig {
        indicators,
        modules,
        areas,
        context: context(),
    }
}

/// Responses covering all three categories, leaving `modulo_vacio` empty.
pub(super) fn typical_responses() -> Vec<AssessmentResponse> {
    vec![
        coverage_response("tutoria_activa", true),
        frequency_response("sesiones_semanales", 5.0, Some(FrequencyUnit::Semana)),
        depth_response("rubricas_nivel", 3),
        coverage_response("sin_expectativa", false),
    ]
}

pub(super) fn engine(config: ScoringConfig) -> ScoringEngine {
    ScoringEngine::new(config).expect("fixture configuration validates")
}

pub(super) fn coverage_response(indicator: &str, covered: bool) -> AssessmentResponse {
    AssessmentResponse {
        indicator: indicator_id(indicator),
        category: IndicatorCategory::Cobertura,
        value: RawValue::Coverage(covered),
    }
}

pub(super) fn frequency_response(
    indicator: &str,
    value: f64,
    unit: Option<FrequencyUnit>,
) -> AssessmentResponse {
    AssessmentResponse {
        indicator: indicator_id(indicator),
        category: IndicatorCategory::Frecuencia,
        value: RawValue::Frequency { value, unit },
    }
}

pub(super) fn depth_response(indicator: &str, level: u8) -> AssessmentResponse {
    AssessmentResponse {
        indicator: indicator_id(indicator),
        category: IndicatorCategory::Profundidad,
        value: RawValue::Depth(level),
    }
}

pub(super) fn module_score<'a>(summary: &'a AssessmentSummary, module: &str) -> &'a ModuleScore {
    summary
        .module_scores
        .iter()
        .find(|score| score.module == module_id(module))
        .expect("module present in summary")
}

pub(super) fn area_score(summary: &AssessmentSummary, area: TransformationArea) -> &AreaScore {
    summary
        .area_scores
        .iter()
        .find(|score| score.area == area)
        .expect("area present in summary")
}

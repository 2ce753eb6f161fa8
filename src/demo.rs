//! Canned school-network sample used by the `demo` subcommand.
//!
//! The sample models one network in its second transformation year: three
//! classrooms at different grade levels answering the same nine indicators,
//! with deliberately uneven results so every gap classification shows up in
//! the output.

use crate::scoring::{
    AreaConfig, AssessmentResponse, ExpectedOutcome, FrequencyBounds, FrequencyUnit, GradeLevel,
    IndicatorCategory, IndicatorConfig, IndicatorId, MaturityLevel, ModuleConfig, ModuleId,
    RawValue, ScoringConfig, ScoringContext, TransformationArea, TransformationYear,
    YearExpectations,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Fixed timestamp (2026-03-16T12:00:00Z) so demo reruns are byte-identical.
pub fn pinned_generated_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_773_662_400, 0).unwrap_or_default()
}

/// Indicator hierarchy shared by every classroom in the sample network.
pub fn network_config(context: ScoringContext) -> ScoringConfig {
    let mut indicators = BTreeMap::new();

    indicators.insert(
        IndicatorId("plan_personal_activo".to_string()),
        IndicatorConfig {
            module: ModuleId("tutoria_personalizada".to_string()),
            frequency: None,
            // Non-negotiable from year one, hence zero tolerance.
            expectations: Some(level_curve(
                &[
                    (TransformationYear::Year1, MaturityLevel::Emerging),
                    (TransformationYear::Year2, MaturityLevel::Emerging),
                    (TransformationYear::Year3, MaturityLevel::Developing),
                ],
                0,
            )),
        },
    );
    indicators.insert(
        IndicatorId("sesiones_tutoria".to_string()),
        IndicatorConfig {
            module: ModuleId("tutoria_personalizada".to_string()),
            frequency: Some(FrequencyBounds { min: 0.0, max: 5.0 }),
            expectations: Some(cadence_curve(
                &[
                    (TransformationYear::Year1, 1.0, FrequencyUnit::Semana),
                    (TransformationYear::Year2, 2.0, FrequencyUnit::Semana),
                    (TransformationYear::Year3, 3.0, FrequencyUnit::Semana),
                ],
                1,
            )),
        },
    );
    indicators.insert(
        IndicatorId("uso_datos_estudiante".to_string()),
        IndicatorConfig {
            module: ModuleId("tutoria_personalizada".to_string()),
            frequency: None,
            expectations: Some(level_curve(
                &[(TransformationYear::Year2, MaturityLevel::Developing)],
                1,
            )),
        },
    );
    indicators.insert(
        IndicatorId("proyectos_interdisciplinarios".to_string()),
        IndicatorConfig {
            module: ModuleId("aprendizaje_profundo".to_string()),
            frequency: None,
            expectations: Some(level_curve(
                &[(TransformationYear::Year2, MaturityLevel::Emerging)],
                1,
            )),
        },
    );
    indicators.insert(
        IndicatorId("exhibiciones_aprendizaje".to_string()),
        IndicatorConfig {
            module: ModuleId("aprendizaje_profundo".to_string()),
            frequency: Some(FrequencyBounds { min: 0.0, max: 6.0 }),
            expectations: Some(cadence_curve(
                &[(TransformationYear::Year2, 2.0, FrequencyUnit::Semestre)],
                1,
            )),
        },
    );
    indicators.insert(
        IndicatorId("retroalimentacion_ciclos".to_string()),
        IndicatorConfig {
            module: ModuleId("evaluacion_formativa".to_string()),
            frequency: Some(FrequencyBounds { min: 0.0, max: 8.0 }),
            expectations: Some(cadence_curve(
                &[(TransformationYear::Year2, 4.0, FrequencyUnit::Mes)],
                1,
            )),
        },
    );
    indicators.insert(
        IndicatorId("rubricas_competencias".to_string()),
        IndicatorConfig {
            module: ModuleId("evaluacion_formativa".to_string()),
            frequency: None,
            expectations: Some(level_curve(
                &[(TransformationYear::Year2, MaturityLevel::Developing)],
                0,
            )),
        },
    );
    indicators.insert(
        IndicatorId("observacion_entre_pares".to_string()),
        IndicatorConfig {
            module: ModuleId("colaboracion_docente".to_string()),
            frequency: None,
            // No expectation curve yet, so drill-downs report it unconfigured.
            expectations: None,
        },
    );
    indicators.insert(
        IndicatorId("codiseno_semanal".to_string()),
        IndicatorConfig {
            module: ModuleId("colaboracion_docente".to_string()),
            frequency: Some(FrequencyBounds { min: 0.0, max: 4.0 }),
            expectations: Some(cadence_curve(
                &[
                    (TransformationYear::Year1, 1.0, FrequencyUnit::Semana),
                    (TransformationYear::Year2, 2.0, FrequencyUnit::Semana),
                ],
                1,
            )),
        },
    );

    let mut modules = BTreeMap::new();
    modules.insert(
        ModuleId("tutoria_personalizada".to_string()),
        ModuleConfig {
            area: TransformationArea::Personalizacion,
            weight: 2.0,
        },
    );
    modules.insert(
        ModuleId("aprendizaje_profundo".to_string()),
        ModuleConfig {
            area: TransformationArea::Aprendizaje,
            weight: 1.0,
        },
    );
    modules.insert(
        ModuleId("evaluacion_formativa".to_string()),
        ModuleConfig {
            area: TransformationArea::Evaluacion,
            weight: 1.0,
        },
    );
    modules.insert(
        ModuleId("colaboracion_docente".to_string()),
        ModuleConfig {
            area: TransformationArea::TrabajoDocente,
            weight: 1.0,
        },
    );

    // Every area is declared even where no module feeds it yet; those stay
    // undetermined in summaries instead of silently scoring zero.
    let areas = TransformationArea::ordered()
        .into_iter()
        .map(|area| (area, AreaConfig::default()))
        .collect();

    ScoringConfig {
        indicators,
        modules,
        areas,
        context,
    }
}

/// Three classrooms of the same network, strongest to weakest.
pub fn sample_cohort() -> Vec<(ScoringContext, Vec<AssessmentResponse>)> {
    let year = TransformationYear::Year2;

    vec![
        (
            ScoringContext {
                grade: GradeLevel::TerceroBasico,
                year,
            },
            vec![
                coverage("plan_personal_activo", true),
                frequency("sesiones_tutoria", 3.0, FrequencyUnit::Semana),
                depth("uso_datos_estudiante", 3),
                coverage("proyectos_interdisciplinarios", true),
                frequency("exhibiciones_aprendizaje", 4.0, FrequencyUnit::Semestre),
                frequency("retroalimentacion_ciclos", 6.0, FrequencyUnit::Mes),
                depth("rubricas_competencias", 2),
                coverage("observacion_entre_pares", true),
                frequency("codiseno_semanal", 2.0, FrequencyUnit::Semana),
            ],
        ),
        (
            ScoringContext {
                grade: GradeLevel::QuintoBasico,
                year,
            },
            vec![
                coverage("plan_personal_activo", true),
                frequency("sesiones_tutoria", 1.0, FrequencyUnit::Semana),
                coverage("proyectos_interdisciplinarios", false),
                frequency("retroalimentacion_ciclos", 2.0, FrequencyUnit::Mes),
                depth("rubricas_competencias", 1),
                coverage("observacion_entre_pares", false),
            ],
        ),
        (
            ScoringContext {
                grade: GradeLevel::PrimeroMedio,
                year,
            },
            vec![
                coverage("plan_personal_activo", false),
                frequency("sesiones_tutoria", 0.0, FrequencyUnit::Semana),
                depth("uso_datos_estudiante", 0),
                coverage("proyectos_interdisciplinarios", false),
                frequency("exhibiciones_aprendizaje", 1.0, FrequencyUnit::Anio),
                depth("rubricas_competencias", 0),
                coverage("observacion_entre_pares", false),
                frequency("codiseno_semanal", 1.0, FrequencyUnit::Mes),
            ],
        ),
    ]
}

fn level_curve(points: &[(TransformationYear, MaturityLevel)], tolerance: u8) -> YearExpectations {
    YearExpectations {
        by_year: points
            .iter()
            .map(|&(year, level)| (year, ExpectedOutcome::Level(level)))
            .collect(),
        tolerance,
    }
}

fn cadence_curve(
    points: &[(TransformationYear, f64, FrequencyUnit)],
    tolerance: u8,
) -> YearExpectations {
    YearExpectations {
        by_year: points
            .iter()
            .map(|&(year, value, unit)| (year, ExpectedOutcome::Frequency { value, unit }))
            .collect(),
        tolerance,
    }
}

fn coverage(indicator: &str, covered: bool) -> AssessmentResponse {
    AssessmentResponse {
        indicator: IndicatorId(indicator.to_string()),
        category: IndicatorCategory::Cobertura,
        value: RawValue::Coverage(covered),
    }
}

fn frequency(indicator: &str, value: f64, unit: FrequencyUnit) -> AssessmentResponse {
    AssessmentResponse {
        indicator: IndicatorId(indicator.to_string()),
        category: IndicatorCategory::Frecuencia,
        value: RawValue::Frequency {
            value,
            unit: Some(unit),
        },
    }
}

fn depth(indicator: &str, level: u8) -> AssessmentResponse {
    AssessmentResponse {
        indicator: IndicatorId(indicator.to_string()),
        category: IndicatorCategory::Profundidad,
        value: RawValue::Depth(level),
    }
}

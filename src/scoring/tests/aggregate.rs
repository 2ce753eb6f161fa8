use std::collections::BTreeMap;

use super::common::*;
use crate::scoring::aggregate::{mean, weighted_mean, WeightedScore};
use crate::scoring::{AreaConfig, MaturityLevel, ModuleConfig, ScoringConfig, TransformationArea};

#[test]
fn module_average_is_the_arithmetic_mean() {
    let engine = engine(base_config());
    let summary = engine
        .score(&typical_responses(), generated_at())
        .expect("responses score");

    let aula = module_score(&summary, "practicas_aula");
    assert_eq!(aula.average_score, Some(75.0));
    assert_eq!(aula.indicator_count, 2);

    let equipo = module_score(&summary, "practicas_equipo");
    assert_eq!(equipo.average_score, Some(37.5));
    assert_eq!(equipo.indicator_count, 2);
}

#[test]
fn module_without_responses_stays_undetermined() {
    let engine = engine(base_config());
    let summary = engine
        .score(&typical_responses(), generated_at())
        .expect("responses score");

    let vacio = module_score(&summary, "modulo_vacio");
    assert_eq!(vacio.average_score, None);
    assert_eq!(vacio.indicator_count, 0);

    let evaluacion = area_score(&summary, TransformationArea::Evaluacion);
    assert_eq!(evaluacion.actual_score, None);
    assert_eq!(evaluacion.actual_level, None);
    assert_eq!(evaluacion.gap, None);
}

#[test]
fn area_levels_follow_the_quarter_scale() {
    let engine = engine(base_config());
    let summary = engine
        .score(&typical_responses(), generated_at())
        .expect("responses score");

    let personalizacion = area_score(&summary, TransformationArea::Personalizacion);
    assert_eq!(personalizacion.actual_score, Some(75.0));
    assert_eq!(personalizacion.actual_level, Some(MaturityLevel::Advanced));

    let docente = area_score(&summary, TransformationArea::TrabajoDocente);
    assert_eq!(docente.actual_score, Some(37.5));
    assert_eq!(docente.actual_level, Some(MaturityLevel::Emerging));
}

#[test]
fn undetermined_modules_drop_out_of_area_means() {
    let mut config = base_config();
    config.indicators.clear();
    config.modules.clear();
    config.areas.clear();

    config.modules.insert(
        module_id("alto"),
        ModuleConfig {
            area: TransformationArea::Personalizacion,
            weight: 2.0,
        },
    );
    config
        .modules
        .insert(module_id("medio"), standard_module(TransformationArea::Personalizacion));
    config
        .modules
        .insert(module_id("bajo"), standard_module(TransformationArea::Personalizacion));
    config
        .indicators
        .insert(indicator_id("ind_alto"), bounded_indicator("alto", 0.0, 10.0));
    config
        .indicators
        .insert(indicator_id("ind_medio"), bounded_indicator("medio", 0.0, 10.0));
    config
        .indicators
        .insert(indicator_id("ind_bajo"), bounded_indicator("bajo", 0.0, 10.0));
    config
        .areas
        .insert(TransformationArea::Personalizacion, AreaConfig::default());

    // `medio` never answers; its weight must leave the denominator too.
    let responses = vec![
        frequency_response("ind_alto", 8.0, None),
        frequency_response("ind_bajo", 4.0, None),
    ];

    let engine = engine(config);
    let summary = engine.score(&responses, generated_at()).expect("responses score");

    let area = area_score(&summary, TransformationArea::Personalizacion);
    assert_eq!(area.actual_score, Some(66.67));
    assert_eq!(area.actual_level, Some(MaturityLevel::Developing));
    assert_eq!(summary.overall_score, Some(66.67));
}

#[test]
fn overall_weights_areas_and_skips_empty_ones() {
    let mut indicators = BTreeMap::new();
    indicators.insert(indicator_id("cobertura_total"), plain_indicator("modulo_a"));
    indicators.insert(
        indicator_id("frecuencia_media"),
        bounded_indicator("modulo_b", 0.0, 10.0),
    );
    indicators.insert(indicator_id("sin_datos"), plain_indicator("modulo_c"));

    let mut modules = BTreeMap::new();
    modules.insert(
        module_id("modulo_a"),
        standard_module(TransformationArea::Personalizacion),
    );
    modules.insert(
        module_id("modulo_b"),
        standard_module(TransformationArea::Aprendizaje),
    );
    modules.insert(
        module_id("modulo_c"),
        standard_module(TransformationArea::Evaluacion),
    );

    let mut areas = BTreeMap::new();
    areas.insert(TransformationArea::Personalizacion, AreaConfig::default());
    areas.insert(TransformationArea::Aprendizaje, AreaConfig { weight: 3.0 });
    areas.insert(TransformationArea::Evaluacion, AreaConfig::default());

    let config = ScoringConfig {
        indicators,
        modules,
        areas,
        context: context(),
    };

    let responses = vec![
        coverage_response("cobertura_total", true),
        frequency_response("frecuencia_media", 6.0, None),
    ];

    let engine = engine(config);
    let summary = engine.score(&responses, generated_at()).expect("responses score");

    // (100 * 1 + 60 * 3) / 4, with the empty Evaluación area excluded.
    assert_eq!(summary.overall_score, Some(70.0));
    assert_eq!(summary.overall_level, Some(MaturityLevel::Developing));
}

#[test]
fn empty_run_is_fully_undetermined() {
    let engine = engine(base_config());
    let summary = engine.score(&[], generated_at()).expect("empty run scores");

    assert!(summary.indicator_scores.is_empty());
    assert_eq!(summary.overall_score, None);
    assert_eq!(summary.overall_level, None);
    assert!(summary
        .module_scores
        .iter()
        .all(|module| module.average_score.is_none()));
    assert!(summary
        .area_scores
        .iter()
        .all(|area| area.actual_score.is_none() && area.gap.is_none()));
    assert_eq!(summary.context, context());
    assert_eq!(summary.generated_at, generated_at());
}

#[test]
fn means_ignore_nothing_but_emptiness() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[2.0, 1.0]), Some(1.5));
    assert_eq!(mean(&[100.0, 100.0, 0.0]), Some(66.67));

    assert_eq!(weighted_mean(&[]), None);
    assert_eq!(
        weighted_mean(&[
            WeightedScore {
                score: 80.0,
                weight: 2.0,
            },
            WeightedScore {
                score: 40.0,
                weight: 1.0,
            },
        ]),
        Some(66.67)
    );
    assert_eq!(
        weighted_mean(&[WeightedScore {
            score: 50.0,
            weight: 0.0,
        }]),
        None
    );
}

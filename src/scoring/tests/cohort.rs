use super::common::*;
use crate::scoring::{
    aggregate_gaps, aggregate_scores, AreaScore, AssessmentSummary, GapAnalysis, GapTally,
    MaturityLevel, ModuleGapReport, TransformationArea,
};

fn reported_area(area: TransformationArea, score: f64, level: MaturityLevel) -> AreaScore {
    AreaScore {
        area,
        actual_score: Some(score),
        actual_level: Some(level),
        gap: None,
    }
}

fn silent_area(area: TransformationArea) -> AreaScore {
    AreaScore {
        area,
        actual_score: None,
        actual_level: None,
        gap: None,
    }
}

fn summary_with(
    overall: Option<(f64, MaturityLevel)>,
    area_scores: Vec<AreaScore>,
) -> AssessmentSummary {
    AssessmentSummary {
        overall_score: overall.map(|(score, _)| score),
        overall_level: overall.map(|(_, level)| level),
        indicator_scores: Vec::new(),
        module_scores: Vec::new(),
        area_scores,
        context: context(),
        generated_at: generated_at(),
    }
}

fn module_report(
    module: &str,
    area: TransformationArea,
    average_gap: Option<f64>,
    tally: GapTally,
) -> ModuleGapReport {
    ModuleGapReport {
        module: module_id(module),
        area,
        indicators: Vec::new(),
        tally,
        average_gap,
    }
}

fn analysis_with(
    average_gap: Option<f64>,
    modules: Vec<ModuleGapReport>,
    critical: Vec<&str>,
) -> GapAnalysis {
    let mut tally = GapTally::default();
    for module in &modules {
        tally.merge(&module.tally);
    }
    GapAnalysis {
        context: context(),
        modules,
        tally,
        average_gap,
        critical: critical.into_iter().map(indicator_id).collect(),
        behind: Vec::new(),
    }
}

#[test]
fn overall_averages_skip_undetermined_runs() {
    let summaries = vec![
        summary_with(Some((80.0, MaturityLevel::Advanced)), Vec::new()),
        summary_with(Some((60.0, MaturityLevel::Developing)), Vec::new()),
        summary_with(None, Vec::new()),
    ];

    let cohort = aggregate_scores(&summaries);
    assert_eq!(cohort.instances, 3);

    let overall = cohort.overall.expect("two runs produced scores");
    assert_eq!(overall.average_score, 70.0);
    assert_eq!(overall.average_level, 2.5);
    assert_eq!(overall.instances, 2);
}

#[test]
fn area_averages_cover_only_reporting_areas() {
    let summaries = vec![
        summary_with(
            Some((60.0, MaturityLevel::Developing)),
            vec![
                reported_area(TransformationArea::Personalizacion, 80.0, MaturityLevel::Advanced),
                reported_area(TransformationArea::Evaluacion, 40.0, MaturityLevel::Emerging),
                silent_area(TransformationArea::TrabajoDocente),
            ],
        ),
        summary_with(
            Some((60.0, MaturityLevel::Developing)),
            vec![
                reported_area(
                    TransformationArea::Personalizacion,
                    60.0,
                    MaturityLevel::Developing,
                ),
                silent_area(TransformationArea::TrabajoDocente),
            ],
        ),
    ];

    let cohort = aggregate_scores(&summaries);

    let personalizacion = &cohort.by_area[&TransformationArea::Personalizacion];
    assert_eq!(personalizacion.average_score, 70.0);
    assert_eq!(personalizacion.average_level, 2.5);
    assert_eq!(personalizacion.instances, 2);

    let evaluacion = &cohort.by_area[&TransformationArea::Evaluacion];
    assert_eq!(evaluacion.average_score, 40.0);
    assert_eq!(evaluacion.instances, 1);

    // An area nobody scored never shows up as a zero.
    assert!(!cohort
        .by_area
        .contains_key(&TransformationArea::TrabajoDocente));
}

#[test]
fn empty_cohort_has_no_averages() {
    let cohort = aggregate_scores(&[]);
    assert_eq!(cohort.instances, 0);
    assert!(cohort.by_area.is_empty());
    assert_eq!(cohort.overall, None);
}

#[test]
fn gap_overview_merges_runs_weighing_schools_equally() {
    let behind_tally = GapTally {
        total: 2,
        on_track: 1,
        behind: 1,
        ..GapTally::default()
    };
    let critical_tally = GapTally {
        total: 2,
        ahead: 1,
        critical: 1,
        ..GapTally::default()
    };

    let analyses = vec![
        analysis_with(
            Some(-1.0),
            vec![
                module_report(
                    "tutoria",
                    TransformationArea::Personalizacion,
                    Some(-1.0),
                    behind_tally,
                ),
                module_report(
                    "rubricas",
                    TransformationArea::Evaluacion,
                    Some(-2.0),
                    critical_tally,
                ),
            ],
            vec!["rubricas_nivel"],
        ),
        analysis_with(
            Some(-2.0),
            vec![module_report(
                "tutoria",
                TransformationArea::Personalizacion,
                Some(-2.0),
                critical_tally,
            )],
            vec!["rubricas_nivel", "tutoria_activa"],
        ),
    ];

    let overview = aggregate_gaps(&analyses);
    assert_eq!(overview.instances, 2);

    // Each run contributes its own mean, so school size does not matter.
    assert_eq!(overview.average_gap, Some(-1.5));

    assert_eq!(overview.tally.total, 6);
    assert_eq!(overview.tally.on_track, 1);
    assert_eq!(overview.tally.behind, 1);
    assert_eq!(overview.tally.ahead, 2);
    assert_eq!(overview.tally.critical, 2);

    let personalizacion = &overview.by_area[&TransformationArea::Personalizacion];
    assert_eq!(personalizacion.average_gap, Some(-1.5));
    assert_eq!(personalizacion.tally.total, 4);

    let evaluacion = &overview.by_area[&TransformationArea::Evaluacion];
    assert_eq!(evaluacion.average_gap, Some(-2.0));
    assert_eq!(evaluacion.tally.critical, 1);

    assert_eq!(overview.top_critical.len(), 2);
    assert_eq!(
        overview.top_critical[0].indicator,
        indicator_id("rubricas_nivel")
    );
    assert_eq!(overview.top_critical[0].count, 2);
    assert_eq!(
        overview.top_critical[1].indicator,
        indicator_id("tutoria_activa")
    );
    assert_eq!(overview.top_critical[1].count, 1);
}

#[test]
fn runs_without_level_gaps_still_count_toward_tallies() {
    let not_configured = GapTally {
        total: 1,
        not_configured: 1,
        ..GapTally::default()
    };
    let analyses = vec![
        analysis_with(
            Some(-1.0),
            vec![module_report(
                "tutoria",
                TransformationArea::Personalizacion,
                Some(-1.0),
                GapTally {
                    total: 1,
                    behind: 1,
                    ..GapTally::default()
                },
            )],
            Vec::new(),
        ),
        analysis_with(
            None,
            vec![module_report(
                "observacion",
                TransformationArea::TrabajoDocente,
                None,
                not_configured,
            )],
            Vec::new(),
        ),
    ];

    let overview = aggregate_gaps(&analyses);
    assert_eq!(overview.average_gap, Some(-1.0));
    assert_eq!(overview.tally.total, 2);
    assert_eq!(overview.tally.not_configured, 1);

    let docente = &overview.by_area[&TransformationArea::TrabajoDocente];
    assert_eq!(docente.average_gap, None);
    assert_eq!(docente.tally.not_configured, 1);
}

#[test]
fn critical_ranking_breaks_count_ties_by_identifier() {
    let analyses = vec![
        analysis_with(None, Vec::new(), vec!["beta", "alfa", "gama"]),
        analysis_with(None, Vec::new(), vec!["beta", "alfa"]),
    ];

    let overview = aggregate_gaps(&analyses);
    let order: Vec<_> = overview
        .top_critical
        .iter()
        .map(|entry| (entry.indicator.clone(), entry.count))
        .collect();
    assert_eq!(
        order,
        vec![
            (indicator_id("alfa"), 2),
            (indicator_id("beta"), 2),
            (indicator_id("gama"), 1),
        ]
    );
}

#[test]
fn critical_list_is_capped_at_ten() {
    let ids: Vec<String> = (1..=12).map(|i| format!("indicador_{i:02}")).collect();
    let critical: Vec<&str> = ids.iter().map(String::as_str).collect();
    let analyses = vec![analysis_with(None, Vec::new(), critical)];

    let overview = aggregate_gaps(&analyses);
    assert_eq!(overview.top_critical.len(), 10);
    assert_eq!(
        overview.top_critical[0].indicator,
        indicator_id("indicador_01")
    );
    assert_eq!(
        overview.top_critical[9].indicator,
        indicator_id("indicador_10")
    );
}

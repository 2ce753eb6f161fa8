use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{mean, AssessmentSummary};
use super::domain::{IndicatorId, TransformationArea};
use super::gap::{GapAnalysis, GapTally};

const TOP_CRITICAL_LIMIT: usize = 10;

/// Mean score and mean numeric level over the runs that produced data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreAverages {
    pub average_score: f64,
    pub average_level: f64,
    pub instances: usize,
}

/// Network-level score aggregation across independent assessment runs.
/// Areas that never produced a determined score are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortScores {
    pub by_area: BTreeMap<TransformationArea, ScoreAverages>,
    pub overall: Option<ScoreAverages>,
    pub instances: usize,
}

#[derive(Default)]
struct Samples {
    scores: Vec<f64>,
    levels: Vec<f64>,
}

impl Samples {
    fn push(&mut self, score: f64, level_index: u8) {
        self.scores.push(score);
        self.levels.push(f64::from(level_index));
    }

    fn averages(&self) -> Option<ScoreAverages> {
        Some(ScoreAverages {
            average_score: mean(&self.scores)?,
            average_level: mean(&self.levels)?,
            instances: self.scores.len(),
        })
    }
}

/// Average the determined area and overall scores of many runs.
pub fn aggregate_scores(summaries: &[AssessmentSummary]) -> CohortScores {
    let mut per_area: BTreeMap<TransformationArea, Samples> = BTreeMap::new();
    let mut overall = Samples::default();

    for summary in summaries {
        for area_score in &summary.area_scores {
            if let (Some(score), Some(level)) = (area_score.actual_score, area_score.actual_level)
            {
                per_area
                    .entry(area_score.area)
                    .or_default()
                    .push(score, level.index());
            }
        }
        if let (Some(score), Some(level)) = (summary.overall_score, summary.overall_level) {
            overall.push(score, level.index());
        }
    }

    let by_area = per_area
        .iter()
        .filter_map(|(area, samples)| Some((*area, samples.averages()?)))
        .collect();

    CohortScores {
        by_area,
        overall: overall.averages(),
        instances: summaries.len(),
    }
}

/// Combined gap picture for one area across a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGapRollup {
    pub average_gap: Option<f64>,
    pub tally: GapTally,
}

/// How often one indicator came out critical across a cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalIndicatorCount {
    pub indicator: IndicatorId,
    pub count: usize,
}

/// Network-level gap aggregation across independent runs, including the
/// indicators most often flagged critical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortGapOverview {
    pub by_area: BTreeMap<TransformationArea, AreaGapRollup>,
    pub average_gap: Option<f64>,
    pub tally: GapTally,
    pub instances: usize,
    pub top_critical: Vec<CriticalIndicatorCount>,
}

/// Merge many per-run gap analyses into a cohort overview. Per-area means
/// average the contributing module means; the overall mean averages the
/// per-run means, so a small school counts as much as a large one.
pub fn aggregate_gaps(analyses: &[GapAnalysis]) -> CohortGapOverview {
    let mut area_gaps: BTreeMap<TransformationArea, Vec<f64>> = BTreeMap::new();
    let mut area_tallies: BTreeMap<TransformationArea, GapTally> = BTreeMap::new();
    let mut run_gaps = Vec::new();
    let mut tally = GapTally::default();
    let mut critical_counts: BTreeMap<IndicatorId, usize> = BTreeMap::new();

    for analysis in analyses {
        if let Some(gap) = analysis.average_gap {
            run_gaps.push(gap);
        }
        tally.merge(&analysis.tally);

        for module in &analysis.modules {
            if let Some(gap) = module.average_gap {
                area_gaps.entry(module.area).or_default().push(gap);
            }
            area_tallies
                .entry(module.area)
                .or_default()
                .merge(&module.tally);
        }

        for indicator in &analysis.critical {
            *critical_counts.entry(indicator.clone()).or_insert(0) += 1;
        }
    }

    let by_area = area_tallies
        .into_iter()
        .map(|(area, area_tally)| {
            let gaps = area_gaps.remove(&area).unwrap_or_default();
            (
                area,
                AreaGapRollup {
                    average_gap: mean(&gaps),
                    tally: area_tally,
                },
            )
        })
        .collect();

    let mut top_critical: Vec<CriticalIndicatorCount> = critical_counts
        .into_iter()
        .map(|(indicator, count)| CriticalIndicatorCount { indicator, count })
        .collect();
    top_critical.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.indicator.cmp(&b.indicator))
    });
    top_critical.truncate(TOP_CRITICAL_LIMIT);

    CohortGapOverview {
        by_area,
        average_gap: mean(&run_gaps),
        tally,
        instances: analyses.len(),
        top_critical,
    }
}

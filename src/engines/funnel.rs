// Funnel & Scaleup Engine
// Stage-by-stage funnel populations, percentages and conversion rates per
// region. The five-stage ordering is an externally visible contract.

use crate::model::{percentage, CompanyRecord, STAGE_COUNT, STAGE_NAMES};

/// One funnel stage for one region. Percentages are full precision here;
/// rounding to one decimal happens at export time only.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStage {
    pub stage: &'static str,
    /// Companies with at least `i` ladder rounds.
    pub count: usize,
    /// Share of the region's funnel population.
    pub percentage: f64,
    /// `count_i / count_(i-1) * 100`. Stage 1 is the entry stage and has
    /// conversion 100 by convention; absent when the previous stage is
    /// empty.
    pub conversion_rate: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct FunnelSummary {
    pub total_global: usize,
    pub total_nl: usize,
    pub total_usa: usize,
}

#[derive(Debug)]
pub struct FunnelOutput {
    pub global: Vec<FunnelStage>,
    pub netherlands: Vec<FunnelStage>,
    pub usa: Option<Vec<FunnelStage>>,
    pub uk: Option<Vec<FunnelStage>>,
    pub germany: Option<Vec<FunnelStage>>,
    pub france: Option<Vec<FunnelStage>>,
    pub sweden: Option<Vec<FunnelStage>>,
    pub summary: FunnelSummary,
    /// Dutch Seed → Series A conversion, the headline scaleup ratio.
    pub dutch_scaleup_ratio: Option<f64>,
}

/// Compute the five-stage funnel over one region's records. The funnel
/// population is the set of companies with at least one ladder round;
/// an empty population yields an empty funnel.
pub fn compute_funnel(records: &[&CompanyRecord]) -> Vec<FunnelStage> {
    let counts: Vec<usize> = (1..=STAGE_COUNT as usize)
        .map(|stage| records.iter().filter(|r| r.round_count() >= stage).count())
        .collect();

    let total = counts[0];
    if total == 0 {
        return Vec::new();
    }

    let mut stages = Vec::with_capacity(counts.len());
    for (i, &count) in counts.iter().enumerate() {
        let conversion_rate = if i == 0 {
            Some(100.0)
        } else {
            percentage(count, counts[i - 1])
        };
        stages.push(FunnelStage {
            stage: STAGE_NAMES[i],
            count,
            percentage: percentage(count, total).unwrap_or(0.0),
            conversion_rate,
        });
    }
    stages
}

fn region<'a>(records: &'a [CompanyRecord], country: &str) -> Vec<&'a CompanyRecord> {
    records.iter().filter(|r| r.country == country).collect()
}

fn optional_funnel(records: &[CompanyRecord], country: &str) -> Option<Vec<FunnelStage>> {
    let funnel = compute_funnel(&region(records, country));
    if funnel.is_empty() {
        None
    } else {
        Some(funnel)
    }
}

fn stage_count(funnel: &[FunnelStage], index: usize) -> usize {
    funnel.get(index).map(|s| s.count).unwrap_or(0)
}

pub fn analyze(records: &[CompanyRecord]) -> FunnelOutput {
    let all: Vec<&CompanyRecord> = records.iter().collect();
    let global = compute_funnel(&all);
    let netherlands = compute_funnel(&region(records, "NLD"));
    let usa = optional_funnel(records, "USA");

    let summary = FunnelSummary {
        total_global: stage_count(&global, 0),
        total_nl: stage_count(&netherlands, 0),
        total_usa: usa.as_deref().map(|f| stage_count(f, 0)).unwrap_or(0),
    };

    let dutch_scaleup_ratio =
        percentage(stage_count(&netherlands, 1), stage_count(&netherlands, 0));

    FunnelOutput {
        global,
        netherlands,
        usa,
        uk: optional_funnel(records, "GBR"),
        germany: optional_funnel(records, "DEU"),
        france: optional_funnel(records, "FRA"),
        sweden: optional_funnel(records, "SWE"),
        summary,
        dutch_scaleup_ratio,
    }
}

// ============================================================================
// TESTS
// ============================================================================

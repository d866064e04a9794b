// Metrics Export
// Builds the JSON documents the presentation layer consumes and publishes
// them atomically. Field names and shapes here are the external contract;
// percentages are rounded to one decimal at this boundary and nowhere else.

use crate::content::{
    self, PolicyEvent, StakeholdersDoc, CRISIS_YEARS, ECB_RATES, PRE_CRISIS_YEARS, RECOVERY_YEARS,
};
use crate::engines::cohort::{CohortSurvivalOutput, IntervalStats, RoundBucket, TimelinePoint};
use crate::engines::funnel::{FunnelOutput, FunnelStage};
use crate::engines::geography::{CategoryMetrics, GeographyOutput};
use crate::model::{CompanyRecord, GroupStats};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Round a percentage to one decimal for the consumer contract.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round1_opt(value: Option<f64>) -> Option<f64> {
    value.map(round1)
}

// ============================================================================
// DOCUMENT SHAPES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OverviewDoc {
    pub total_companies: usize,
    pub dutch_companies: usize,
    pub total_funding: f64,
    pub dutch_total_funding: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dutch_operating_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dutch_avg_rounds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rounds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dutch_scaleup_ratio: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SurvivalDoc {
    pub round_name: &'static str,
    pub global_count: usize,
    pub dutch_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_survival_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dutch_survival_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usa_survival_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uk_survival_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub germany_survival_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub france_survival_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SectorDoc {
    pub sector: String,
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: f64,
    pub dutch_company_count: usize,
    pub dutch_total_funding: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dutch_avg_funding: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TimelineDoc {
    pub year: i32,
    pub company_count: usize,
    pub total_funding: f64,
}

#[derive(Debug, Serialize)]
pub struct OutcomeDoc {
    pub rounds: RoundBucket,
    pub count: usize,
    pub operating: f64,
    pub acquired: f64,
    pub closed: f64,
}

#[derive(Debug, Serialize)]
pub struct PeerDoc {
    pub country: &'static str,
    pub country_name: &'static str,
    pub avg_funding: f64,
    pub operating_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct FunnelStageDoc {
    pub stage: &'static str,
    pub count: usize,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FunnelSummaryDoc {
    pub total_global: usize,
    pub total_nl: usize,
    pub total_usa: usize,
}

#[derive(Debug, Serialize)]
pub struct FunnelComparisonDoc {
    pub global: Vec<FunnelStageDoc>,
    pub netherlands: Vec<FunnelStageDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usa: Option<Vec<FunnelStageDoc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uk: Option<Vec<FunnelStageDoc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub germany: Option<Vec<FunnelStageDoc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub france: Option<Vec<FunnelStageDoc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweden: Option<Vec<FunnelStageDoc>>,
    pub summary: FunnelSummaryDoc,
}

#[derive(Debug, Serialize)]
pub struct CohortDoc {
    pub founded_year: i32,
    pub company_count: usize,
    pub avg_funding: f64,
    pub avg_rounds: f64,
    pub operating_rate: f64,
    pub acquired_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct RegionalDoc {
    pub region: &'static str,
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: f64,
    pub avg_rounds: f64,
    pub operating_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct CategoryMetricsDoc {
    pub count: usize,
    pub acquired_rate: f64,
    pub operating_rate: f64,
    pub closed_rate: f64,
    pub avg_funding: f64,
    pub total_funding: f64,
}

#[derive(Debug, Serialize)]
pub struct DutchCategoriesDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_tech: Option<CategoryMetricsDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital: Option<CategoryMetricsDoc>,
}

#[derive(Debug, Serialize)]
pub struct HeadlineInsightsDoc {
    pub deep_tech_acquisition_advantage: f64,
    pub dutch_vs_global_deep_tech_delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amsterdam_concentration: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TimeToScaleDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_round_pct: Option<f64>,
    pub single_round_count: usize,
    pub multi_round_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_days: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DeepTechAnalysisDoc {
    pub dutch: DutchCategoriesDoc,
    pub headline_insights: HeadlineInsightsDoc,
    pub time_to_scale: TimeToScaleDoc,
}

#[derive(Debug, Serialize)]
pub struct SplitSideDoc {
    #[serde(rename = "DeepTech")]
    pub deep_tech: f64,
    #[serde(rename = "Digital")]
    pub digital: f64,
    #[serde(rename = "Other")]
    pub other: f64,
}

#[derive(Debug, Serialize)]
pub struct SplitDoc {
    pub funding: SplitSideDoc,
    pub companies: SplitSideDoc,
}

#[derive(Debug, Serialize)]
pub struct HubDoc {
    pub city: &'static str,
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: f64,
    pub deep_tech_count: usize,
    pub deep_tech_funding: f64,
    pub deep_tech_intensity_count: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_tech_intensity_funding: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CityDoc {
    pub city: String,
    pub province: String,
    pub company_count: usize,
    pub total_funding: f64,
    pub deep_tech_count: usize,
    pub deep_tech_funding: f64,
    pub deep_tech_intensity: f64,
}

#[derive(Debug, Serialize)]
pub struct ProvinceDoc {
    pub province: &'static str,
    pub company_count: usize,
    pub total_funding: f64,
    pub deep_tech_count: usize,
    pub deep_tech_funding: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_tech_intensity: Option<f64>,
    pub highlight: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StrategicAnalysisDoc {
    pub split: SplitDoc,
    pub hubs: Vec<HubDoc>,
    pub all_cities: Vec<CityDoc>,
    pub provinces: Vec<ProvinceDoc>,
}

#[derive(Debug, Serialize)]
pub struct IntervalStatsDoc {
    pub company_count: usize,
    pub median_months: f64,
    pub mean_months: f64,
}

#[derive(Debug, Serialize)]
pub struct CountryIntervalsDoc {
    pub country: &'static str,
    pub country_name: &'static str,
    pub median_months: f64,
    pub mean_months: f64,
    pub company_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TimeBetweenRoundsDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<IntervalStatsDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dutch: Option<IntervalStatsDoc>,
    pub by_country: Vec<CountryIntervalsDoc>,
}

#[derive(Debug, Serialize)]
pub struct EcbRateDoc {
    pub year: i32,
    pub ecb_rate: f64,
    pub dutch_funding_m: f64,
    pub period: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExternalFactorsSummaryDoc {
    pub insight: &'static str,
    pub pre_crisis_funding: String,
    pub crisis_funding: String,
    pub recovery_funding: String,
    pub crisis_drop_pct: f64,
}

#[derive(Debug, Serialize)]
pub struct ExternalFactorsDoc {
    pub ecb_rates: Vec<EcbRateDoc>,
    pub policy_timeline: Vec<PolicyEvent>,
    pub summary: ExternalFactorsSummaryDoc,
}

/// The full set of published documents.
#[derive(Debug, Serialize)]
pub struct Documents {
    pub overview: OverviewDoc,
    pub survival: Vec<SurvivalDoc>,
    pub sectors: Vec<SectorDoc>,
    pub timeline: Vec<TimelineDoc>,
    pub outcomes: Vec<OutcomeDoc>,
    pub peers: Vec<PeerDoc>,
    pub funnel_comparison: FunnelComparisonDoc,
    pub cohorts: Vec<CohortDoc>,
    pub regional: Vec<RegionalDoc>,
    pub deep_tech_analysis: DeepTechAnalysisDoc,
    pub strategic_analysis: StrategicAnalysisDoc,
    pub time_between_rounds: TimeBetweenRoundsDoc,
    pub external_factors: ExternalFactorsDoc,
    pub stakeholders: StakeholdersDoc,
}

// ============================================================================
// DOCUMENT ASSEMBLY
// ============================================================================

pub fn build_documents(
    records: &[CompanyRecord],
    cohort: &CohortSurvivalOutput,
    funnel: &FunnelOutput,
    geography: &GeographyOutput,
) -> Documents {
    Documents {
        overview: overview_doc(records, funnel.dutch_scaleup_ratio),
        survival: cohort
            .survival
            .iter()
            .map(|row| SurvivalDoc {
                round_name: row.round_name,
                global_count: row.global_count,
                dutch_count: row.dutch_count,
                global_survival_rate: round1_opt(row.global_survival_rate),
                dutch_survival_rate: round1_opt(row.dutch_survival_rate),
                usa_survival_rate: round1_opt(row.usa_survival_rate),
                uk_survival_rate: round1_opt(row.uk_survival_rate),
                germany_survival_rate: round1_opt(row.germany_survival_rate),
                france_survival_rate: round1_opt(row.france_survival_rate),
            })
            .collect(),
        sectors: geography
            .sectors
            .iter()
            .map(|s| SectorDoc {
                sector: s.sector.clone(),
                company_count: s.company_count,
                total_funding: s.total_funding,
                avg_funding: s.avg_funding,
                dutch_company_count: s.dutch_company_count,
                dutch_total_funding: s.dutch_total_funding,
                dutch_avg_funding: s.dutch_avg_funding,
            })
            .collect(),
        timeline: cohort
            .timeline
            .iter()
            .map(|p| TimelineDoc {
                year: p.year,
                company_count: p.company_count,
                total_funding: p.total_funding,
            })
            .collect(),
        outcomes: cohort
            .outcomes
            .iter()
            .map(|row| OutcomeDoc {
                rounds: row.bucket,
                count: row.count,
                operating: round1(row.operating),
                acquired: round1(row.acquired),
                closed: round1(row.closed),
            })
            .collect(),
        peers: geography
            .peers
            .iter()
            .map(|p| PeerDoc {
                country: p.country,
                country_name: p.country_name,
                avg_funding: p.stats.avg_funding.unwrap_or(0.0),
                operating_rate: round1(p.stats.operating_rate.unwrap_or(0.0)),
            })
            .collect(),
        funnel_comparison: funnel_comparison_doc(funnel),
        cohorts: cohort
            .cohorts
            .iter()
            .map(|c| CohortDoc {
                founded_year: c.founded_year,
                company_count: c.company_count,
                avg_funding: c.avg_funding,
                avg_rounds: c.avg_rounds,
                operating_rate: round1(c.operating_rate),
                acquired_rate: round1(c.acquired_rate),
            })
            .collect(),
        regional: geography
            .regional
            .iter()
            .map(|r| RegionalDoc {
                region: r.region,
                company_count: r.stats.company_count,
                total_funding: r.stats.total_funding,
                avg_funding: r.stats.avg_funding.unwrap_or(0.0),
                avg_rounds: r.stats.avg_rounds.unwrap_or(0.0),
                operating_rate: round1(r.stats.operating_rate.unwrap_or(0.0)),
            })
            .collect(),
        deep_tech_analysis: deep_tech_doc(geography),
        strategic_analysis: strategic_doc(geography),
        time_between_rounds: time_between_rounds_doc(cohort),
        external_factors: external_factors_doc(&cohort.dutch_timeline),
        stakeholders: content::stakeholders(),
    }
}

fn overview_doc(records: &[CompanyRecord], dutch_scaleup_ratio: Option<f64>) -> OverviewDoc {
    let all = GroupStats::collect(records.iter());
    let dutch = GroupStats::collect(records.iter().filter(|r| r.is_dutch()));
    OverviewDoc {
        total_companies: all.company_count,
        dutch_companies: dutch.company_count,
        total_funding: all.total_funding,
        dutch_total_funding: dutch.total_funding,
        dutch_operating_rate: round1_opt(dutch.operating_rate),
        dutch_avg_rounds: dutch.avg_rounds.map(|v| round1(v)),
        avg_rounds: all.avg_rounds.map(|v| round1(v)),
        operating_rate: round1_opt(all.operating_rate),
        dutch_scaleup_ratio: round1_opt(dutch_scaleup_ratio),
    }
}

fn funnel_stages_doc(stages: &[FunnelStage]) -> Vec<FunnelStageDoc> {
    stages
        .iter()
        .map(|s| FunnelStageDoc {
            stage: s.stage,
            count: s.count,
            percentage: round1(s.percentage),
            conversion_rate: round1_opt(s.conversion_rate),
        })
        .collect()
}

fn funnel_comparison_doc(funnel: &FunnelOutput) -> FunnelComparisonDoc {
    FunnelComparisonDoc {
        global: funnel_stages_doc(&funnel.global),
        netherlands: funnel_stages_doc(&funnel.netherlands),
        usa: funnel.usa.as_deref().map(funnel_stages_doc),
        uk: funnel.uk.as_deref().map(funnel_stages_doc),
        germany: funnel.germany.as_deref().map(funnel_stages_doc),
        france: funnel.france.as_deref().map(funnel_stages_doc),
        sweden: funnel.sweden.as_deref().map(funnel_stages_doc),
        summary: FunnelSummaryDoc {
            total_global: funnel.summary.total_global,
            total_nl: funnel.summary.total_nl,
            total_usa: funnel.summary.total_usa,
        },
    }
}

fn category_metrics_doc(metrics: &CategoryMetrics) -> CategoryMetricsDoc {
    CategoryMetricsDoc {
        count: metrics.count,
        acquired_rate: round1(metrics.acquired_rate),
        operating_rate: round1(metrics.operating_rate),
        closed_rate: round1(metrics.closed_rate),
        avg_funding: metrics.avg_funding,
        total_funding: metrics.total_funding,
    }
}

fn deep_tech_doc(geography: &GeographyOutput) -> DeepTechAnalysisDoc {
    DeepTechAnalysisDoc {
        dutch: DutchCategoriesDoc {
            deep_tech: geography
                .dutch_breakdown
                .deep_tech
                .as_ref()
                .map(category_metrics_doc),
            digital: geography
                .dutch_breakdown
                .digital
                .as_ref()
                .map(category_metrics_doc),
        },
        headline_insights: HeadlineInsightsDoc {
            deep_tech_acquisition_advantage: round1(
                geography.headline.deep_tech_acquisition_advantage,
            ),
            dutch_vs_global_deep_tech_delta: round1(
                geography.headline.dutch_vs_global_deep_tech_delta,
            ),
            amsterdam_concentration: round1_opt(geography.headline.amsterdam_concentration),
        },
        time_to_scale: TimeToScaleDoc {
            single_round_pct: round1_opt(geography.time_to_scale.single_round_pct),
            single_round_count: geography.time_to_scale.single_round_count,
            multi_round_count: geography.time_to_scale.multi_round_count,
            avg_days: geography.time_to_scale.avg_days.map(|d| d.round()),
            median_days: geography.time_to_scale.median_days.map(|d| d.round()),
        },
    }
}

fn strategic_doc(geography: &GeographyOutput) -> StrategicAnalysisDoc {
    StrategicAnalysisDoc {
        split: SplitDoc {
            funding: SplitSideDoc {
                deep_tech: geography.split.deep_tech_funding,
                digital: geography.split.digital_funding,
                other: geography.split.other_funding,
            },
            companies: SplitSideDoc {
                deep_tech: geography.split.deep_tech_companies as f64,
                digital: geography.split.digital_companies as f64,
                other: geography.split.other_companies as f64,
            },
        },
        hubs: geography
            .hubs
            .iter()
            .map(|h| HubDoc {
                city: h.city,
                company_count: h.company_count,
                total_funding: h.total_funding,
                avg_funding: h.avg_funding,
                deep_tech_count: h.deep_tech_count,
                deep_tech_funding: h.deep_tech_funding,
                deep_tech_intensity_count: round1(h.deep_tech_intensity_count),
                deep_tech_intensity_funding: round1_opt(h.deep_tech_intensity_funding),
            })
            .collect(),
        all_cities: geography
            .cities
            .iter()
            .map(|c| CityDoc {
                city: c.city.clone(),
                province: c.province.clone(),
                company_count: c.company_count,
                total_funding: c.total_funding,
                deep_tech_count: c.deep_tech_count,
                deep_tech_funding: c.deep_tech_funding,
                deep_tech_intensity: round1(c.deep_tech_intensity),
            })
            .collect(),
        provinces: geography
            .provinces
            .iter()
            .map(|p| ProvinceDoc {
                province: p.province,
                company_count: p.company_count,
                total_funding: p.total_funding,
                deep_tech_count: p.deep_tech_count,
                deep_tech_funding: p.deep_tech_funding,
                deep_tech_intensity: round1_opt(p.deep_tech_intensity),
                highlight: p.highlight,
            })
            .collect(),
    }
}

fn interval_doc(stats: &IntervalStats) -> IntervalStatsDoc {
    IntervalStatsDoc {
        company_count: stats.company_count,
        median_months: round1(stats.median_months),
        mean_months: round1(stats.mean_months),
    }
}

fn time_between_rounds_doc(cohort: &CohortSurvivalOutput) -> TimeBetweenRoundsDoc {
    let tbr = &cohort.time_between_rounds;
    TimeBetweenRoundsDoc {
        global: tbr.global.as_ref().map(interval_doc),
        dutch: tbr.dutch.as_ref().map(interval_doc),
        by_country: tbr
            .by_country
            .iter()
            .map(|c| CountryIntervalsDoc {
                country: c.country,
                country_name: c.country_name,
                median_months: round1(c.stats.median_months),
                mean_months: round1(c.stats.mean_months),
                company_count: c.stats.company_count,
            })
            .collect(),
    }
}

/// Display format for period funding totals, e.g. "$513M" or "$1.4B".
fn format_funding(total: f64) -> String {
    if total >= 1e9 {
        format!("${:.1}B", total / 1e9)
    } else {
        format!("${:.0}M", total / 1e6)
    }
}

fn period_funding(timeline: &[TimelinePoint], years: (i32, i32)) -> f64 {
    timeline
        .iter()
        .filter(|p| p.year >= years.0 && p.year <= years.1)
        .map(|p| p.total_funding)
        .sum()
}

fn external_factors_doc(dutch_timeline: &[TimelinePoint]) -> ExternalFactorsDoc {
    let funding_for = |year: i32| -> f64 {
        dutch_timeline
            .iter()
            .find(|p| p.year == year)
            .map(|p| p.total_funding)
            .unwrap_or(0.0)
    };

    let pre_crisis = period_funding(dutch_timeline, PRE_CRISIS_YEARS);
    let crisis = period_funding(dutch_timeline, CRISIS_YEARS);
    let recovery = period_funding(dutch_timeline, RECOVERY_YEARS);
    let crisis_drop_pct = if pre_crisis > 0.0 {
        round1((pre_crisis - crisis) / pre_crisis * 100.0)
    } else {
        0.0
    };

    ExternalFactorsDoc {
        ecb_rates: ECB_RATES
            .iter()
            .map(|&(year, rate, period)| EcbRateDoc {
                year,
                ecb_rate: rate,
                dutch_funding_m: round1(funding_for(year) / 1e6),
                period,
            })
            .collect(),
        policy_timeline: content::policy_timeline(),
        summary: ExternalFactorsSummaryDoc {
            insight: content::EXTERNAL_FACTORS_INSIGHT,
            pre_crisis_funding: format_funding(pre_crisis),
            crisis_funding: format_funding(crisis),
            recovery_funding: format_funding(recovery),
            crisis_drop_pct,
        },
    }
}

// ============================================================================
// ATOMIC PUBLISH
// ============================================================================

const FILE_NAMES: [&str; 14] = [
    "overview.json",
    "survival.json",
    "sectors.json",
    "timeline.json",
    "outcomes.json",
    "peers.json",
    "funnel_comparison.json",
    "cohorts.json",
    "regional.json",
    "deep_tech_analysis.json",
    "strategic_analysis.json",
    "time_between_rounds.json",
    "external_factors.json",
    "stakeholders.json",
];

/// Publish all documents to `output_dir`. Every file is first written to a
/// staging directory on the same filesystem; only after all writes succeed
/// are the files renamed into place, so a failed run never leaves a
/// half-written document behind.
pub fn publish(output_dir: &Path, documents: &Documents) -> Result<usize> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let staging = tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(output_dir)
        .context("creating staging directory")?;

    let payloads: [(String, &str); 14] = [
        (to_json(&documents.overview)?, FILE_NAMES[0]),
        (to_json(&documents.survival)?, FILE_NAMES[1]),
        (to_json(&documents.sectors)?, FILE_NAMES[2]),
        (to_json(&documents.timeline)?, FILE_NAMES[3]),
        (to_json(&documents.outcomes)?, FILE_NAMES[4]),
        (to_json(&documents.peers)?, FILE_NAMES[5]),
        (to_json(&documents.funnel_comparison)?, FILE_NAMES[6]),
        (to_json(&documents.cohorts)?, FILE_NAMES[7]),
        (to_json(&documents.regional)?, FILE_NAMES[8]),
        (to_json(&documents.deep_tech_analysis)?, FILE_NAMES[9]),
        (to_json(&documents.strategic_analysis)?, FILE_NAMES[10]),
        (to_json(&documents.time_between_rounds)?, FILE_NAMES[11]),
        (to_json(&documents.external_factors)?, FILE_NAMES[12]),
        (to_json(&documents.stakeholders)?, FILE_NAMES[13]),
    ];

    for (json, name) in &payloads {
        let staged = staging.path().join(name);
        fs::write(&staged, json).with_context(|| format!("staging {}", name))?;
    }

    // Every document is fully staged before the first rename, so a consumer
    // never observes a half-written file. A rename failing mid-loop can
    // still leave a mix of old and new documents, each individually
    // complete; the run aborts on the first such failure.
    for (_, name) in &payloads {
        fs::rename(staging.path().join(name), output_dir.join(name))
            .with_context(|| format!("publishing {}", name))?;
    }

    Ok(payloads.len())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing document")
}

// ============================================================================
// TESTS
// ============================================================================

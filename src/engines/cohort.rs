// Cohort & Survival Engine
// Founding-year cohorts, stage survival per country group, outcome rates
// per round-count bucket, and round-interval timing.

use crate::engines::geography::BENCHMARK_COUNTRIES;
use crate::model::{percentage, stage_name, CompanyRecord, GroupStats, STAGE_COUNT};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Average month length in days, for converting funding spans.
const DAYS_PER_MONTH: f64 = 30.44;

// ============================================================================
// COHORT TABLE
// ============================================================================

/// One founding-year cohort. Only cohorts with at least one company are
/// materialized, so rates are always defined.
#[derive(Debug, Clone)]
pub struct CohortRow {
    pub founded_year: i32,
    pub company_count: usize,
    /// Mean of per-company summed round amounts.
    pub avg_funding: f64,
    pub avg_rounds: f64,
    pub operating_rate: f64,
    pub acquired_rate: f64,
    pub total_funding: f64,
}

/// Yearly totals derived from the cohort grouping.
#[derive(Debug, Clone)]
pub struct TimelinePoint {
    pub year: i32,
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: f64,
}

// ============================================================================
// SURVIVAL TABLE
// ============================================================================

/// Percentage of each country group's funded companies that reached at
/// least the given stage. Group populations are each group's own funded
/// total, never a global denominator.
#[derive(Debug, Clone)]
pub struct SurvivalRow {
    /// 0-based position on the stage ladder.
    pub round: u32,
    pub round_name: &'static str,
    pub global_count: usize,
    pub dutch_count: usize,
    pub global_survival_rate: Option<f64>,
    pub dutch_survival_rate: Option<f64>,
    pub usa_survival_rate: Option<f64>,
    pub uk_survival_rate: Option<f64>,
    pub germany_survival_rate: Option<f64>,
    pub france_survival_rate: Option<f64>,
}

// ============================================================================
// OUTCOMES BY ROUND COUNT
// ============================================================================

/// Round-count bucket. Five or more rounds fold into one bucket that
/// serializes as the string "5+"; exact buckets serialize as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundBucket {
    Exact(u32),
    FivePlus,
}

impl RoundBucket {
    pub fn for_round_count(count: usize) -> RoundBucket {
        if count >= 5 {
            RoundBucket::FivePlus
        } else {
            RoundBucket::Exact(count as u32)
        }
    }

    pub fn label(&self) -> String {
        match self {
            RoundBucket::Exact(n) => n.to_string(),
            RoundBucket::FivePlus => "5+".to_string(),
        }
    }
}

impl Serialize for RoundBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RoundBucket::Exact(n) => serializer.serialize_u32(*n),
            RoundBucket::FivePlus => serializer.serialize_str("5+"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutcomeRow {
    pub bucket: RoundBucket,
    pub count: usize,
    pub operating: f64,
    pub acquired: f64,
    pub closed: f64,
}

// ============================================================================
// TIME BETWEEN ROUNDS
// ============================================================================

#[derive(Debug, Clone)]
pub struct IntervalStats {
    pub company_count: usize,
    pub median_months: f64,
    pub mean_months: f64,
}

#[derive(Debug, Clone)]
pub struct CountryIntervals {
    pub country: &'static str,
    pub country_name: &'static str,
    pub stats: IntervalStats,
}

#[derive(Debug, Clone, Default)]
pub struct TimeBetweenRounds {
    pub global: Option<IntervalStats>,
    pub dutch: Option<IntervalStats>,
    pub by_country: Vec<CountryIntervals>,
}

// ============================================================================
// ENGINE OUTPUT
// ============================================================================

#[derive(Debug)]
pub struct CohortSurvivalOutput {
    /// Sorted ascending by founding year.
    pub cohorts: Vec<CohortRow>,
    pub timeline: Vec<TimelinePoint>,
    pub dutch_timeline: Vec<TimelinePoint>,
    /// Ordered by the stage ladder.
    pub survival: Vec<SurvivalRow>,
    /// Ordered by bucket: 1, 2, 3, 4, 5+. Empty buckets are absent.
    pub outcomes: Vec<OutcomeRow>,
    pub time_between_rounds: TimeBetweenRounds,
}

pub fn analyze(records: &[CompanyRecord]) -> CohortSurvivalOutput {
    CohortSurvivalOutput {
        cohorts: cohort_table(records.iter()),
        timeline: timeline(records.iter()),
        dutch_timeline: timeline(records.iter().filter(|r| r.is_dutch())),
        survival: survival_table(records),
        outcomes: outcomes_by_rounds(records),
        time_between_rounds: time_between_rounds(records),
    }
}

// ============================================================================
// COHORTS & TIMELINE
// ============================================================================

fn group_by_year<'a, I>(records: I) -> BTreeMap<i32, Vec<&'a CompanyRecord>>
where
    I: Iterator<Item = &'a CompanyRecord>,
{
    let mut groups: BTreeMap<i32, Vec<&CompanyRecord>> = BTreeMap::new();
    for record in records {
        if let Some(year) = record.founded_year {
            groups.entry(year).or_default().push(record);
        }
    }
    groups
}

fn cohort_table<'a, I>(records: I) -> Vec<CohortRow>
where
    I: Iterator<Item = &'a CompanyRecord>,
{
    group_by_year(records)
        .into_iter()
        .map(|(year, group)| {
            let stats = GroupStats::collect(group.iter().copied());
            CohortRow {
                founded_year: year,
                company_count: stats.company_count,
                avg_funding: stats.avg_funding.unwrap_or(0.0),
                avg_rounds: stats.avg_rounds.unwrap_or(0.0),
                operating_rate: stats.operating_rate.unwrap_or(0.0),
                acquired_rate: stats.acquired_rate.unwrap_or(0.0),
                total_funding: stats.total_funding,
            }
        })
        .collect()
}

fn timeline<'a, I>(records: I) -> Vec<TimelinePoint>
where
    I: Iterator<Item = &'a CompanyRecord>,
{
    group_by_year(records)
        .into_iter()
        .map(|(year, group)| {
            let stats = GroupStats::collect(group.iter().copied());
            TimelinePoint {
                year,
                company_count: stats.company_count,
                total_funding: stats.total_funding,
                avg_funding: stats.avg_funding.unwrap_or(0.0),
            }
        })
        .collect()
}

// ============================================================================
// SURVIVAL
// ============================================================================

/// Companies with at least one ladder round; zero-round companies are
/// excluded from survival denominators.
fn funded<'a>(records: &'a [CompanyRecord], country: Option<&str>) -> Vec<&'a CompanyRecord> {
    records
        .iter()
        .filter(|r| r.has_rounds())
        .filter(|r| country.map(|c| r.country == c).unwrap_or(true))
        .collect()
}

fn reached(group: &[&CompanyRecord], stage: u32) -> usize {
    group.iter().filter(|r| r.reached_stage(stage)).count()
}

fn survival_table(records: &[CompanyRecord]) -> Vec<SurvivalRow> {
    let global = funded(records, None);
    let dutch = funded(records, Some("NLD"));
    let usa = funded(records, Some("USA"));
    let uk = funded(records, Some("GBR"));
    let germany = funded(records, Some("DEU"));
    let france = funded(records, Some("FRA"));

    (1..=STAGE_COUNT)
        .map(|stage| {
            let global_count = reached(&global, stage);
            let dutch_count = reached(&dutch, stage);
            SurvivalRow {
                round: stage - 1,
                round_name: stage_name(stage),
                global_count,
                dutch_count,
                global_survival_rate: percentage(global_count, global.len()),
                dutch_survival_rate: percentage(dutch_count, dutch.len()),
                usa_survival_rate: percentage(reached(&usa, stage), usa.len()),
                uk_survival_rate: percentage(reached(&uk, stage), uk.len()),
                germany_survival_rate: percentage(reached(&germany, stage), germany.len()),
                france_survival_rate: percentage(reached(&france, stage), france.len()),
            }
        })
        .collect()
}

// ============================================================================
// OUTCOMES
// ============================================================================

fn outcomes_by_rounds(records: &[CompanyRecord]) -> Vec<OutcomeRow> {
    let buckets = [
        RoundBucket::Exact(1),
        RoundBucket::Exact(2),
        RoundBucket::Exact(3),
        RoundBucket::Exact(4),
        RoundBucket::FivePlus,
    ];

    buckets
        .iter()
        .filter_map(|bucket| {
            let group: Vec<&CompanyRecord> = records
                .iter()
                .filter(|r| r.has_rounds())
                .filter(|r| RoundBucket::for_round_count(r.round_count()) == *bucket)
                .collect();
            if group.is_empty() {
                return None;
            }
            let stats = GroupStats::collect(group.iter().copied());
            Some(OutcomeRow {
                bucket: *bucket,
                count: stats.company_count,
                operating: stats.operating_rate.unwrap_or(0.0),
                acquired: stats.acquired_rate.unwrap_or(0.0),
                closed: stats.closed_rate.unwrap_or(0.0),
            })
        })
        .collect()
}

// ============================================================================
// TIME BETWEEN ROUNDS
// ============================================================================

/// Mean interval between rounds for one multi-round company, in months.
/// Needs at least two rounds and a usable first/last date pair.
fn company_interval_months(record: &CompanyRecord) -> Option<f64> {
    if record.round_count() < 2 {
        return None;
    }
    let span_days = record.funding_span_days()? as f64;
    Some(span_days / (record.round_count() as f64 - 1.0) / DAYS_PER_MONTH)
}

fn interval_stats<'a, I>(records: I) -> Option<IntervalStats>
where
    I: Iterator<Item = &'a CompanyRecord>,
{
    let mut months: Vec<f64> = records.filter_map(company_interval_months).collect();
    if months.is_empty() {
        return None;
    }
    months.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = months.len() / 2;
    let median = if months.len() % 2 == 0 {
        (months[mid - 1] + months[mid]) / 2.0
    } else {
        months[mid]
    };
    let mean = months.iter().sum::<f64>() / months.len() as f64;

    Some(IntervalStats {
        company_count: months.len(),
        median_months: median,
        mean_months: mean,
    })
}

fn time_between_rounds(records: &[CompanyRecord]) -> TimeBetweenRounds {
    let by_country = BENCHMARK_COUNTRIES
        .iter()
        .filter_map(|&(code, name)| {
            interval_stats(records.iter().filter(|r| r.country == *code)).map(|stats| {
                CountryIntervals {
                    country: code,
                    country_name: name,
                    stats,
                }
            })
        })
        .collect();

    TimeBetweenRounds {
        global: interval_stats(records.iter()),
        dutch: interval_stats(records.iter().filter(|r| r.is_dutch())),
        by_country,
    }
}

// ============================================================================
// TESTS
// ============================================================================

// Core data model - normalized company and funding-round records
// Records are created once by the normalizer and never mutated;
// every aggregate is recomputed wholesale from the full record set.

use crate::sectors::SectorCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// FUNDING STAGE LADDER
// ============================================================================

/// Ordered funding-stage names. Position in this array is an externally
/// visible contract: consumers index funnel output by position.
pub const STAGE_NAMES: [&str; 5] = ["Seed", "Series A", "Series B", "Series C", "Series D+"];

/// Number of stages in the ladder.
pub const STAGE_COUNT: u32 = 5;

/// Map a 1-based round index to its stage name.
/// Everything at round 5 or later folds into "Series D+".
pub fn stage_name(round_index: u32) -> &'static str {
    match round_index {
        0 | 1 => STAGE_NAMES[0],
        2 => STAGE_NAMES[1],
        3 => STAGE_NAMES[2],
        4 => STAGE_NAMES[3],
        _ => STAGE_NAMES[4],
    }
}

// ============================================================================
// COMPANY STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Operating,
    Acquired,
    Closed,
    Ipo,
    /// The raw dataset contains companies with no recorded outcome.
    /// They count in group populations but in no status-rate numerator.
    Unknown,
}

impl CompanyStatus {
    /// Parse a raw status string. Unrecognized values map to `Unknown`,
    /// never an error.
    pub fn parse(raw: &str) -> CompanyStatus {
        match raw.trim().to_lowercase().as_str() {
            "operating" => CompanyStatus::Operating,
            "acquired" => CompanyStatus::Acquired,
            "closed" => CompanyStatus::Closed,
            "ipo" => CompanyStatus::Ipo,
            _ => CompanyStatus::Unknown,
        }
    }
}

// ============================================================================
// FUNDING ROUND
// ============================================================================

/// One funding round. `amount == 0.0` means "round occurred, amount
/// unknown", not "no round".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRound {
    /// 1-based stage order within the company (1=Seed, 2=Series A, ...).
    pub round_index: u32,

    /// Funding amount in USD, non-negative.
    pub amount: f64,

    /// Round date when the source provides one.
    pub date: Option<NaiveDate>,
}

// ============================================================================
// COMPANY RECORD
// ============================================================================

/// Canonical company record produced by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,

    /// ISO 3166-1 alpha-3 country code, uppercased.
    pub country: String,
    pub city: Option<String>,

    /// Dutch province; filled for NLD records from the city mapping,
    /// null for everything else.
    pub province: Option<String>,

    pub founded_year: Option<i32>,

    /// Raw sector label as it appeared in the source (preserved for display).
    pub sector: Option<String>,

    /// Classified once by the normalizer and cached here.
    pub sector_category: SectorCategory,

    pub status: CompanyStatus,

    /// Sorted ascending by `round_index`, strictly increasing after
    /// normalization. May be empty; zero-round companies are excluded
    /// from funnel/survival denominators.
    pub rounds: Vec<FundingRound>,
}

impl CompanyRecord {
    /// Sum of round amounts for this company.
    pub fn total_funding(&self) -> f64 {
        self.rounds.iter().map(|r| r.amount).sum()
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn has_rounds(&self) -> bool {
        !self.rounds.is_empty()
    }

    /// Highest round index achieved, if any. Rounds are sorted, so this is
    /// the last entry.
    pub fn max_stage(&self) -> Option<u32> {
        self.rounds.last().map(|r| r.round_index)
    }

    /// Whether this company raised at least the given stage (1-based).
    pub fn reached_stage(&self, stage: u32) -> bool {
        self.max_stage().map(|max| max >= stage).unwrap_or(false)
    }

    pub fn is_dutch(&self) -> bool {
        self.country == "NLD"
    }

    /// Days between the first and last dated rounds, when both exist and
    /// are ordered.
    pub fn funding_span_days(&self) -> Option<i64> {
        let first = self.rounds.iter().find_map(|r| r.date)?;
        let last = self.rounds.iter().rev().find_map(|r| r.date)?;
        let days = (last - first).num_days();
        if days >= 0 {
            Some(days)
        } else {
            None
        }
    }
}

// ============================================================================
// GROUP STATISTICS
// ============================================================================

/// The one canonical computation of per-group summary metrics. Every
/// consumer of "operating rate" or "average funding" goes through here so
/// two formulas can never drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: Option<f64>,
    pub avg_rounds: Option<f64>,
    pub operating_rate: Option<f64>,
    pub acquired_rate: Option<f64>,
    pub closed_rate: Option<f64>,
}

impl GroupStats {
    /// Collect stats over a group of records. An empty group yields `None`
    /// rates, never a divide-by-zero value or NaN.
    pub fn collect<'a, I>(records: I) -> GroupStats
    where
        I: IntoIterator<Item = &'a CompanyRecord>,
    {
        let mut count = 0usize;
        let mut total_funding = 0.0f64;
        let mut total_rounds = 0usize;
        let mut operating = 0usize;
        let mut acquired = 0usize;
        let mut closed = 0usize;

        for record in records {
            count += 1;
            total_funding += record.total_funding();
            total_rounds += record.round_count();
            match record.status {
                CompanyStatus::Operating => operating += 1,
                CompanyStatus::Acquired => acquired += 1,
                CompanyStatus::Closed => closed += 1,
                _ => {}
            }
        }

        GroupStats {
            company_count: count,
            total_funding,
            avg_funding: ratio(total_funding, count),
            avg_rounds: ratio(total_rounds as f64, count),
            operating_rate: percentage(operating, count),
            acquired_rate: percentage(acquired, count),
            closed_rate: percentage(closed, count),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company_count == 0
    }
}

/// `part / whole * 100`, or `None` for an empty denominator.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

/// `numerator / count`, or `None` for an empty denominator.
pub fn ratio(numerator: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(numerator / count as f64)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sectors::SectorCategory;

    fn company(status: CompanyStatus, round_amounts: &[f64]) -> CompanyRecord {
        CompanyRecord {
            id: "c1".to_string(),
            name: "Test BV".to_string(),
            country: "NLD".to_string(),
            city: None,
            province: None,
            founded_year: Some(2010),
            sector: None,
            sector_category: SectorCategory::Other,
            status,
            rounds: round_amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| FundingRound {
                    round_index: i as u32 + 1,
                    amount: *amount,
                    date: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_stage_name_ladder() {
        assert_eq!(stage_name(1), "Seed");
        assert_eq!(stage_name(2), "Series A");
        assert_eq!(stage_name(3), "Series B");
        assert_eq!(stage_name(4), "Series C");
        assert_eq!(stage_name(5), "Series D+");
        assert_eq!(stage_name(9), "Series D+");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(CompanyStatus::parse("operating"), CompanyStatus::Operating);
        assert_eq!(CompanyStatus::parse("ACQUIRED"), CompanyStatus::Acquired);
        assert_eq!(CompanyStatus::parse(" closed "), CompanyStatus::Closed);
        assert_eq!(CompanyStatus::parse("ipo"), CompanyStatus::Ipo);
        assert_eq!(CompanyStatus::parse(""), CompanyStatus::Unknown);
        assert_eq!(CompanyStatus::parse("whatever"), CompanyStatus::Unknown);
    }

    #[test]
    fn test_total_funding_and_stage() {
        let c = company(CompanyStatus::Operating, &[1_000_000.0, 2_000_000.0]);
        assert_eq!(c.total_funding(), 3_000_000.0);
        assert_eq!(c.round_count(), 2);
        assert_eq!(c.max_stage(), Some(2));
        assert!(c.reached_stage(1));
        assert!(c.reached_stage(2));
        assert!(!c.reached_stage(3));
    }

    #[test]
    fn test_zero_round_company() {
        let c = company(CompanyStatus::Operating, &[]);
        assert!(!c.has_rounds());
        assert_eq!(c.max_stage(), None);
        assert!(!c.reached_stage(1));
        assert_eq!(c.total_funding(), 0.0);
    }

    #[test]
    fn test_group_stats() {
        let companies = vec![
            company(CompanyStatus::Operating, &[1_000_000.0]),
            company(CompanyStatus::Acquired, &[1_000_000.0, 2_000_000.0]),
        ];
        let stats = GroupStats::collect(&companies);
        assert_eq!(stats.company_count, 2);
        assert_eq!(stats.total_funding, 4_000_000.0);
        assert_eq!(stats.avg_funding, Some(2_000_000.0));
        assert_eq!(stats.avg_rounds, Some(1.5));
        assert_eq!(stats.operating_rate, Some(50.0));
        assert_eq!(stats.acquired_rate, Some(50.0));
    }

    #[test]
    fn test_empty_group_has_no_rates() {
        let stats = GroupStats::collect(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.avg_funding, None);
        assert_eq!(stats.avg_rounds, None);
        assert_eq!(stats.operating_rate, None);
        assert_eq!(stats.acquired_rate, None);
        assert_eq!(stats.closed_rate, None);
    }

    #[test]
    fn test_unknown_status_counts_in_population_only() {
        let companies = vec![
            company(CompanyStatus::Operating, &[1.0]),
            company(CompanyStatus::Unknown, &[1.0]),
        ];
        let stats = GroupStats::collect(&companies);
        assert_eq!(stats.company_count, 2);
        assert_eq!(stats.operating_rate, Some(50.0));
        assert_eq!(stats.acquired_rate, Some(0.0));
    }
}

// Record Normalizer
// Validates and types raw rows into canonical CompanyRecords. Malformed
// rows are rejected with a reason, never raised; recoverable oddities
// (duplicate round indices, unparseable amounts) become warnings.

use crate::ingest::RawRow;
use crate::model::{CompanyRecord, CompanyStatus, FundingRound};
use crate::provinces::province_for_city;
use crate::sectors::SectorRuleSet;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

// ============================================================================
// REJECTION TAXONOMY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RejectReason {
    MissingId,
    MissingCountry,
    FoundedYearOutOfRange(i32),
    InvalidRoundIndex(i64),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingId => write!(f, "missing id"),
            RejectReason::MissingCountry => write!(f, "missing or unparseable country"),
            RejectReason::FoundedYearOutOfRange(year) => {
                write!(f, "founded_year {} outside [1900, current year]", year)
            }
            RejectReason::InvalidRoundIndex(index) => {
                write!(f, "round index {} is below 1", index)
            }
        }
    }
}

/// A rejected input row and why it was excluded.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub row_number: usize,
    pub reason: RejectReason,
}

/// Normalizer output: accepted records plus the rejection log and
/// non-fatal warnings.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub records: Vec<CompanyRecord>,
    pub rejected: Vec<RejectedRow>,
    pub warnings: Vec<String>,
}

// ============================================================================
// COLUMN MAPPING
// ============================================================================

const ID_KEYS: [&str; 3] = ["id", "permalink", "name"];
const COUNTRY_KEYS: [&str; 2] = ["country", "country_code"];
const SECTOR_KEYS: [&str; 2] = ["sector", "market"];

/// Wide-format round columns of the Crunchbase export, mapped onto the
/// 1-based stage ladder.
const WIDE_ROUND_COLUMNS: [(&str, u32); 9] = [
    ("seed", 1),
    ("round_a", 2),
    ("round_b", 3),
    ("round_c", 4),
    ("round_d", 5),
    ("round_e", 6),
    ("round_f", 7),
    ("round_g", 8),
    ("round_h", 9),
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

// ============================================================================
// NORMALIZER
// ============================================================================

pub struct Normalizer {
    rules: SectorRuleSet,
    /// Injected upper bound for founded_year validation. Taken as a
    /// parameter, not from the clock, so runs are reproducible.
    current_year: i32,
}

impl Normalizer {
    pub fn new(rules: SectorRuleSet, current_year: i32) -> Self {
        Normalizer {
            rules,
            current_year,
        }
    }

    /// Normalize a batch of raw rows. Never fails: every problem is either
    /// a per-row rejection or a warning.
    pub fn normalize(&self, rows: &[RawRow]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for row in rows {
            match self.normalize_row(row, &mut batch.warnings) {
                Ok(record) => batch.records.push(record),
                Err(reason) => batch.rejected.push(RejectedRow {
                    row_number: row.row_number,
                    reason,
                }),
            }
        }

        batch
    }

    fn normalize_row(
        &self,
        row: &RawRow,
        warnings: &mut Vec<String>,
    ) -> Result<CompanyRecord, RejectReason> {
        let id = row
            .first_of(&ID_KEYS)
            .map(|s| s.to_string())
            .ok_or(RejectReason::MissingId)?;

        let name = row
            .get("name")
            .unwrap_or(id.as_str())
            .to_string();

        let country = row
            .first_of(&COUNTRY_KEYS)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or(RejectReason::MissingCountry)?;

        let city = row.get("city").map(|s| s.to_string());

        let founded_year = self.parse_founded_year(row, warnings)?;

        let province = row
            .get("province")
            .map(|s| s.to_string())
            .or_else(|| {
                if country == "NLD" {
                    city.as_deref()
                        .and_then(province_for_city)
                        .map(|p| p.to_string())
                } else {
                    None
                }
            });

        let sector = row.first_of(&SECTOR_KEYS).map(|s| s.to_string());
        let sector_category = self
            .rules
            .classify(sector.as_deref().unwrap_or(""));

        let status = CompanyStatus::parse(row.get("status").unwrap_or(""));

        let rounds = self.parse_rounds(row, &id, warnings)?;

        Ok(CompanyRecord {
            id,
            name,
            country,
            city,
            province,
            founded_year,
            sector,
            sector_category,
            status,
            rounds,
        })
    }

    fn parse_founded_year(
        &self,
        row: &RawRow,
        warnings: &mut Vec<String>,
    ) -> Result<Option<i32>, RejectReason> {
        let raw = match row.get("founded_year").or_else(|| row.get("founded_at")) {
            Some(raw) => raw,
            None => return Ok(None),
        };

        // "2010" or a leading "2010-04-01" date both carry the year up front.
        let year: i32 = match raw.chars().take(4).collect::<String>().parse() {
            Ok(year) => year,
            Err(_) => {
                warnings.push(format!(
                    "row {}: unparseable founded year '{}', treated as unknown",
                    row.row_number, raw
                ));
                return Ok(None);
            }
        };

        if !(1900..=self.current_year).contains(&year) {
            return Err(RejectReason::FoundedYearOutOfRange(year));
        }
        Ok(Some(year))
    }

    fn parse_rounds(
        &self,
        row: &RawRow,
        id: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<FundingRound>, RejectReason> {
        let mut rounds: Vec<FundingRound> = Vec::new();

        // Wide-format columns: the cell is the presence indicator, so a
        // round exists only when it carries a positive amount.
        for (column, index) in WIDE_ROUND_COLUMNS {
            if let Some(raw) = row.get(column) {
                match parse_amount(raw) {
                    Some(amount) if amount > 0.0 => rounds.push(FundingRound {
                        round_index: index,
                        amount,
                        date: None,
                    }),
                    Some(_) => {} // zero cell means no round of this type
                    None => warnings.push(format!(
                        "row {} ({}): unparseable amount '{}' in column {}, round skipped",
                        row.row_number, id, raw, column
                    )),
                }
            }
        }

        // Long-format columns (round_1, round_2, ...): key presence means
        // the round occurred; amount 0 means "amount unknown".
        for (key, value) in &row.fields {
            if let Some(suffix) = key.strip_prefix("round_") {
                if let Ok(index) = suffix.parse::<i64>() {
                    if index < 1 {
                        return Err(RejectReason::InvalidRoundIndex(index));
                    }
                    let amount = match parse_amount(value) {
                        Some(amount) => amount,
                        None => {
                            warnings.push(format!(
                                "row {} ({}): unparseable amount '{}' in column {}, treated as unknown",
                                row.row_number, id, value, key
                            ));
                            0.0
                        }
                    };
                    rounds.push(FundingRound {
                        round_index: index as u32,
                        amount,
                        date: None,
                    });
                }
            }
        }

        rounds.sort_by(|a, b| {
            a.round_index
                .cmp(&b.round_index)
                .then(a.amount.partial_cmp(&b.amount).unwrap_or(std::cmp::Ordering::Equal))
        });

        // Collapse duplicate indices, keeping the larger amount. The sort
        // above puts the larger amount last within each index.
        let mut collapsed: Vec<FundingRound> = Vec::with_capacity(rounds.len());
        for round in rounds {
            match collapsed.last_mut() {
                Some(last) if last.round_index == round.round_index => {
                    warnings.push(format!(
                        "row {} ({}): duplicate round_index {}, kept the larger amount",
                        row.row_number, id, round.round_index
                    ));
                    *last = round;
                }
                _ => collapsed.push(round),
            }
        }

        // Attach first/last funding dates when the source provides them.
        if let Some(date) = row.get("first_funding_at").and_then(parse_date) {
            if let Some(first) = collapsed.first_mut() {
                first.date = Some(date);
            }
        }
        if collapsed.len() > 1 {
            if let Some(date) = row.get("last_funding_at").and_then(parse_date) {
                if let Some(last) = collapsed.last_mut() {
                    last.date = Some(date);
                }
            }
        }

        Ok(collapsed)
    }
}

/// Parse a funding amount. Tolerates currency symbols and thousands
/// separators; negative amounts are invalid.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' ' | '\u{a0}'))
        .collect();
    let amount: f64 = cleaned.parse().ok()?;
    if amount < 0.0 || !amount.is_finite() {
        None
    } else {
        Some(amount)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RawRow;
    use crate::sectors::{default_rule_set, SectorCategory};

    fn normalizer() -> Normalizer {
        Normalizer::new(default_rule_set(), 2014)
    }

    fn row(fields: &[(&str, &str)]) -> RawRow {
        let mut row = RawRow::new(2);
        for (key, value) in fields {
            row.fields.insert(key.to_string(), value.to_string());
        }
        row
    }

    #[test]
    fn test_basic_record() {
        let batch = normalizer().normalize(&[row(&[
            ("permalink", "/company/acme"),
            ("name", "Acme"),
            ("country_code", "nld"),
            ("city", "Delft"),
            ("market", "Biotechnology"),
            ("status", "operating"),
            ("founded_year", "2010"),
            ("seed", "500,000"),
            ("round_a", "2000000"),
        ])]);

        assert!(batch.rejected.is_empty());
        assert_eq!(batch.records.len(), 1);
        let record = &batch.records[0];
        assert_eq!(record.id, "/company/acme");
        assert_eq!(record.country, "NLD");
        assert_eq!(record.province.as_deref(), Some("South Holland"));
        assert_eq!(record.founded_year, Some(2010));
        assert_eq!(record.sector_category, SectorCategory::DeepTech);
        assert_eq!(record.rounds.len(), 2);
        assert_eq!(record.rounds[0].round_index, 1);
        assert_eq!(record.rounds[0].amount, 500_000.0);
        assert_eq!(record.rounds[1].round_index, 2);
    }

    #[test]
    fn test_missing_id_rejected() {
        let batch = normalizer().normalize(&[row(&[("country_code", "USA")])]);
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].reason, RejectReason::MissingId);
        assert_eq!(batch.rejected[0].row_number, 2);
    }

    #[test]
    fn test_missing_country_rejected() {
        let batch = normalizer().normalize(&[row(&[("name", "Acme")])]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].reason, RejectReason::MissingCountry);
    }

    #[test]
    fn test_founded_year_out_of_range_rejected() {
        let batch = normalizer().normalize(&[
            row(&[("name", "Old"), ("country_code", "USA"), ("founded_year", "1899")]),
            row(&[("name", "Future"), ("country_code", "USA"), ("founded_year", "2015")]),
            row(&[("name", "Edge"), ("country_code", "USA"), ("founded_year", "2014")]),
        ]);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].founded_year, Some(2014));
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(
            batch.rejected[0].reason,
            RejectReason::FoundedYearOutOfRange(1899)
        );
        assert_eq!(
            batch.rejected[1].reason,
            RejectReason::FoundedYearOutOfRange(2015)
        );
    }

    #[test]
    fn test_founded_year_from_date_column() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("founded_at", "2008-06-15"),
        ])]);
        assert_eq!(batch.records[0].founded_year, Some(2008));
    }

    #[test]
    fn test_invalid_round_index_rejected() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("round_0", "1000"),
        ])]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].reason, RejectReason::InvalidRoundIndex(0));
    }

    #[test]
    fn test_duplicate_round_index_keeps_larger_amount() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("seed", "100000"),
            ("round_1", "250000"),
        ])]);
        let record = &batch.records[0];
        assert_eq!(record.rounds.len(), 1);
        assert_eq!(record.rounds[0].round_index, 1);
        assert_eq!(record.rounds[0].amount, 250_000.0);
        assert!(batch
            .warnings
            .iter()
            .any(|w| w.contains("duplicate round_index 1")));
    }

    #[test]
    fn test_zero_wide_cell_is_no_round() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("seed", "0"),
            ("round_a", "1000000"),
        ])]);
        let record = &batch.records[0];
        assert_eq!(record.rounds.len(), 1);
        assert_eq!(record.rounds[0].round_index, 2);
    }

    #[test]
    fn test_zero_long_format_round_is_amount_unknown() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("round_1", "0"),
        ])]);
        let record = &batch.records[0];
        assert_eq!(record.rounds.len(), 1);
        assert_eq!(record.rounds[0].amount, 0.0);
    }

    #[test]
    fn test_unparseable_amount_is_a_warning_not_a_rejection() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("seed", "n/a"),
        ])]);
        assert_eq!(batch.records.len(), 1);
        assert!(batch.records[0].rounds.is_empty());
        assert_eq!(batch.warnings.len(), 1);
    }

    #[test]
    fn test_round_dates_attached() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("seed", "100000"),
            ("round_a", "1000000"),
            ("first_funding_at", "2010-01-01"),
            ("last_funding_at", "2012-01-01"),
        ])]);
        let record = &batch.records[0];
        assert!(record.rounds[0].date.is_some());
        assert!(record.rounds[1].date.is_some());
        assert_eq!(record.funding_span_days(), Some(730));
    }

    #[test]
    fn test_unknown_sector_defaults_to_other() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("market", "Basket Weaving"),
        ])]);
        assert_eq!(batch.records[0].sector_category, SectorCategory::Other);
        assert_eq!(batch.records[0].sector.as_deref(), Some("Basket Weaving"));
    }

    #[test]
    fn test_province_only_for_dutch_records() {
        let batch = normalizer().normalize(&[row(&[
            ("name", "Acme"),
            ("country_code", "USA"),
            ("city", "Amsterdam"), // Amsterdam, NY perhaps - not a Dutch record
        ])]);
        assert_eq!(batch.records[0].province, None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_amount("$500"), Some(500.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("abc"), None);
    }
}

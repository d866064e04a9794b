// Sector Classification - Rules as Data
// Ordered keyword rules mapping raw sector labels to Deep Tech / Digital / Other

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// SECTOR CATEGORY
// ============================================================================

/// The three strategic sector categories. Classification is total: every
/// string maps to exactly one category, defaulting to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorCategory {
    #[serde(rename = "Deep Tech")]
    DeepTech,
    Digital,
    Other,
}

impl SectorCategory {
    /// Display label, matching the keys used in exported documents.
    pub fn label(&self) -> &'static str {
        match self {
            SectorCategory::DeepTech => "Deep Tech",
            SectorCategory::Digital => "Digital",
            SectorCategory::Other => "Other",
        }
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// One classification rule: case-insensitive substring match against the
/// raw sector label. Rules are tried in order; the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorRule {
    pub match_substring: String,
    pub category: SectorCategory,
}

// ============================================================================
// RULE SET
// ============================================================================

/// Versioned, ordered rule list. Passed into the normalizer as
/// configuration so the classification is auditable and testable on its
/// own, instead of living as scattered literals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorRuleSet {
    pub version: u32,
    pub rules: Vec<SectorRule>,
}

impl SectorRuleSet {
    /// Load a rule set from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read sector rules file: {:?}", path.as_ref()))?;
        let rule_set: SectorRuleSet =
            serde_json::from_str(&content).context("Failed to parse sector rules JSON")?;
        Ok(rule_set)
    }

    /// Classify a raw sector label. Pure and total: the same string always
    /// yields the same category, and unmatched labels fall through to
    /// `Other`.
    pub fn classify(&self, raw_sector: &str) -> SectorCategory {
        let label = raw_sector.trim().to_lowercase();
        if label.is_empty() {
            return SectorCategory::Other;
        }
        for rule in &self.rules {
            if label.contains(&rule.match_substring.to_lowercase()) {
                return rule.category;
            }
        }
        SectorCategory::Other
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for SectorRuleSet {
    fn default() -> Self {
        default_rule_set()
    }
}

/// The built-in classification table. Deep Tech rules come before Digital
/// rules, so a label matching both ("Hardware + Software") classifies as
/// Deep Tech.
pub fn default_rule_set() -> SectorRuleSet {
    fn rule(substring: &str, category: SectorCategory) -> SectorRule {
        SectorRule {
            match_substring: substring.to_string(),
            category,
        }
    }

    let deep_tech = [
        "biotech",
        "clean technology",
        "hardware",
        "semiconductor",
        "nanotechnology",
        "medical",
        "health care",
        "manufacturing",
        "robotics",
        "energy",
    ];
    let digital = [
        "software",
        "saas",
        "e-commerce",
        "mobile",
        "social media",
        "advertising",
        "games",
        "curated web",
        "analytics",
        "web",
    ];

    let mut rules = Vec::new();
    for kw in deep_tech {
        rules.push(rule(kw, SectorCategory::DeepTech));
    }
    for kw in digital {
        rules.push(rule(kw, SectorCategory::Digital));
    }

    SectorRuleSet { version: 1, rules }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_tech_classification() {
        let rules = default_rule_set();
        assert_eq!(rules.classify("Biotechnology"), SectorCategory::DeepTech);
        assert_eq!(rules.classify("Clean Technology"), SectorCategory::DeepTech);
        assert_eq!(rules.classify("Semiconductors"), SectorCategory::DeepTech);
        assert_eq!(rules.classify("Health Care"), SectorCategory::DeepTech);
        assert_eq!(rules.classify("Robotics"), SectorCategory::DeepTech);
    }

    #[test]
    fn test_digital_classification() {
        let rules = default_rule_set();
        assert_eq!(rules.classify("Software"), SectorCategory::Digital);
        assert_eq!(rules.classify("E-Commerce"), SectorCategory::Digital);
        assert_eq!(rules.classify("Social Media"), SectorCategory::Digital);
        assert_eq!(rules.classify("Curated Web"), SectorCategory::Digital);
    }

    #[test]
    fn test_first_match_wins() {
        // "Hardware + Software" matches both a Deep Tech and a Digital rule;
        // Deep Tech rules come first.
        let rules = default_rule_set();
        assert_eq!(
            rules.classify("Hardware + Software"),
            SectorCategory::DeepTech
        );
        // "Enterprise Software" matches only the software rule.
        assert_eq!(
            rules.classify("Enterprise Software"),
            SectorCategory::Digital
        );
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rules = default_rule_set();
        assert_eq!(rules.classify("BIOTECHNOLOGY"), SectorCategory::DeepTech);
        assert_eq!(rules.classify("  mobile payments  "), SectorCategory::Digital);
    }

    #[test]
    fn test_total_and_idempotent() {
        let rules = default_rule_set();
        for label in ["Finance", "", "  ", "Consulting", "Software", "Biotech"] {
            let first = rules.classify(label);
            let second = rules.classify(label);
            assert_eq!(first, second, "classification must be idempotent");
        }
        assert_eq!(rules.classify("Finance"), SectorCategory::Other);
        assert_eq!(rules.classify(""), SectorCategory::Other);
    }

    #[test]
    fn test_rule_set_roundtrip() {
        let rules = default_rule_set();
        let json = serde_json::to_string(&rules).unwrap();
        let parsed: SectorRuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, rules.version);
        assert_eq!(parsed.rule_count(), rules.rule_count());
        assert_eq!(parsed.classify("Biotech"), SectorCategory::DeepTech);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(SectorCategory::DeepTech.label(), "Deep Tech");
        assert_eq!(SectorCategory::Digital.label(), "Digital");
        assert_eq!(SectorCategory::Other.label(), "Other");
    }
}

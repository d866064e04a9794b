// Static editorial content
// Fixed reference tables and stakeholder narrative that ship alongside the
// computed metrics. Kept as data here so the export layer stays mechanical.

use serde::Serialize;

// ============================================================================
// ECB RATES & POLICY TIMELINE
// ============================================================================

/// ECB main refinancing rate at year end, 2005-2014, with the macro
/// period each year belongs to.
pub const ECB_RATES: [(i32, f64, &str); 10] = [
    (2005, 2.25, "Pre-Crisis"),
    (2006, 3.5, "Pre-Crisis"),
    (2007, 4.0, "Pre-Crisis"),
    (2008, 2.5, "Crisis"),
    (2009, 1.0, "Crisis"),
    (2010, 1.0, "Recovery"),
    (2011, 1.0, "Recovery"),
    (2012, 0.75, "Recovery"),
    (2013, 0.25, "Recovery"),
    (2014, 0.05, "Recovery"),
];

/// Year ranges for the three macro periods, inclusive.
pub const PRE_CRISIS_YEARS: (i32, i32) = (2005, 2007);
pub const CRISIS_YEARS: (i32, i32) = (2008, 2009);
pub const RECOVERY_YEARS: (i32, i32) = (2010, 2014);

#[derive(Debug, Clone, Serialize)]
pub struct PolicyEvent {
    pub year: i32,
    pub policy: &'static str,
    pub description: &'static str,
    /// "positive", "negative" or "neutral".
    pub effect: &'static str,
    /// Whether the event falls inside the dataset's founding-year window.
    pub in_dataset: bool,
}

pub fn policy_timeline() -> Vec<PolicyEvent> {
    vec![
        PolicyEvent {
            year: 2005,
            policy: "TechnoPartner Seed Facility",
            description: "Government co-investment in early-stage venture funds",
            effect: "positive",
            in_dataset: true,
        },
        PolicyEvent {
            year: 2007,
            policy: "WBSO expansion",
            description: "Broader R&D wage tax credit for startups",
            effect: "positive",
            in_dataset: true,
        },
        PolicyEvent {
            year: 2008,
            policy: "Global financial crisis",
            description: "Credit markets froze; venture funding contracted across Europe",
            effect: "negative",
            in_dataset: true,
        },
        PolicyEvent {
            year: 2010,
            policy: "Innovation Box",
            description: "Reduced corporate tax rate on profits from innovation",
            effect: "positive",
            in_dataset: true,
        },
        PolicyEvent {
            year: 2012,
            policy: "Innovation Credit expansion",
            description: "Larger government loans for risky development projects",
            effect: "positive",
            in_dataset: true,
        },
        PolicyEvent {
            year: 2013,
            policy: "Dutch Venture Initiative",
            description: "EUR 150M fund-of-funds with the European Investment Fund",
            effect: "positive",
            in_dataset: true,
        },
    ]
}

/// Narrative insight for the external-factors summary. The funding figures
/// around it are computed from the data at export time.
pub const EXTERNAL_FACTORS_INSIGHT: &str = "Rates fell from 4% to 0.05% yet funding \
recovery lagged by years; cheap money alone did not restart the ecosystem.";

// ============================================================================
// STAKEHOLDER PERSPECTIVES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NamedItem {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourcedMetric {
    pub name: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicymakerView {
    pub title: &'static str,
    pub key_question: &'static str,
    pub constraints: Vec<NamedItem>,
    pub metrics: Vec<SourcedMetric>,
    pub implication: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityCost {
    pub alternative_salary: &'static str,
    pub founder_salary: &'static str,
    pub implicit_bet: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LifestyleVsExit {
    pub description: &'static str,
    pub implication: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FounderView {
    pub title: &'static str,
    pub key_question: &'static str,
    pub opportunity_cost: OpportunityCost,
    pub decision_factors: Vec<NamedItem>,
    pub lifestyle_vs_exit: LifestyleVsExit,
}

#[derive(Debug, Clone, Serialize)]
pub struct StakeholdersDoc {
    pub policymakers: PolicymakerView,
    pub founders: FounderView,
}

pub fn stakeholders() -> StakeholdersDoc {
    StakeholdersDoc {
        policymakers: PolicymakerView {
            title: "Policymakers",
            key_question: "Where should public money go to grow the ecosystem?",
            constraints: vec![
                NamedItem {
                    name: "Budget cycles",
                    description: "Annual budgets vs multi-year policy impact lags",
                    icon: "calendar",
                },
                NamedItem {
                    name: "Attribution",
                    description: "Funding outcomes cannot be causally tied to one program",
                    icon: "link",
                },
                NamedItem {
                    name: "Political horizon",
                    description: "Programs must survive cabinet changes to compound",
                    icon: "landmark",
                },
            ],
            metrics: vec![
                SourcedMetric {
                    name: "Seed to Series A conversion",
                    source: "funding funnel",
                },
                SourcedMetric {
                    name: "Deep tech share of funding",
                    source: "sector split",
                },
                SourcedMetric {
                    name: "Regional concentration",
                    source: "province map",
                },
            ],
            implication: "Policy effects take 3-5 years to show up in funding data; \
commit to long-term programs rather than chasing annual headline numbers.",
        },
        founders: FounderView {
            title: "Founders",
            key_question: "Is building here worth the opportunity cost?",
            opportunity_cost: OpportunityCost {
                alternative_salary: "EUR 80-120k at a corporate or scaleup",
                founder_salary: "EUR 0-40k for the first years",
                implicit_bet: "Equity upside must beat a decade of foregone salary",
            },
            decision_factors: vec![
                NamedItem {
                    name: "Capital access",
                    description: "Later-stage rounds often require foreign investors",
                    icon: "banknote",
                },
                NamedItem {
                    name: "Talent pool",
                    description: "Strong technical universities, tight senior market",
                    icon: "users",
                },
                NamedItem {
                    name: "Exit paths",
                    description: "Acquisitions dominate; IPOs are rare",
                    icon: "trending-up",
                },
            ],
            lifestyle_vs_exit: LifestyleVsExit {
                description: "Many Dutch companies run profitably for years without \
raising follow-on capital, a pattern the funnel records as attrition.",
                implication: "A shallow funnel is partly a choice, not only a failure; \
read conversion rates alongside operating rates.",
            },
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

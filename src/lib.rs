// Venture Metrics - Core Library
// Batch aggregation of startup funding CSV exports into the JSON
// documents the dashboard consumes.

pub mod content;
pub mod engines;
pub mod export;
pub mod ingest;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod provinces;
pub mod sectors;

// Re-export commonly used types
pub use engines::{
    CohortRow, CohortSurvivalOutput, FunnelOutput, FunnelStage, FunnelSummary, GeographyOutput,
    HubStats, OutcomeRow, ProvinceStats, RoundBucket, SectorRollup, SurvivalRow,
};
pub use export::{build_documents, publish, Documents};
pub use ingest::{load_csv, RawRow};
pub use model::{
    stage_name, CompanyRecord, CompanyStatus, FundingRound, GroupStats, STAGE_COUNT, STAGE_NAMES,
};
pub use normalizer::{NormalizedBatch, Normalizer, RejectReason, RejectedRow};
pub use pipeline::{run, PipelineConfig, RunSummary};
pub use sectors::{default_rule_set, SectorCategory, SectorRule, SectorRuleSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

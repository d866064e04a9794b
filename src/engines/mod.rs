// Metric-derivation engines
// Each engine reads the same immutable normalized record set and writes a
// disjoint output structure; they run independently with no shared state.

pub mod cohort;
pub mod funnel;
pub mod geography;

pub use cohort::{CohortRow, CohortSurvivalOutput, OutcomeRow, RoundBucket, SurvivalRow};
pub use funnel::{FunnelOutput, FunnelStage, FunnelSummary};
pub use geography::{GeographyOutput, HubStats, ProvinceStats, SectorRollup};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::CourseId;

/// Hole counts per differential bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoreCounts {
    pub albatrosses: u32, // -3 or better
    pub eagles: u32,
    pub birdies: u32,
    pub pars: u32,
    pub bogeys: u32,
    pub double_bogeys: u32,
    pub triple_bogey_plus: u32,
}

impl ScoreCounts {
    pub fn total(&self) -> u32 {
        self.albatrosses
            + self.eagles
            + self.birdies
            + self.pars
            + self.bogeys
            + self.double_bogeys
            + self.triple_bogey_plus
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BestRound {
    #[ts(type = "number")]
    pub course_id: CourseId,
    pub course_name: String,
    pub date: String,
    /// Signed label: `"E"`, `"+n"` or `"-n"`.
    pub score: String,
    #[ts(type = "number")]
    pub differential: i64,
    #[ts(type = "number")]
    pub throws: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CourseStats {
    #[ts(type = "number")]
    pub id: CourseId,
    pub name: String,
    pub round_count: u32,
    pub average_score: String,
    pub best_score: String,
    #[ts(type = "number")]
    pub best_differential: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Statistics {
    pub total_rounds: u32,
    pub total_holes: u32,
    #[ts(type = "number")]
    pub total_throws: u64,
    #[ts(type = "number")]
    pub total_par: u64,
    /// Two decimal places, e.g. `"3.00"`.
    pub average_throws_per_hole: String,
    pub average_round_score: String,
    pub score_counts: ScoreCounts,
    pub best_round: Option<BestRound>,
    /// Ordered by course id.
    pub course_stats: Vec<CourseStats>,
}

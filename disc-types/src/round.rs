use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{CourseId, HoleId};

/// Per-hole entry of a round. `distance` and `par` are copied from the hole
/// when the round starts so later course changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HoleScore {
    pub hole_id: HoleId,
    pub distance: f64,
    pub par: u8,
    pub throws: u32, // 0 means unscored
}

impl HoleScore {
    pub fn is_scored(&self) -> bool {
        self.throws > 0
    }

    /// `throws - par`, meaningful only once the hole is scored.
    pub fn differential(&self) -> i64 {
        i64::from(self.throws) - i64::from(self.par)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Round {
    #[ts(type = "number")]
    pub course_id: CourseId,
    pub course_name: String,
    pub date: String, // ISO 8601 string
    pub scores: Vec<HoleScore>,
}

impl Round {
    pub fn total_throws(&self) -> u64 {
        self.scores.iter().map(|s| u64::from(s.throws)).sum()
    }

    pub fn total_par(&self) -> u64 {
        self.scores.iter().map(|s| u64::from(s.par)).sum()
    }

    /// Total throws minus total par.
    pub fn differential(&self) -> i64 {
        self.total_throws() as i64 - self.total_par() as i64
    }

    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(HoleScore::is_scored)
    }

    /// Hole ids still waiting for a score, in play order.
    pub fn unscored_holes(&self) -> Vec<HoleId> {
        self.scores
            .iter()
            .filter(|s| !s.is_scored())
            .map(|s| s.hole_id)
            .collect()
    }
}

/// Lifecycle of the round currently being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundPhase {
    NotStarted,
    InProgress,
    Finished,
    Cancelled,
}

impl RoundPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundPhase::Finished | RoundPhase::Cancelled)
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::{CourseId, HoleId};

/// Why a candidate course was rejected. Variants follow the order in which
/// the rules are checked.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CourseError {
    #[error("Invalid course data")]
    MissingFields,
    #[error("Course name cannot be empty")]
    EmptyName,
    #[error("Course must have at least one hole")]
    NoHoles,
    #[error("Invalid hole data: hole {} {reason}", .index + 1)]
    InvalidHole { index: usize, reason: HoleProblem },
    #[error("A course with id {course_id} already exists")]
    DuplicateId {
        #[ts(type = "number")]
        course_id: CourseId,
    },
    #[error("Course not found: {course_id}")]
    CourseNotFound {
        #[ts(type = "number")]
        course_id: CourseId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HoleProblem {
    #[error("has no id")]
    MissingId,
    #[error("distance must be a positive number")]
    InvalidDistance,
    #[error("par must be between 1 and 7")]
    InvalidPar,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundError {
    #[error("No round in progress")]
    NoRoundInProgress,
    #[error("A round is already in progress")]
    RoundAlreadyInProgress,
    #[error("Hole index {index} out of range for a {hole_count}-hole round")]
    HoleOutOfRange { index: usize, hole_count: usize },
    #[error("Please enter scores for all holes before finishing the round.")]
    IncompleteRound { unscored: Vec<HoleId> },
    #[error("Confirmation does not belong to the round in progress")]
    StaleConfirmation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Stored collection '{collection}' is unreadable: {message}")]
    Corrupt { collection: String, message: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Any failure an engine operation can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScorecardError {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

use disc_types::{Course, HoleScore, Round, RoundError, RoundPhase};

pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel this round? All scores will be lost.";

/// Proof that the player was asked before an in-progress round is thrown
/// away. Only [`RoundTracker::request_cancel`] hands these out, and each one
/// is bound to the round that was in progress at the time.
#[derive(Debug)]
#[must_use = "a cancel request does nothing until it is confirmed or dismissed"]
pub struct CancelConfirmation {
    generation: u64,
    pub prompt: &'static str,
}

/// The round currently being played, from start until it is either saved or
/// thrown away.
#[derive(Debug)]
pub struct RoundTracker {
    phase: RoundPhase,
    round: Option<Round>,
    generation: u64,
}

impl RoundTracker {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::NotStarted,
            round: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Snapshot `course` into a fresh round with every hole unscored.
    pub fn start(&mut self, course: &Course) -> Result<&Round, RoundError> {
        if self.phase == RoundPhase::InProgress {
            return Err(RoundError::RoundAlreadyInProgress);
        }

        let round = Round {
            course_id: course.id,
            course_name: course.name.clone(),
            date: chrono::Utc::now().to_rfc3339(),
            scores: course
                .holes
                .iter()
                .map(|hole| HoleScore {
                    hole_id: hole.id,
                    distance: hole.distance,
                    par: hole.par,
                    throws: 0,
                })
                .collect(),
        };

        self.generation += 1;
        self.phase = RoundPhase::InProgress;
        Ok(&*self.round.insert(round))
    }

    /// Apply `delta` to a hole's throw count, clamping at zero after every
    /// step. Returns the new count.
    pub fn adjust(&mut self, hole_index: usize, delta: i32) -> Result<u32, RoundError> {
        let round = self.in_progress_mut()?;
        let hole_count = round.scores.len();
        let score = round
            .scores
            .get_mut(hole_index)
            .ok_or(RoundError::HoleOutOfRange {
                index: hole_index,
                hole_count,
            })?;

        let updated = (i64::from(score.throws) + i64::from(delta)).clamp(0, i64::from(u32::MAX));
        score.throws = updated as u32;
        Ok(score.throws)
    }

    /// The round as it would be saved, provided every hole has a score.
    pub fn ready_to_finish(&self) -> Result<&Round, RoundError> {
        let round = self.in_progress()?;
        if !round.is_complete() {
            return Err(RoundError::IncompleteRound {
                unscored: round.unscored_holes(),
            });
        }
        Ok(round)
    }

    /// Move to `Finished` and hand back the round. Callers persist the round
    /// before calling this so it is never dropped from both places at once.
    pub fn mark_finished(&mut self) -> Result<Round, RoundError> {
        self.ready_to_finish()?;
        self.phase = RoundPhase::Finished;
        self.round.take().ok_or(RoundError::NoRoundInProgress)
    }

    pub fn request_cancel(&self) -> Result<CancelConfirmation, RoundError> {
        self.in_progress()?;
        Ok(CancelConfirmation {
            generation: self.generation,
            prompt: CANCEL_PROMPT,
        })
    }

    /// Discard the round in progress. Returns what was discarded.
    pub fn cancel(&mut self, confirmation: CancelConfirmation) -> Result<Round, RoundError> {
        self.in_progress()?;
        if confirmation.generation != self.generation {
            return Err(RoundError::StaleConfirmation);
        }

        self.phase = RoundPhase::Cancelled;
        self.round.take().ok_or(RoundError::NoRoundInProgress)
    }

    fn in_progress(&self) -> Result<&Round, RoundError> {
        match (&self.phase, &self.round) {
            (RoundPhase::InProgress, Some(round)) => Ok(round),
            _ => Err(RoundError::NoRoundInProgress),
        }
    }

    fn in_progress_mut(&mut self) -> Result<&mut Round, RoundError> {
        match (&self.phase, &mut self.round) {
            (RoundPhase::InProgress, Some(round)) => Ok(round),
            _ => Err(RoundError::NoRoundInProgress),
        }
    }
}

impl Default for RoundTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disc_types::Hole;

    fn create_test_course() -> Course {
        Course {
            id: 1700000000000,
            name: "Oak Grove".to_string(),
            holes: vec![
                Hole { id: 1, distance: 250.0, par: 3 },
                Hole { id: 2, distance: 410.0, par: 4 },
                Hole { id: 3, distance: 520.0, par: 5 },
            ],
        }
    }

    fn started_tracker() -> RoundTracker {
        let mut tracker = RoundTracker::new();
        tracker.start(&create_test_course()).unwrap();
        tracker
    }

    #[test]
    fn test_start_snapshots_course() {
        let mut tracker = RoundTracker::new();
        assert_eq!(tracker.phase(), RoundPhase::NotStarted);

        let round = tracker.start(&create_test_course()).unwrap();
        assert_eq!(round.course_id, 1700000000000);
        assert_eq!(round.course_name, "Oak Grove");
        assert_eq!(round.scores.len(), 3);
        assert_eq!(round.scores[1].hole_id, 2);
        assert_eq!(round.scores[1].distance, 410.0);
        assert_eq!(round.scores[1].par, 4);
        assert!(round.scores.iter().all(|s| s.throws == 0));
        assert!(chrono::DateTime::parse_from_rfc3339(&round.date).is_ok());
        assert_eq!(tracker.phase(), RoundPhase::InProgress);
    }

    #[test]
    fn test_cannot_start_twice() {
        let mut tracker = started_tracker();
        assert_eq!(
            tracker.start(&create_test_course()).unwrap_err(),
            RoundError::RoundAlreadyInProgress
        );
    }

    #[test]
    fn test_adjust_clamps_each_step() {
        let mut tracker = started_tracker();

        assert_eq!(tracker.adjust(0, -1).unwrap(), 0);
        assert_eq!(tracker.adjust(0, 1).unwrap(), 1);
        assert_eq!(tracker.adjust(0, 1).unwrap(), 2);
        assert_eq!(tracker.adjust(0, -5).unwrap(), 0);
        assert_eq!(tracker.adjust(0, 12).unwrap(), 12);
    }

    #[test]
    fn test_adjust_out_of_range() {
        let mut tracker = started_tracker();
        assert_eq!(
            tracker.adjust(3, 1).unwrap_err(),
            RoundError::HoleOutOfRange {
                index: 3,
                hole_count: 3
            }
        );
    }

    #[test]
    fn test_adjust_requires_round() {
        let mut tracker = RoundTracker::new();
        assert_eq!(tracker.adjust(0, 1).unwrap_err(), RoundError::NoRoundInProgress);
    }

    #[test]
    fn test_finish_requires_every_hole() {
        let mut tracker = started_tracker();
        tracker.adjust(0, 3).unwrap();

        assert_eq!(
            tracker.mark_finished().unwrap_err(),
            RoundError::IncompleteRound {
                unscored: vec![2, 3]
            }
        );
        assert_eq!(tracker.phase(), RoundPhase::InProgress);
        assert!(tracker.round().is_some());

        tracker.adjust(1, 4).unwrap();
        tracker.adjust(2, 6).unwrap();
        let round = tracker.mark_finished().unwrap();
        assert_eq!(round.total_throws(), 13);
        assert_eq!(tracker.phase(), RoundPhase::Finished);
        assert!(tracker.round().is_none());

        // Finished rounds are not reopened
        assert_eq!(tracker.adjust(0, 1).unwrap_err(), RoundError::NoRoundInProgress);
    }

    #[test]
    fn test_cancel_needs_confirmation() {
        let mut tracker = started_tracker();
        let confirmation = tracker.request_cancel().unwrap();
        assert_eq!(confirmation.prompt, CANCEL_PROMPT);

        // Still playable until confirmed
        assert_eq!(tracker.phase(), RoundPhase::InProgress);
        tracker.adjust(0, 2).unwrap();

        let discarded = tracker.cancel(confirmation).unwrap();
        assert_eq!(discarded.scores[0].throws, 2);
        assert_eq!(tracker.phase(), RoundPhase::Cancelled);
        assert!(tracker.round().is_none());
    }

    #[test]
    fn test_stale_confirmation_is_rejected() {
        let mut tracker = started_tracker();
        let old = tracker.request_cancel().unwrap();
        let current = tracker.request_cancel().unwrap();
        tracker.cancel(current).unwrap();

        tracker.start(&create_test_course()).unwrap();
        assert_eq!(tracker.cancel(old).unwrap_err(), RoundError::StaleConfirmation);
        assert_eq!(tracker.phase(), RoundPhase::InProgress);
    }

    #[test]
    fn test_cancel_without_round() {
        let tracker = RoundTracker::new();
        assert_eq!(tracker.request_cancel().unwrap_err(), RoundError::NoRoundInProgress);
    }
}

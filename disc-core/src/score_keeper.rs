use std::sync::Arc;

use disc_types::{
    Course, CourseError, CourseId, HoleId, NewCourse, NewHole, Round, RoundPhase, ScorecardError,
    Statistics,
};
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::practice::{ChallengeResult, PracticeStats};
use crate::round_tracker::{CancelConfirmation, RoundTracker};
use crate::store::{CollectionStore, CourseStore, JsonCollections, PracticeStatsStore, RoundStore};
use crate::{CourseValidator, ScorecardEvent, ScorecardEventBus, ScorecardEventHandler, compute_statistics};

/// The storage the engine reads on start and writes after every mutation.
#[derive(Clone)]
pub struct Stores {
    pub courses: Arc<dyn CourseStore>,
    pub rounds: Arc<dyn RoundStore>,
    pub practice: Arc<dyn PracticeStatsStore>,
}

impl Stores {
    /// Serve all three collections from one JSON document store.
    pub fn from_collections<S: CollectionStore + 'static>(store: S, config: &TrackerConfig) -> Self {
        let collections = Arc::new(JsonCollections::new(store, config));
        Self {
            courses: collections.clone(),
            rounds: collections.clone(),
            practice: collections,
        }
    }
}

/// Course catalog, round log, practice record and the round being played.
pub struct ScoreKeeper {
    config: TrackerConfig,
    stores: Stores,
    courses: Vec<Course>,
    rounds: Vec<Round>,
    practice_stats: PracticeStats,
    tracker: RoundTracker,
    event_bus: ScorecardEventBus,
    last_error: Option<String>,
}

impl ScoreKeeper {
    /// Load every collection. Anything missing or unreadable starts empty.
    pub async fn load(stores: Stores, config: TrackerConfig) -> Self {
        let candidates = stores.courses.load_courses().await.unwrap_or_else(|e| {
            warn!("Failed to load courses, starting with an empty catalog: {}", e);
            Vec::new()
        });
        let courses = admit_stored_courses(candidates);
        let rounds = stores.rounds.load_rounds().await.unwrap_or_else(|e| {
            warn!("Failed to load rounds, starting with an empty log: {}", e);
            Vec::new()
        });
        let practice_stats = match stores.practice.load_practice_stats().await {
            Ok(stats) => stats.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load practice stats, using defaults: {}", e);
                PracticeStats::default()
            }
        };

        info!(
            "Loaded {} courses and {} completed rounds",
            courses.len(),
            rounds.len()
        );

        Self {
            config,
            stores,
            courses,
            rounds,
            practice_stats,
            tracker: RoundTracker::new(),
            event_bus: ScorecardEventBus::new(),
            last_error: None,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, course_id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn practice_stats(&self) -> &PracticeStats {
        &self.practice_stats
    }

    pub fn phase(&self) -> RoundPhase {
        self.tracker.phase()
    }

    pub fn active_round(&self) -> Option<&Round> {
        self.tracker.round()
    }

    /// Message of the most recent failed operation, until cleared.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn subscribe(&mut self, handler: Box<dyn ScorecardEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    /// A new form row filled with the configured defaults.
    pub fn blank_hole(&self, id: HoleId) -> NewHole {
        NewHole::new(
            id,
            self.config.default_hole_distance,
            i64::from(self.config.default_hole_par),
        )
    }

    /// Validate and append a course, then persist the catalog.
    pub async fn add_course(&mut self, candidate: NewCourse) -> Result<CourseId, ScorecardError> {
        let fresh_id = self.next_course_id();
        let course = match CourseValidator::validate(candidate, || fresh_id) {
            Ok(course) => course,
            Err(e) => return Err(self.fail(e)),
        };

        if self.course(course.id).is_some() {
            return Err(self.fail(CourseError::DuplicateId {
                course_id: course.id,
            }));
        }

        self.courses.push(course);
        if let Err(e) = self.stores.courses.save_courses(&self.courses).await {
            self.courses.pop();
            return Err(self.fail(e));
        }

        let course = &self.courses[self.courses.len() - 1];
        info!(
            "Added course '{}' ({}) with {} holes",
            course.name,
            course.id,
            course.holes.len()
        );
        let event = ScorecardEvent::CourseAdded {
            course_id: course.id,
            name: course.name.clone(),
            hole_count: course.holes.len(),
        };
        let course_id = course.id;
        self.event_bus.publish(event);

        Ok(course_id)
    }

    pub fn start_round(&mut self, course_id: CourseId) -> Result<&Round, ScorecardError> {
        let Some(course) = self.course(course_id).cloned() else {
            return Err(self.fail(CourseError::CourseNotFound { course_id }));
        };

        let started = self.tracker.start(&course).map(|_| ());
        if let Err(e) = started {
            return Err(self.fail(e));
        }

        info!("Started round on '{}' ({} holes)", course.name, course.holes.len());
        self.event_bus.publish(ScorecardEvent::RoundStarted {
            course_id,
            course_name: course.name,
        });

        self.tracker
            .round()
            .ok_or_else(|| ScorecardError::from(disc_types::RoundError::NoRoundInProgress))
    }

    /// Add `delta` throws to a hole of the round in progress (never below zero).
    pub fn adjust_score(&mut self, hole_index: usize, delta: i32) -> Result<u32, ScorecardError> {
        let throws = match self.tracker.adjust(hole_index, delta) {
            Ok(throws) => throws,
            Err(e) => return Err(self.fail(e)),
        };

        let course_id = self.tracker.round().map(|r| r.course_id).unwrap_or_default();
        debug!("Hole index {} now at {} throws", hole_index, throws);
        self.event_bus.publish(ScorecardEvent::ScoreAdjusted {
            course_id,
            hole_index,
            throws,
        });

        Ok(throws)
    }

    /// Append the round in progress to the log. The log is saved before the
    /// round is released, so a failed save leaves the round in progress.
    pub async fn finish_round(&mut self) -> Result<&Round, ScorecardError> {
        let round = match self.tracker.ready_to_finish() {
            Ok(round) => round.clone(),
            Err(e) => return Err(self.fail(e)),
        };

        self.rounds.push(round);
        if let Err(e) = self.stores.rounds.save_rounds(&self.rounds).await {
            self.rounds.pop();
            return Err(self.fail(e));
        }

        let finished = match self.tracker.mark_finished() {
            Ok(round) => round,
            Err(e) => return Err(self.fail(e)),
        };

        info!(
            "Finished round on '{}': {} throws ({:+})",
            finished.course_name,
            finished.total_throws(),
            finished.differential()
        );
        self.event_bus
            .publish(ScorecardEvent::RoundFinished { round: finished });

        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// First half of cancelling: hands out the prompt to show the player.
    pub fn request_cancel(&mut self) -> Result<CancelConfirmation, ScorecardError> {
        self.tracker.request_cancel().map_err(|e| self.fail(e))
    }

    /// Throw away the round in progress. Nothing is persisted.
    pub fn cancel_round(&mut self, confirmation: CancelConfirmation) -> Result<(), ScorecardError> {
        let discarded = match self.tracker.cancel(confirmation) {
            Ok(round) => round,
            Err(e) => return Err(self.fail(e)),
        };

        info!("Cancelled round on '{}'", discarded.course_name);
        self.event_bus.publish(ScorecardEvent::RoundCancelled {
            course_id: discarded.course_id,
        });
        Ok(())
    }

    /// The player backed out of the prompt; the round carries on.
    pub fn dismiss_cancel(&mut self, confirmation: CancelConfirmation) {
        debug!("Cancel dismissed: {}", confirmation.prompt);
    }

    pub fn statistics(&self) -> Option<Statistics> {
        compute_statistics(&self.rounds)
    }

    pub async fn record_practice(&mut self, result: ChallengeResult) -> Result<(), ScorecardError> {
        let previous = self.practice_stats.clone();
        self.practice_stats.record(&result);

        if let Err(e) = self
            .stores
            .practice
            .save_practice_stats(&self.practice_stats)
            .await
        {
            self.practice_stats = previous;
            return Err(self.fail(e));
        }

        info!(
            "Recorded {:?} practice: score {} over {} attempts",
            result.challenge_id, result.score, result.attempts
        );
        self.event_bus
            .publish(ScorecardEvent::PracticeRecorded { result });
        Ok(())
    }

    fn next_course_id(&self) -> CourseId {
        next_course_id(&self.courses)
    }

    fn fail(&mut self, err: impl Into<ScorecardError>) -> ScorecardError {
        let err = err.into();
        warn!("{}", err);
        self.last_error = Some(err.to_string());
        err
    }
}

/// Millisecond timestamp, bumped past every existing id.
fn next_course_id(courses: &[Course]) -> CourseId {
    let now = chrono::Utc::now().timestamp_millis();
    match courses.iter().map(|c| c.id).max() {
        Some(highest) if highest >= now => highest + 1,
        _ => now,
    }
}

/// Run stored candidates through the same rules as [`ScoreKeeper::add_course`],
/// keeping the ones that pass in stored order.
fn admit_stored_courses(candidates: Vec<NewCourse>) -> Vec<Course> {
    let mut courses: Vec<Course> = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.into_iter().enumerate() {
        let fresh_id = next_course_id(&courses);
        let course = match CourseValidator::validate(candidate, || fresh_id) {
            Ok(course) => course,
            Err(e) => {
                warn!("Dropping stored course #{}: {}", index, e);
                continue;
            }
        };

        if courses.iter().any(|c| c.id == course.id) {
            warn!("Dropping stored course #{}: duplicate id {}", index, course.id);
            continue;
        }
        courses.push(course);
    }

    courses
}

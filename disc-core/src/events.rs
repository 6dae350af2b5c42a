use disc_types::{CourseId, Round};

use crate::practice::ChallengeResult;

#[derive(Debug, Clone, PartialEq)]
pub enum ScorecardEvent {
    CourseAdded {
        course_id: CourseId,
        name: String,
        hole_count: usize,
    },
    RoundStarted {
        course_id: CourseId,
        course_name: String,
    },
    ScoreAdjusted {
        course_id: CourseId,
        hole_index: usize,
        throws: u32,
    },
    RoundFinished {
        round: Round,
    },
    RoundCancelled {
        course_id: CourseId,
    },
    PracticeRecorded {
        result: ChallengeResult,
    },
}

impl ScorecardEvent {
    pub fn course_id(&self) -> Option<CourseId> {
        match self {
            ScorecardEvent::CourseAdded { course_id, .. } => Some(*course_id),
            ScorecardEvent::RoundStarted { course_id, .. } => Some(*course_id),
            ScorecardEvent::ScoreAdjusted { course_id, .. } => Some(*course_id),
            ScorecardEvent::RoundFinished { round } => Some(round.course_id),
            ScorecardEvent::RoundCancelled { course_id } => Some(*course_id),
            ScorecardEvent::PracticeRecorded { .. } => None,
        }
    }
}

/// Event handler trait for reacting to scorecard changes
pub trait ScorecardEventHandler: Send {
    fn handle_event(&mut self, event: ScorecardEvent);
}

/// Simple event bus for distributing scorecard events
pub struct ScorecardEventBus {
    handlers: Vec<Box<dyn ScorecardEventHandler>>,
}

impl ScorecardEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn ScorecardEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: ScorecardEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for ScorecardEventBus {
    fn default() -> Self {
        Self::new()
    }
}

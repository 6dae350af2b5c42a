#![allow(dead_code)]

use disc_core::{MemoryStore, ScoreKeeper, ScorecardEvent, ScorecardEventHandler, Stores, TrackerConfig};
use disc_types::NewCourse;
use std::sync::{Arc, Mutex, Once};

static TRACING: Once = Once::new();

/// Route engine logs to the test output
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A three hole course with pars 3, 4, 3
pub fn create_test_course(name: &str) -> NewCourse {
    NewCourse::from_layout(name, [(250.0, 3), (410.0, 4), (195.0, 3)])
}

/// A course with `count` par 3 holes
pub fn create_par_three_course(name: &str, count: usize) -> NewCourse {
    NewCourse::from_layout(name, std::iter::repeat_n((250.0, 3), count))
}

/// Creates a score keeper over a fresh in-memory store
pub async fn create_test_keeper() -> (ScoreKeeper, Arc<MemoryStore>) {
    create_keeper_with_store(Arc::new(MemoryStore::new())).await
}

pub async fn create_keeper_with_store(store: Arc<MemoryStore>) -> (ScoreKeeper, Arc<MemoryStore>) {
    init_tracing();
    let config = TrackerConfig::default();
    let stores = Stores::from_collections(store.clone(), &config);
    (ScoreKeeper::load(stores, config).await, store)
}

/// Plays a full round with the given throws and saves it
pub async fn play_round(keeper: &mut ScoreKeeper, course_id: i64, throws: &[i32]) {
    keeper.start_round(course_id).unwrap();
    for (index, &count) in throws.iter().enumerate() {
        keeper.adjust_score(index, count).unwrap();
    }
    keeper.finish_round().await.unwrap();
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<ScorecardEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<ScorecardEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_event(&self) -> Option<ScorecardEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&ScorecardEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl ScorecardEventHandler for EventCollector {
    fn handle_event(&mut self, event: ScorecardEvent) {
        self.events.lock().unwrap().push(event);
    }
}

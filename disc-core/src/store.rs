use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use disc_types::{Course, NewCourse, Round, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::TrackerConfig;
use crate::practice::PracticeStats;

/// Named whole-document storage: every save replaces the collection.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn load(&self, collection: &str) -> Result<Option<String>, StorageError>;
    async fn save(&self, collection: &str, data: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Stored courses as unvalidated candidates. Entries that cannot be read
    /// as a candidate are skipped.
    async fn load_courses(&self) -> Result<Vec<NewCourse>, StorageError>;
    async fn save_courses(&self, courses: &[Course]) -> Result<(), StorageError>;
}

#[async_trait]
pub trait RoundStore: Send + Sync {
    async fn load_rounds(&self) -> Result<Vec<Round>, StorageError>;
    async fn save_rounds(&self, rounds: &[Round]) -> Result<(), StorageError>;
}

#[async_trait]
pub trait PracticeStatsStore: Send + Sync {
    /// `None` when nothing usable is stored.
    async fn load_practice_stats(&self) -> Result<Option<PracticeStats>, StorageError>;
    async fn save_practice_stats(&self, stats: &PracticeStats) -> Result<(), StorageError>;
}

/// JSON encoding of the typed stores on top of any [`CollectionStore`].
pub struct JsonCollections<S> {
    store: S,
    courses: String,
    rounds: String,
    practice: String,
}

impl<S: CollectionStore> JsonCollections<S> {
    pub fn new(store: S, config: &TrackerConfig) -> Self {
        Self {
            store,
            courses: config.courses_collection.clone(),
            rounds: config.rounds_collection.clone(),
            practice: config.practice_collection.clone(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    async fn load_json<T: DeserializeOwned + Send>(&self, collection: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.load(collection).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                collection: collection.to_string(),
                message: e.to_string(),
            })
    }

    async fn save_json<T: Serialize + ?Sized + Sync>(
        &self,
        collection: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        tracing::debug!("Saving {} bytes to collection '{}'", raw.len(), collection);
        self.store.save(collection, &raw).await
    }
}

#[async_trait]
impl<S: CollectionStore> CourseStore for JsonCollections<S> {
    async fn load_courses(&self) -> Result<Vec<NewCourse>, StorageError> {
        let entries: Vec<serde_json::Value> = self.load_json(&self.courses).await?.unwrap_or_default();

        let candidates = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::warn!("Skipping stored course #{}: {}", index, e);
                    None
                }
            })
            .collect();

        Ok(candidates)
    }

    async fn save_courses(&self, courses: &[Course]) -> Result<(), StorageError> {
        self.save_json(&self.courses, courses).await
    }
}

#[async_trait]
impl<S: CollectionStore> RoundStore for JsonCollections<S> {
    async fn load_rounds(&self) -> Result<Vec<Round>, StorageError> {
        Ok(self.load_json(&self.rounds).await?.unwrap_or_default())
    }

    async fn save_rounds(&self, rounds: &[Round]) -> Result<(), StorageError> {
        self.save_json(&self.rounds, rounds).await
    }
}

#[async_trait]
impl<S: CollectionStore> PracticeStatsStore for JsonCollections<S> {
    async fn load_practice_stats(&self) -> Result<Option<PracticeStats>, StorageError> {
        let value: Option<serde_json::Value> = self.load_json(&self.practice).await?;
        Ok(value.and_then(PracticeStats::from_value))
    }

    async fn save_practice_stats(&self, stats: &PracticeStats) -> Result<(), StorageError> {
        self.save_json(&self.practice, stats).await
    }
}

/// Process-local [`CollectionStore`]. Saves can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, String>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, collection: &str, data: &str) -> Self {
        self.lock().insert(collection.to_string(), data.to_string());
        self
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, collection: &str) -> Option<String> {
        self.lock().get(collection).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self, collection: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(collection))
    }

    async fn save(&self, collection: &str, data: &str) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!(
                "writes to '{collection}' are disabled"
            )));
        }
        self.lock().insert(collection.to_string(), data.to_string());
        Ok(())
    }
}

#[async_trait]
impl<S: CollectionStore + ?Sized> CollectionStore for std::sync::Arc<S> {
    async fn load(&self, collection: &str) -> Result<Option<String>, StorageError> {
        (**self).load(collection).await
    }

    async fn save(&self, collection: &str, data: &str) -> Result<(), StorageError> {
        (**self).save(collection, data).await
    }
}

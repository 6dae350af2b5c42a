use async_trait::async_trait;
use disc_core::CollectionStore;
use disc_types::StorageError;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::entities::{collections, prelude::*};

/// SQLite-backed document store for the engine's collections.
#[derive(Clone)]
pub struct CollectionRepository {
    db: DatabaseConnection,
}

impl CollectionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<String>, DbErr> {
        let model = Collections::find_by_id(name.to_string()).one(&self.db).await?;
        Ok(model.map(|m| m.data))
    }

    /// Insert or overwrite the whole document stored under `name`.
    pub async fn upsert(&self, name: &str, data: &str) -> Result<(), DbErr> {
        let model = collections::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            data: ActiveValue::Set(data.to_string()),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        Collections::insert(model)
            .on_conflict(
                OnConflict::column(collections::Column::Name)
                    .update_columns([collections::Column::Data, collections::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    pub async fn collection_names(&self) -> Result<Vec<String>, DbErr> {
        let models = Collections::find().all(&self.db).await?;
        Ok(models.into_iter().map(|m| m.name).collect())
    }
}

fn unavailable(err: DbErr) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

#[async_trait]
impl CollectionStore for CollectionRepository {
    async fn load(&self, collection: &str) -> Result<Option<String>, StorageError> {
        tracing::debug!("Loading collection '{}'", collection);
        self.find_by_name(collection).await.map_err(unavailable)
    }

    async fn save(&self, collection: &str, data: &str) -> Result<(), StorageError> {
        self.upsert(collection, data).await.map_err(unavailable)
    }
}

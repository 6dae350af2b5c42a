pub mod connection;
pub mod entities;
pub mod repositories;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::repositories::CollectionRepository;

pub struct DatabaseManager {
    connection: DatabaseConnection,
}

impl DatabaseManager {
    /// Connect and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let connection = Database::connect(database_url).await?;
        Migrator::up(&connection, None).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn collections(&self) -> CollectionRepository {
        CollectionRepository::new(self.connection.clone())
    }
}

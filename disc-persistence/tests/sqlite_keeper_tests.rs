use disc_core::{Challenge, ChallengeResult, CollectionStore, ScoreKeeper, Stores, TrackerConfig};
use disc_persistence::connection::{connect_and_migrate, connect_to_memory_database};
use disc_persistence::DatabaseManager;
use disc_persistence::repositories::CollectionRepository;
use disc_types::{NewCourse, RoundPhase};
use migration::{Migrator, MigratorTrait};
use std::sync::Once;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

async fn setup_repository() -> CollectionRepository {
    init_tracing();
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    CollectionRepository::new(db)
}

async fn keeper_over(repo: &CollectionRepository) -> ScoreKeeper {
    let config = TrackerConfig::default();
    let stores = Stores::from_collections(repo.clone(), &config);
    ScoreKeeper::load(stores, config).await
}

#[tokio::test]
async fn test_empty_database_loads_empty_keeper() {
    let repo = setup_repository().await;
    let keeper = keeper_over(&repo).await;

    assert!(keeper.courses().is_empty());
    assert!(keeper.rounds().is_empty());
    assert_eq!(keeper.phase(), RoundPhase::NotStarted);
    assert!(keeper.statistics().is_none());
}

#[tokio::test]
async fn test_round_survives_reload() {
    let repo = setup_repository().await;
    let mut keeper = keeper_over(&repo).await;

    let course_id = keeper
        .add_course(NewCourse::from_layout("Maple Hill", [(250.0, 3), (410.0, 4), (195.0, 3)]))
        .await
        .unwrap();

    keeper.start_round(course_id).unwrap();
    keeper.adjust_score(0, 3).unwrap();
    keeper.adjust_score(1, 5).unwrap();
    keeper.adjust_score(2, 2).unwrap();
    keeper.finish_round().await.unwrap();

    let reloaded = keeper_over(&repo).await;
    assert_eq!(reloaded.courses().len(), 1);
    assert_eq!(reloaded.courses()[0].name, "Maple Hill");
    assert_eq!(reloaded.rounds().len(), 1);
    assert_eq!(reloaded.rounds()[0].total_throws(), 10);

    let stats = reloaded.statistics().unwrap();
    assert_eq!(stats.total_rounds, 1);
    assert_eq!(stats.total_holes, 3);
    assert_eq!(stats.average_round_score, "E");
}

#[tokio::test]
async fn test_stored_documents_use_browser_keys() {
    let repo = setup_repository().await;
    let mut keeper = keeper_over(&repo).await;

    let course_id = keeper
        .add_course(NewCourse::from_layout("Pine Ridge", [(300.0, 3)]))
        .await
        .unwrap();
    keeper.start_round(course_id).unwrap();
    keeper.adjust_score(0, 2).unwrap();
    keeper.finish_round().await.unwrap();

    let rounds = repo.find_by_name("completedRounds").await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&rounds).unwrap();
    assert_eq!(value[0]["courseId"], course_id);
    assert_eq!(value[0]["courseName"], "Pine Ridge");
    assert_eq!(value[0]["scores"][0]["holeId"], 1);
    assert_eq!(value[0]["scores"][0]["throws"], 2);

    let courses = repo.find_by_name("courses").await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&courses).unwrap();
    assert_eq!(value[0]["holes"][0]["par"], 3);
}

#[tokio::test]
async fn test_corrupt_document_falls_back_to_empty() {
    let repo = setup_repository().await;
    repo.upsert("courses", "{not json").await.unwrap();

    let keeper = keeper_over(&repo).await;
    assert!(keeper.courses().is_empty());
}

#[tokio::test]
async fn test_practice_stats_persist() {
    let repo = setup_repository().await;
    let mut keeper = keeper_over(&repo).await;

    keeper
        .record_practice(ChallengeResult {
            challenge_id: Challenge::Target,
            score: 80,
            attempts: 10,
            date: "2024-06-01T10:00:00Z".to_string(),
        })
        .await
        .unwrap();

    let reloaded = keeper_over(&repo).await;
    assert_eq!(reloaded.practice_stats().games_played(Challenge::Target), 1);
}

#[tokio::test]
async fn test_database_manager_bootstraps_schema() {
    init_tracing();
    let manager = DatabaseManager::connect("sqlite::memory:").await.unwrap();
    let repo = manager.collections();

    repo.save("courses", "[]").await.unwrap();
    assert_eq!(repo.load("courses").await.unwrap().as_deref(), Some("[]"));

    let mut keeper = keeper_over(&repo).await;
    keeper
        .add_course(NewCourse::from_layout("Bootstrap Woods", [(220.0, 3)]))
        .await
        .unwrap();
    assert_eq!(keeper_over(&manager.collections()).await.courses().len(), 1);
}

#[tokio::test]
async fn test_connect_and_migrate_reads_database_url() {
    init_tracing();
    std::env::set_var("DATABASE_URL", "sqlite::memory:");

    let db = connect_and_migrate().await.unwrap();
    let repo = CollectionRepository::new(db);
    assert_eq!(repo.load("completedRounds").await.unwrap(), None);
}

//! Suspension across "processes": every call uses a freshly opened store and
//! a new coordinator, as separate CLI invocations would.

mod common;

use common::{RecordingPublisher, ScriptedProducer};
use review_checkpoint::{FileCheckpointStore, SqliteCheckpointStore};
use review_core::{CheckpointStore, CoordinatorConfig, Outcome, RunCoordinator};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

async fn sqlite_coordinator(path: &Path, publisher: Arc<RecordingPublisher>) -> RunCoordinator {
    let store: Arc<dyn CheckpointStore> = Arc::new(SqliteCheckpointStore::open(path).await.unwrap());
    RunCoordinator::new(
        store,
        Arc::new(ScriptedProducer::default()),
        publisher,
        CoordinatorConfig::default(),
    )
    .unwrap()
}

async fn file_coordinator(path: &Path, publisher: Arc<RecordingPublisher>) -> RunCoordinator {
    let store: Arc<dyn CheckpointStore> = Arc::new(FileCheckpointStore::open(path).await.unwrap());
    RunCoordinator::new(
        store,
        Arc::new(ScriptedProducer::default()),
        publisher,
        CoordinatorConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_sqlite_run_resumes_in_a_new_coordinator() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("checkpoints.db");
    let publisher = Arc::new(RecordingPublisher::succeeding());

    let started = {
        let coordinator = sqlite_coordinator(&db, publisher.clone()).await;
        coordinator.start("Company X launches new product.").await.unwrap()
    };

    let second = {
        let coordinator = sqlite_coordinator(&db, publisher.clone()).await;
        coordinator
            .respond(&started.run_id, "make it punchier")
            .await
            .unwrap()
    };
    assert!(matches!(second, Outcome::AwaitingReview { iteration_count: 2, .. }));

    let coordinator = sqlite_coordinator(&db, publisher.clone()).await;
    let finished = coordinator.respond(&started.run_id, "approve").await.unwrap();
    assert!(matches!(finished, Outcome::Published { .. }));
    assert_eq!(publisher.calls(), 1);

    let reopened = sqlite_coordinator(&db, publisher.clone()).await;
    let checkpoint = reopened.status(&started.run_id).await.unwrap();
    assert!(checkpoint.state.is_published);
    assert_eq!(checkpoint.state.iteration_count, 2);
    assert!(matches!(
        Outcome::from_checkpoint(&checkpoint),
        Outcome::Published { .. }
    ));
}

#[tokio::test]
async fn test_file_run_resumes_in_a_new_coordinator() {
    let dir = TempDir::new().unwrap();
    let publisher = Arc::new(RecordingPublisher::succeeding());

    let started = file_coordinator(dir.path(), publisher.clone())
        .await
        .start("Quarterly results beat expectations.")
        .await
        .unwrap();

    let outcome = file_coordinator(dir.path(), publisher.clone())
        .await
        .respond(&started.run_id, "YES")
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Published { .. }));
    assert_eq!(publisher.texts(), vec![started.draft]);
}

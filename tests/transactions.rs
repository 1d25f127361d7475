//! Transaction discipline: concurrent writers, lock order and
//! all-or-nothing finalization

mod common;

use common::{
    A, B, C, Fixture, participant,
    recording::{Call, RecordingStore},
};
use gauntlet::{
    AppError, engine,
    models::StageStatus,
    services::{ChampionService, PerformanceService, StageService},
};
use tokio_test::{assert_err, assert_ok};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_results_leave_dense_positions() {
    let field: Vec<u128> = (1..=20).collect();
    let fx = Fixture::with_roster(&field).await;
    let stage = fx.stage(1, None, StageStatus::Ongoing).await;

    let mut handles = Vec::with_capacity(field.len());
    for n in field.iter().copied() {
        let store = fx.store.clone();
        let stage_id = stage.id;
        handles.push(tokio::spawn(async move {
            // Several participants share a time
            let secs = 30 + (n % 7) as i64;
            PerformanceService::record_result(&store, stage_id, participant(n), secs).await
        }));
    }
    for handle in handles {
        assert_ok!(handle.await.expect("recording task panicked"));
    }

    let records = fx.store.results(stage.id).await;
    assert_eq!(records.len(), field.len());

    let stored = assert_ok!(PerformanceService::get_ranking(&fx.store, stage.id).await);
    assert_eq!(stored, engine::rank(&records));
    assert_eq!(stored.len(), field.len());

    for entry in &stored {
        let faster = stored
            .iter()
            .filter(|other| other.elapsed_seconds < entry.elapsed_seconds)
            .count();
        assert_eq!(entry.position, faster as i32 + 1);
    }
}

#[tokio::test]
async fn test_result_entry_locks_season_before_stage() {
    let fx = Fixture::with_roster(&[A]).await;
    let stage = fx.stage(1, None, StageStatus::Ongoing).await;
    let store = RecordingStore::new(fx.store.clone());

    assert_ok!(PerformanceService::record_result(&store, stage.id, participant(A), 30).await);

    let calls = store.calls();
    let at = |call: Call| calls.iter().position(|c| *c == call).expect("call made");
    assert!(at(Call::LockSeason(fx.season.id)) < at(Call::LockStage(stage.id)));
    assert!(at(Call::LockStage(stage.id)) < at(Call::UpsertResult(stage.id)));
}

#[tokio::test]
async fn test_finalize_holds_terminal_stage_while_ranking() {
    let fx = Fixture::with_roster(&[A, B]).await;
    fx.stage(1, None, StageStatus::Completed).await;
    let last = fx.stage(2, None, StageStatus::Ongoing).await;
    fx.record(&last, A, 30).await;
    fx.record(&last, B, 35).await;
    assert_ok!(StageService::transition_stage(&fx.store, last.id, StageStatus::Completed).await);

    let store = RecordingStore::new(fx.store.clone());
    assert_ok!(ChampionService::finalize(&store, fx.season.id).await);

    let calls = store.calls();
    let at = |call: Call| calls.iter().position(|c| *c == call).expect("call made");
    assert!(at(Call::LockSeason(fx.season.id)) < at(Call::LockStage(last.id)));
    assert!(at(Call::LockStage(last.id)) < at(Call::ListResults(last.id)));
    assert!(at(Call::ListResults(last.id)) < at(Call::InsertChampion));
}

#[tokio::test]
async fn test_failed_champion_write_leaves_season_open() {
    let fx = Fixture::with_roster(&[A, B, C]).await;
    let last = fx.stage(1, None, StageStatus::Ongoing).await;
    fx.record(&last, A, 30).await;
    fx.record(&last, B, 35).await;
    fx.record(&last, C, 40).await;
    assert_ok!(StageService::transition_stage(&fx.store, last.id, StageStatus::Completed).await);

    let store = RecordingStore::new(fx.store.clone()).failing_champion_insert(2);
    let err = assert_err!(ChampionService::finalize(&store, fx.season.id).await);
    assert!(matches!(err, AppError::Database(_)));

    let calls = store.calls();
    assert_eq!(calls.iter().filter(|c| **c == Call::InsertChampion).count(), 2);
    assert!(!calls.contains(&Call::Commit));

    assert_eq!(fx.store.champion_count().await, 0);
    let season = fx.store.season(fx.season.id).await.expect("season exists");
    assert!(!season.is_ended());

    // Nothing is resumed: a clean run writes the full standings from scratch
    let champions = assert_ok!(ChampionService::finalize(&fx.store, fx.season.id).await);
    assert_eq!(champions.len(), 3);
    assert_eq!(champions[0].participant_id, participant(A));
}

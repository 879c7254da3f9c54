use excuse_voter::config::DatabaseConfig;
use excuse_voter::{SortKey, StoreError, VoteDelta};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// SQLite file in the temp dir, removed (with its WAL/SHM siblings) on drop.
struct TempDb {
    path: PathBuf,
}

impl TempDb {
    fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "excuse-voter-{label}-{}-{}-{nanos}.sqlite",
            std::process::id(),
            DB_COUNTER.fetch_add(1, Ordering::Relaxed),
        ));
        Self { path }
    }

    fn config(&self) -> DatabaseConfig {
        DatabaseConfig::with_url(format!("sqlite:{}", self.path.display()))
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

async fn tick() {
    // Keeps created_at strictly increasing between inserts.
    tokio::time::sleep(Duration::from_millis(2)).await;
}

#[tokio::test]
async fn create_then_vote_tracks_the_sum_of_deltas() {
    let tmp = TempDb::new("vote-sum");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();

    assert!(db.list(SortKey::Votes).await.unwrap().is_empty());

    let created = db.create("Dog ate my laptop charger").await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.text, "Dog ate my laptop charger");
    assert_eq!(created.votes, 0);

    let after = db.vote(created.id, VoteDelta::Up).await.unwrap().unwrap();
    assert_eq!(after.votes, 1);
    let after = db.vote(created.id, VoteDelta::Up).await.unwrap().unwrap();
    assert_eq!(after.votes, 2);
    let after = db.vote(created.id, VoteDelta::Down).await.unwrap().unwrap();
    assert_eq!(after.votes, 1);

    // Everything but the tally is immutable.
    assert_eq!(after.id, created.id);
    assert_eq!(after.text, created.text);
    assert_eq!(after.created_at, created.created_at);

    // No floor: the tally can go negative.
    for _ in 0..3 {
        db.vote(created.id, VoteDelta::Down).await.unwrap();
    }
    let listed = db.list(SortKey::Votes).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].votes, -2);
}

#[tokio::test]
async fn ids_are_strictly_increasing() {
    let tmp = TempDb::new("ids");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();

    let mut last = 0;
    for i in 0..5 {
        let excuse = db.create(format!("excuse #{i}")).await.unwrap();
        assert!(excuse.id > last, "id {} not greater than {last}", excuse.id);
        assert_eq!(excuse.votes, 0);
        last = excuse.id;
    }
}

#[tokio::test]
async fn vote_on_unknown_id_returns_none_without_mutation() {
    let tmp = TempDb::new("unknown-id");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();

    let existing = db.create("Alarm clock unionized").await.unwrap();
    assert_eq!(db.vote(existing.id + 100, VoteDelta::Up).await.unwrap(), None);

    let listed = db.list(SortKey::Votes).await.unwrap();
    assert_eq!(listed, vec![existing]);
}

#[tokio::test]
async fn list_orders_by_votes_then_recency_or_by_recency_alone() {
    let tmp = TempDb::new("ordering");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();

    let a = db.create("a").await.unwrap();
    tick().await;
    let b = db.create("b").await.unwrap();
    tick().await;
    let c = db.create("c").await.unwrap();
    tick().await;
    let d = db.create("d").await.unwrap();

    // a: 2, b: 0, c: 2, d: -1
    db.vote(a.id, VoteDelta::Up).await.unwrap();
    db.vote(a.id, VoteDelta::Up).await.unwrap();
    db.vote(c.id, VoteDelta::Up).await.unwrap();
    db.vote(c.id, VoteDelta::Up).await.unwrap();
    db.vote(d.id, VoteDelta::Down).await.unwrap();

    let by_votes = db.list(SortKey::Votes).await.unwrap();
    let ids: Vec<i64> = by_votes.iter().map(|e| e.id).collect();
    // Tie between a and c broken by created_at descending.
    assert_eq!(ids, vec![c.id, a.id, b.id, d.id]);
    assert!(by_votes.windows(2).all(|w| w[0].votes >= w[1].votes));

    let by_recent = db.list(SortKey::Recent).await.unwrap();
    let ids: Vec<i64> = by_recent.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![d.id, c.id, b.id, a.id]);
    assert!(by_recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn ensure_schema_is_idempotent_and_keeps_data() {
    let tmp = TempDb::new("schema");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();

    let first = db.create("Printer jammed, emotionally").await.unwrap();
    db.vote(first.id, VoteDelta::Up).await.unwrap();
    let before = db.list(SortKey::Votes).await.unwrap();

    db.ensure_schema().await.unwrap();
    db.ensure_schema().await.unwrap();
    assert_eq!(db.list(SortKey::Votes).await.unwrap(), before);

    // Re-opening the same file re-runs the startup migration without touching rows.
    db.shutdown().await;
    let reopened = excuse_voter::db::spawn(&tmp.config()).await.unwrap();
    assert_eq!(reopened.list(SortKey::Votes).await.unwrap(), before);

    let next = reopened.create("Second excuse").await.unwrap();
    assert!(next.id > first.id);
}

#[tokio::test]
async fn concurrent_votes_through_one_handle_all_apply() {
    let tmp = TempDb::new("concurrent");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();
    let id = db.create("Cat walked on keyboard").await.unwrap().id;

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let db = db.clone();
            let delta = if i % 4 == 0 {
                VoteDelta::Down
            } else {
                VoteDelta::Up
            };
            tokio::spawn(async move { db.vote(id, delta).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    // 30 up, 10 down.
    let listed = db.list(SortKey::Votes).await.unwrap();
    assert_eq!(listed[0].votes, 20);
}

#[tokio::test]
async fn concurrent_votes_from_separate_pools_are_not_lost() {
    let tmp = TempDb::new("two-pools");
    let first = excuse_voter::db::spawn(&tmp.config()).await.unwrap();
    let second = excuse_voter::db::spawn(&tmp.config()).await.unwrap();
    let id = first.create("Neighbour's drill").await.unwrap().id;

    // Two actors own two pools on one file, so their updates really interleave in SQLite.
    let tasks: Vec<_> = (0..60)
        .map(|i| {
            let db = if i % 2 == 0 { first.clone() } else { second.clone() };
            let delta = if i % 3 == 0 {
                VoteDelta::Down
            } else {
                VoteDelta::Up
            };
            tokio::spawn(async move { db.vote(id, delta).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_some());
    }

    // 40 up, 20 down.
    let listed = second.list(SortKey::Votes).await.unwrap();
    assert_eq!(listed[0].votes, 20);

    first.shutdown().await;
    second.shutdown().await;
}

#[tokio::test]
async fn calls_after_shutdown_fail_with_actor_error() {
    let tmp = TempDb::new("shutdown");
    let db = excuse_voter::db::spawn(&tmp.config()).await.unwrap();
    db.shutdown().await;

    let err = db.list(SortKey::Votes).await.unwrap_err();
    assert!(matches!(err, StoreError::Actor(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn spawn_fails_for_an_unopenable_database() {
    let mut cfg = DatabaseConfig::with_url("sqlite:/nonexistent-dir/for/sure/excuses.db");
    cfg.max_connections = 1;

    let err = excuse_voter::db::spawn(&cfg).await.err().expect("spawn should fail");
    assert!(matches!(err, StoreError::Spawn(_)), "unexpected error: {err:?}");
}

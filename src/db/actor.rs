use crate::config::DatabaseConfig;
use crate::db::models::DbExcuse;
use crate::db::schema::{APPLY_VOTE, INSERT_EXCUSE, SQLITE_INIT, list_query};
use crate::error::StoreError;
use chrono::Utc;
use excuse_schema::{Excuse, SortKey, VoteDelta};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// List every excuse in the requested order.
    List(SortKey, RpcReplyPort<Result<Vec<Excuse>, StoreError>>),

    /// Insert a new excuse (votes = 0, created_at = now) and return the stored row.
    Create(String, RpcReplyPort<Result<Excuse, StoreError>>),

    /// Atomically add a delta to an excuse's tally. `None` when the id matches no row.
    Vote(i64, VoteDelta, RpcReplyPort<Result<Option<Excuse>, StoreError>>),

    /// Re-apply the (idempotent) schema.
    EnsureSchema(RpcReplyPort<Result<(), StoreError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list(&self, sort: SortKey) -> Result<Vec<Excuse>, StoreError> {
        ractor::call!(self.actor, DbActorMessage::List, sort)
            .map_err(|e| StoreError::Actor(format!("DbActor List RPC failed: {e}")))?
    }

    /// `text` must already be trimmed and non-empty; the store does not re-validate it.
    pub async fn create(&self, text: impl Into<String>) -> Result<Excuse, StoreError> {
        ractor::call!(self.actor, DbActorMessage::Create, text.into())
            .map_err(|e| StoreError::Actor(format!("DbActor Create RPC failed: {e}")))?
    }

    pub async fn vote(&self, id: i64, delta: VoteDelta) -> Result<Option<Excuse>, StoreError> {
        ractor::call!(self.actor, DbActorMessage::Vote, id, delta)
            .map_err(|e| StoreError::Actor(format!("DbActor Vote RPC failed: {e}")))?
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        ractor::call!(self.actor, DbActorMessage::EnsureSchema)
            .map_err(|e| StoreError::Actor(format!("DbActor EnsureSchema RPC failed: {e}")))?
    }

    /// Stop the actor and wait for it to close its pool. Later calls fail with [`StoreError::Actor`].
    pub async fn shutdown(&self) {
        if let Err(e) = self.actor.stop_and_wait(None, None).await {
            tracing::warn!(error = %e, "DbActor did not stop cleanly");
        }
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = DatabaseConfig;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        config: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(config.url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(config.busy_timeout())
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        // Startup migration: the actor only becomes reachable once the table exists.
        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!(database_url = %config.url, "DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::List(sort, reply) => {
                let res = self.list(&state.pool, sort).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Create(text, reply) => {
                let res = self.create(&state.pool, text).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Vote(id, delta, reply) => {
                let res = self.vote(&state.pool, id, delta).await;
                let _ = reply.send(res);
            }
            DbActorMessage::EnsureSchema(reply) => {
                let res = apply_schema(&state.pool).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list(&self, pool: &SqlitePool, sort: SortKey) -> Result<Vec<Excuse>, StoreError> {
        let rows = sqlx::query_as::<_, DbExcuse>(list_query(sort))
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Excuse::from).collect())
    }

    async fn create(&self, pool: &SqlitePool, text: String) -> Result<Excuse, StoreError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, DbExcuse>(INSERT_EXCUSE)
            .bind(text)
            .bind(now)
            .fetch_one(pool)
            .await?;

        debug!(id = row.id, "Excuse created");
        Ok(row.into())
    }

    /// Single `UPDATE ... SET votes = votes + ?` so concurrent votes on one row never lose updates.
    async fn vote(
        &self,
        pool: &SqlitePool,
        id: i64,
        delta: VoteDelta,
    ) -> Result<Option<Excuse>, StoreError> {
        let row = sqlx::query_as::<_, DbExcuse>(APPLY_VOTE)
            .bind(delta.as_i64())
            .bind(id)
            .fetch_optional(pool)
            .await?;

        if row.is_none() {
            debug!(id, "Vote matched no excuse");
        }
        Ok(row.map(Excuse::from))
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// Fails when the database cannot be opened or the schema cannot be applied.
pub async fn spawn(config: &DatabaseConfig) -> Result<DbActorHandle, StoreError> {
    let (actor, _jh) = Actor::spawn(None, DbActor, config.clone())
        .await
        .map_err(|e| StoreError::Spawn(e.to_string()))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        match sqlx::query(s).execute(pool).await {
            Ok(_) => {}
            Err(e) if is_already_exists(&e) => {
                debug!(error = %e, "Schema object already exists");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn is_already_exists(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.message().contains("already exists"))
}

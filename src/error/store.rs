use thiserror::Error as ThisError;

/// Failures talking to, or executing against, the excuse store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The RPC to the storage actor failed (actor stopped or reply dropped).
    #[error("Ractor error: {0}")]
    Actor(String),

    #[error("Storage actor failed to start: {0}")]
    Spawn(String),
}

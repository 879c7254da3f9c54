use crate::error::ApiError;
use crate::server::router::VoterState;
use axum::{Json, extract::State};
use excuse_schema::MessageBody;
use tracing::info;

/// GET /init
///
/// Explicit, idempotent schema trigger. The schema is already applied when the storage actor
/// starts, so this only re-runs `CREATE ... IF NOT EXISTS`.
pub async fn init_handler(State(state): State<VoterState>) -> Result<Json<MessageBody>, ApiError> {
    state
        .db
        .ensure_schema()
        .await
        .map_err(ApiError::storage("Failed to initialize database"))?;

    info!("Schema ensured via /init");
    Ok(Json(MessageBody::new("Database initialized successfully")))
}

use super::extract::{NewExcuse, VoteTarget};
use crate::error::ApiError;
use crate::server::router::VoterState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use excuse_schema::{Excuse, ListQuery};
use tracing::debug;

/// GET /excuses?sort=votes|recent
///
/// Unknown or unparsable `sort` values fall back to `votes`.
pub(super) async fn list_excuses_handler(
    State(state): State<VoterState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Excuse>>, ApiError> {
    let sort = query.map(|Query(q)| q.sort_key()).unwrap_or_default();

    let excuses = state
        .db
        .list(sort)
        .await
        .map_err(ApiError::storage("Failed to fetch excuses"))?;

    debug!(sort = sort.as_str(), count = excuses.len(), "Listed excuses");
    Ok(Json(excuses))
}

/// POST /excuses
pub(super) async fn create_excuse_handler(
    State(state): State<VoterState>,
    NewExcuse(text): NewExcuse,
) -> Result<(StatusCode, Json<Excuse>), ApiError> {
    let excuse = state
        .db
        .create(text)
        .await
        .map_err(ApiError::storage("Failed to create excuse"))?;

    Ok((StatusCode::CREATED, Json(excuse)))
}

/// POST /excuses/{id}/vote
///
/// Responds 200 with the updated excuse, or with `null` when the id matches no excuse.
pub(super) async fn vote_handler(
    State(state): State<VoterState>,
    VoteTarget { id, delta }: VoteTarget,
) -> Result<Json<Option<Excuse>>, ApiError> {
    let excuse = state
        .db
        .vote(id, delta)
        .await
        .map_err(ApiError::storage("Failed to vote on excuse"))?;

    debug!(id, delta = delta.as_i64(), found = excuse.is_some(), "Vote applied");
    Ok(Json(excuse))
}

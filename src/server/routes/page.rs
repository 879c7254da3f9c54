use crate::server::router::VoterState;
use crate::view::render_page;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use chrono::Utc;
use excuse_schema::ListQuery;
use tracing::warn;

/// GET /?sort=votes|recent
///
/// A storage failure still renders the page, with an empty list, the same way the client
/// script treats a failed refresh.
pub async fn index_handler(
    State(state): State<VoterState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Html<String> {
    let sort = query.map(|Query(q)| q.sort_key()).unwrap_or_default();

    let excuses = match state.db.list(sort).await {
        Ok(excuses) => excuses,
        Err(e) => {
            warn!(error = %e, "Rendering page without excuses");
            Vec::new()
        }
    };

    Html(render_page(&excuses, sort, Utc::now()))
}

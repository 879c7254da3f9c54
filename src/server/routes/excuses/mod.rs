use crate::server::router::VoterState;
use axum::{
    Router,
    routing::{get, post},
};

pub mod extract;
pub mod handlers;

pub const TEXT_REQUIRED: &str = "Text is required";
pub const INVALID_EXCUSE_ID: &str = "Invalid excuse ID";
pub const INVALID_DELTA: &str = "Delta must be 1 or -1";

pub fn router() -> Router<VoterState> {
    Router::new()
        .route(
            "/excuses",
            get(handlers::list_excuses_handler).post(handlers::create_excuse_handler),
        )
        .route("/excuses/{id}/vote", post(handlers::vote_handler))
}

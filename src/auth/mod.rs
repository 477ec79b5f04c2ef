use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod repo;
pub mod services;

/// Name of the HTTP-only cookie carrying the session token.
pub(crate) const SESSION_COOKIE: &str = "session";

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}

use crate::middleware::auth::{require_session, session_middleware};
use crate::state::AppState;
use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod distribution;
pub mod pages;
pub mod production;
pub mod sales;

/// Pages reachable without a session.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .merge(pages::public_router())
        .merge(auth::public_router())
}

/// Pages that redirect to `/login` when the `user_id` cookie is missing.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .merge(auth::protected_router())
        .merge(pages::protected_router())
        .merge(production::router())
        .merge(distribution::router())
        .merge(sales::router())
        .route_layer(middleware::from_fn(require_session))
}

pub fn create_app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .merge(public_router())
        .merge(protected_router())
        .nest_service("/styles", ServeDir::new(static_dir.join("styles")))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .layer(middleware::from_fn(session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

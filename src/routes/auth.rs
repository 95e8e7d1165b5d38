use crate::commands;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(commands::auth::login_page).post(commands::auth::login_user),
        )
        .route(
            "/register",
            get(commands::auth::register_page).post(commands::auth::register_user),
        )
        .route("/logout", get(commands::auth::logout))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/profile", get(commands::auth::profile))
}

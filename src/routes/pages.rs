use crate::commands;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(commands::pages::index))
        .route("/about_us", get(commands::pages::about_us))
        .route("/contact", get(commands::pages::contact))
        .route("/submit_success", get(commands::pages::submit_success))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/distribution", get(commands::pages::distribution))
}

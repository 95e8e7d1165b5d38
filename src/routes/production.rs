use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Crops
        .route("/crop", get(commands::production::crop_page))
        .route("/crop_detail", post(commands::production::register_crop))
        .route("/cultivation", get(commands::production::cultivation))
        .route(
            "/crop_update/:id",
            get(commands::production::crop_update_page)
                .post(commands::production::submit_crop_update),
        )
        .route(
            "/crop_delete/:id",
            get(commands::production::remove_crop),
        )
        // Harvests
        .route("/harvest/:crop_id", get(commands::production::harvest_page))
        .route(
            "/harvest_detail/:crop_id",
            post(commands::production::register_harvest),
        )
        .route("/harvested", get(commands::production::harvested))
        .route(
            "/harvest_update/:id",
            get(commands::production::harvest_update_page)
                .post(commands::production::submit_harvest_update),
        )
        // Silos
        .route("/silo", get(commands::production::silo_page))
        .route("/silo_detail", post(commands::production::register_silo))
        .route("/silocreation", get(commands::production::silo_list))
        .route(
            "/silo_update/:id",
            get(commands::production::silo_update_page)
                .post(commands::production::submit_silo_update),
        )
        .route(
            "/products_in_silo",
            get(commands::production::products_in_silo),
        )
}

use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Points of sale
        .route("/pos", get(commands::distribution::pos_page))
        .route("/pos_detail", post(commands::distribution::register_pos))
        .route("/pos_creation", get(commands::distribution::pos_list))
        .route(
            "/pos_update/:id",
            get(commands::distribution::pos_update_page)
                .post(commands::distribution::submit_pos_update),
        )
        // Vehicles
        .route("/vehicles", get(commands::distribution::vehicles_page))
        .route(
            "/vehicle_detail",
            post(commands::distribution::register_vehicle),
        )
        .route(
            "/vehicle_creation",
            get(commands::distribution::vehicle_list),
        )
        .route(
            "/vehicle_update/:id",
            get(commands::distribution::vehicle_update_page)
                .post(commands::distribution::submit_vehicle_update),
        )
        // Assignments
        .route(
            "/assignments",
            get(commands::distribution::assignments_page),
        )
        .route(
            "/assignment_detail",
            post(commands::distribution::register_assignment),
        )
        .route(
            "/assignment_creation",
            get(commands::distribution::assignment_list),
        )
        .route(
            "/assignment_update/:id",
            get(commands::distribution::assignment_update_page)
                .post(commands::distribution::submit_assignment_update),
        )
}

use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sales", get(commands::sales::sales_page))
        .route("/sales_detail", post(commands::sales::register_sale))
        .route("/sales_creation", get(commands::sales::sale_list))
        .route(
            "/sales_update/:id",
            get(commands::sales::sale_update_page).post(commands::sales::submit_sale_update),
        )
}

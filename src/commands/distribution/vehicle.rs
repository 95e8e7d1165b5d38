use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use serde::Deserialize;

use crate::commands::utils::failure_notice;
use crate::db::{DbPool, Vehicle};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, distribution, Notice};

#[derive(Debug, Deserialize)]
pub struct VehicleForm {
    #[serde(alias = "matricula")]
    pub plate: String,
    #[serde(alias = "capacidad_carga")]
    pub load_capacity: f64,
    #[serde(alias = "id_cosecha")]
    pub harvest_id: i64,
}

pub async fn get_vehicles(pool: &DbPool, user_id: i64) -> AgriResult<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>(
        "SELECT * FROM vehicles WHERE user_id = ? ORDER BY vehicle_id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(vehicles)
}

pub async fn find_vehicle(
    pool: &DbPool,
    user_id: i64,
    vehicle_id: i64,
) -> AgriResult<Option<Vehicle>> {
    let vehicle =
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vehicle_id = ? AND user_id = ?")
            .bind(vehicle_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(vehicle)
}

pub async fn save_vehicle(pool: &DbPool, user_id: i64, form: &VehicleForm) -> AgriResult<i64> {
    let mut tx = pool.begin().await?;
    let vehicle_id = sqlx::query(
        "INSERT INTO vehicles (plate, load_capacity, harvest_id, user_id) VALUES (?, ?, ?, ?)",
    )
    .bind(&form.plate)
    .bind(form.load_capacity)
    .bind(form.harvest_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(vehicle_id)
}

pub async fn update_vehicle(
    pool: &DbPool,
    user_id: i64,
    vehicle_id: i64,
    form: &VehicleForm,
) -> AgriResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE vehicles SET plate = ?, load_capacity = ?, harvest_id = ? WHERE vehicle_id = ? AND user_id = ?",
    )
    .bind(&form.plate)
    .bind(form.load_capacity)
    .bind(form.harvest_id)
    .bind(vehicle_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn vehicles_page() -> Html<String> {
    distribution::vehicle_form("/vehicle_detail", None, None)
}

pub async fn register_vehicle(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Form(form): Form<VehicleForm>,
) -> Html<String> {
    match save_vehicle(&state.pool, session.user_id, &form).await {
        Ok(vehicle_id) => {
            tracing::info!("User {} registered vehicle {}", session.user_id, vehicle_id);
            distribution::vehicle_detail(&Notice::message("Vehicle registered successfully!"))
        }
        Err(e) => {
            let notice = failure_notice("register", "vehicle", &e);
            distribution::vehicle_form("/vehicle_detail", Some(&notice), None)
        }
    }
}

pub async fn vehicle_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let vehicles = get_vehicles(&state.pool, session.user_id).await?;
    Ok(distribution::vehicle_list(&vehicles))
}

pub async fn vehicle_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(vehicle_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(vehicle) = find_vehicle(&state.pool, session.user_id, vehicle_id).await? else {
        return Ok(views::found("/vehicle_creation"));
    };
    let action = format!("/vehicle_update/{}", vehicle_id);
    Ok(distribution::vehicle_form(&action, None, Some(&vehicle)).into_response())
}

pub async fn submit_vehicle_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(vehicle_id): Path<i64>,
    Form(form): Form<VehicleForm>,
) -> AgriResult<Response> {
    let Some(vehicle) = find_vehicle(&state.pool, session.user_id, vehicle_id).await? else {
        return Ok(views::found("/vehicle_creation"));
    };

    match update_vehicle(&state.pool, session.user_id, vehicle_id, &form).await {
        Ok(()) => Ok(views::found("/vehicle_creation")),
        Err(e) => {
            let notice = failure_notice("update", "vehicle", &e);
            let action = format!("/vehicle_update/{}", vehicle_id);
            Ok(distribution::vehicle_form(&action, Some(&notice), Some(&vehicle)).into_response())
        }
    }
}

use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use serde::Deserialize;

use crate::commands::utils::failure_notice;
use crate::db::{DbPool, PointOfSale};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, distribution, Notice};

#[derive(Debug, Deserialize)]
pub struct PointOfSaleForm {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "direccion")]
    pub address: String,
}

pub async fn get_points_of_sale(pool: &DbPool, user_id: i64) -> AgriResult<Vec<PointOfSale>> {
    let points = sqlx::query_as::<_, PointOfSale>(
        "SELECT * FROM points_of_sale WHERE user_id = ? ORDER BY pos_id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(points)
}

pub async fn find_point_of_sale(
    pool: &DbPool,
    user_id: i64,
    pos_id: i64,
) -> AgriResult<Option<PointOfSale>> {
    let pos = sqlx::query_as::<_, PointOfSale>(
        "SELECT * FROM points_of_sale WHERE pos_id = ? AND user_id = ?",
    )
    .bind(pos_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(pos)
}

pub async fn save_point_of_sale(
    pool: &DbPool,
    user_id: i64,
    form: &PointOfSaleForm,
) -> AgriResult<i64> {
    let mut tx = pool.begin().await?;
    let pos_id =
        sqlx::query("INSERT INTO points_of_sale (name, address, user_id) VALUES (?, ?, ?)")
            .bind(&form.name)
            .bind(&form.address)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
    tx.commit().await?;
    Ok(pos_id)
}

pub async fn update_point_of_sale(
    pool: &DbPool,
    user_id: i64,
    pos_id: i64,
    form: &PointOfSaleForm,
) -> AgriResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE points_of_sale SET name = ?, address = ? WHERE pos_id = ? AND user_id = ?")
        .bind(&form.name)
        .bind(&form.address)
        .bind(pos_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn pos_page() -> Html<String> {
    distribution::pos_form("/pos_detail", None, None)
}

pub async fn register_pos(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Form(form): Form<PointOfSaleForm>,
) -> Html<String> {
    match save_point_of_sale(&state.pool, session.user_id, &form).await {
        Ok(pos_id) => {
            tracing::info!("User {} registered point of sale {}", session.user_id, pos_id);
            distribution::pos_detail(&Notice::message("Point of Sale registered successfully!"))
        }
        Err(e) => {
            let notice = failure_notice("register", "Point of Sale", &e);
            distribution::pos_form("/pos_detail", Some(&notice), None)
        }
    }
}

pub async fn pos_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let points = get_points_of_sale(&state.pool, session.user_id).await?;
    Ok(distribution::pos_list(&points))
}

pub async fn pos_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(pos_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(pos) = find_point_of_sale(&state.pool, session.user_id, pos_id).await? else {
        return Ok(views::found("/pos_creation"));
    };
    let action = format!("/pos_update/{}", pos_id);
    Ok(distribution::pos_form(&action, None, Some(&pos)).into_response())
}

pub async fn submit_pos_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(pos_id): Path<i64>,
    Form(form): Form<PointOfSaleForm>,
) -> AgriResult<Response> {
    let Some(pos) = find_point_of_sale(&state.pool, session.user_id, pos_id).await? else {
        return Ok(views::found("/pos_creation"));
    };

    match update_point_of_sale(&state.pool, session.user_id, pos_id, &form).await {
        Ok(()) => Ok(views::found("/pos_creation")),
        Err(e) => {
            let notice = failure_notice("update", "Point of Sale", &e);
            let action = format!("/pos_update/{}", pos_id);
            Ok(distribution::pos_form(&action, Some(&notice), Some(&pos)).into_response())
        }
    }
}

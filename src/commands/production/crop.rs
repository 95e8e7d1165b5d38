use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::commands::utils::{empty_string_as_none, failure_notice};
use crate::db::{Crop, DbPool};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, production, Notice};

pub const CROP_NOT_FOUND: &str = "Crop not found or unauthorized access.";

#[derive(Debug, Deserialize)]
pub struct CropForm {
    pub crop_type: String,
    pub area: f64,
    pub planting_date: NaiveDate,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub harvest_date: Option<NaiveDate>,
    pub growing_state: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub needs: Option<String>,
}

pub async fn get_crops(pool: &DbPool, user_id: i64) -> AgriResult<Vec<Crop>> {
    let crops =
        sqlx::query_as::<_, Crop>("SELECT * FROM crops WHERE user_id = ? ORDER BY crop_id ASC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(crops)
}

/// Only returns the crop when it belongs to `user_id`.
pub async fn find_crop(pool: &DbPool, user_id: i64, crop_id: i64) -> AgriResult<Option<Crop>> {
    let crop = sqlx::query_as::<_, Crop>("SELECT * FROM crops WHERE crop_id = ? AND user_id = ?")
        .bind(crop_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(crop)
}

pub async fn save_crop(pool: &DbPool, user_id: i64, form: &CropForm) -> AgriResult<i64> {
    let mut tx = pool.begin().await?;
    let crop_id = sqlx::query(
        "INSERT INTO crops (crop_type, cultivated_area, planting_date, harvest_date, growth_state, treatment_needs, user_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&form.crop_type)
    .bind(form.area)
    .bind(form.planting_date)
    .bind(form.harvest_date)
    .bind(&form.growing_state)
    .bind(&form.needs)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(crop_id)
}

pub async fn update_crop(
    pool: &DbPool,
    user_id: i64,
    crop_id: i64,
    form: &CropForm,
) -> AgriResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE crops SET crop_type = ?, cultivated_area = ?, planting_date = ?, harvest_date = ?,
            growth_state = ?, treatment_needs = ?
         WHERE crop_id = ? AND user_id = ?",
    )
    .bind(&form.crop_type)
    .bind(form.area)
    .bind(form.planting_date)
    .bind(form.harvest_date)
    .bind(&form.growing_state)
    .bind(&form.needs)
    .bind(crop_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

/// Deletes a crop together with its harvests and the silos filled from those harvests.
/// Returns `false` when the crop does not exist or belongs to someone else.
pub async fn delete_crop(pool: &DbPool, user_id: i64, crop_id: i64) -> AgriResult<bool> {
    let mut tx = pool.begin().await?;

    let owned: Option<i64> =
        sqlx::query_scalar("SELECT crop_id FROM crops WHERE crop_id = ? AND user_id = ?")
            .bind(crop_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Ok(false);
    }

    let silos = sqlx::query(
        "DELETE FROM silos WHERE harvest_id IN (SELECT harvest_id FROM harvests WHERE crop_id = ?)",
    )
    .bind(crop_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let harvests = sqlx::query("DELETE FROM harvests WHERE crop_id = ?")
        .bind(crop_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM crops WHERE crop_id = ? AND user_id = ?")
        .bind(crop_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(
        "Deleted crop {} with {} harvests and {} silos",
        crop_id,
        harvests,
        silos
    );
    Ok(true)
}

async fn cultivation_with_notice(
    pool: &DbPool,
    user_id: i64,
    notice: &Notice,
) -> AgriResult<Response> {
    let crops = get_crops(pool, user_id).await?;
    Ok(production::cultivation(&crops, Some(notice)).into_response())
}

pub async fn crop_page() -> Html<String> {
    production::crop_form("/crop_detail", None, None)
}

pub async fn register_crop(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Form(form): Form<CropForm>,
) -> Html<String> {
    match save_crop(&state.pool, session.user_id, &form).await {
        Ok(crop_id) => {
            tracing::info!("User {} registered crop {}", session.user_id, crop_id);
            production::crop_detail(&Notice::message("Crop registered successfully!"))
        }
        Err(e) => {
            let notice = failure_notice("register", "crop", &e);
            production::crop_form("/crop_detail", Some(&notice), None)
        }
    }
}

pub async fn cultivation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let crops = get_crops(&state.pool, session.user_id).await?;
    Ok(production::cultivation(&crops, None))
}

pub async fn crop_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(crop_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(crop) = find_crop(&state.pool, session.user_id, crop_id).await? else {
        return Ok(views::found("/cultivation"));
    };
    let action = format!("/crop_update/{}", crop_id);
    Ok(production::crop_form(&action, None, Some(&crop)).into_response())
}

pub async fn submit_crop_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(crop_id): Path<i64>,
    Form(form): Form<CropForm>,
) -> AgriResult<Response> {
    let Some(crop) = find_crop(&state.pool, session.user_id, crop_id).await? else {
        return Ok(views::found("/cultivation"));
    };

    match update_crop(&state.pool, session.user_id, crop_id, &form).await {
        Ok(()) => {
            tracing::info!("User {} updated crop {}", session.user_id, crop_id);
            let notice = Notice::message("Crop updated successfully!");
            cultivation_with_notice(&state.pool, session.user_id, &notice).await
        }
        Err(e) => {
            let notice = failure_notice("update", "crop", &e);
            let action = format!("/crop_update/{}", crop_id);
            Ok(production::crop_form(&action, Some(&notice), Some(&crop)).into_response())
        }
    }
}

pub async fn remove_crop(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(crop_id): Path<i64>,
) -> AgriResult<Response> {
    match delete_crop(&state.pool, session.user_id, crop_id).await {
        Ok(true) => Ok(views::found("/cultivation")),
        Ok(false) => {
            cultivation_with_notice(&state.pool, session.user_id, &Notice::error(CROP_NOT_FOUND))
                .await
        }
        Err(e) => {
            let notice = failure_notice("delete", "crop", &e);
            cultivation_with_notice(&state.pool, session.user_id, &notice).await
        }
    }
}

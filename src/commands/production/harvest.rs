use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use chrono::NaiveDate;
use serde::Deserialize;

use super::crop::{find_crop, get_crops, CROP_NOT_FOUND};
use crate::commands::utils::failure_notice;
use crate::db::{DbPool, Harvest};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, production, Notice};

#[derive(Debug, Deserialize)]
pub struct HarvestForm {
    pub harvest_date: NaiveDate,
    pub quantity: f64,
    pub area: f64,
}

pub async fn get_harvests(pool: &DbPool, user_id: i64) -> AgriResult<Vec<Harvest>> {
    let harvests = sqlx::query_as::<_, Harvest>(
        "SELECT * FROM harvests WHERE user_id = ? ORDER BY harvest_date DESC, harvest_id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(harvests)
}

pub async fn find_harvest(
    pool: &DbPool,
    user_id: i64,
    harvest_id: i64,
) -> AgriResult<Option<Harvest>> {
    let harvest =
        sqlx::query_as::<_, Harvest>("SELECT * FROM harvests WHERE harvest_id = ? AND user_id = ?")
            .bind(harvest_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(harvest)
}

pub async fn save_harvest(
    pool: &DbPool,
    user_id: i64,
    crop_id: i64,
    form: &HarvestForm,
) -> AgriResult<i64> {
    let mut tx = pool.begin().await?;
    let harvest_id = sqlx::query(
        "INSERT INTO harvests (harvest_date, quantity, area, crop_id, user_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(form.harvest_date)
    .bind(form.quantity)
    .bind(form.area)
    .bind(crop_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(harvest_id)
}

pub async fn update_harvest(
    pool: &DbPool,
    user_id: i64,
    harvest_id: i64,
    form: &HarvestForm,
) -> AgriResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE harvests SET harvest_date = ?, quantity = ?, area = ? WHERE harvest_id = ? AND user_id = ?",
    )
    .bind(form.harvest_date)
    .bind(form.quantity)
    .bind(form.area)
    .bind(harvest_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn harvest_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(crop_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(crop) = find_crop(&state.pool, session.user_id, crop_id).await? else {
        return Ok(views::found("/cultivation"));
    };
    let action = format!("/harvest_detail/{}", crop_id);
    Ok(production::harvest_form(&action, None, Some(&crop), None).into_response())
}

pub async fn register_harvest(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(crop_id): Path<i64>,
    Form(form): Form<HarvestForm>,
) -> AgriResult<Response> {
    // Harvests may only be recorded against the caller's own crops.
    let Some(crop) = find_crop(&state.pool, session.user_id, crop_id).await? else {
        let crops = get_crops(&state.pool, session.user_id).await?;
        let notice = Notice::error(CROP_NOT_FOUND);
        return Ok(production::cultivation(&crops, Some(&notice)).into_response());
    };

    match save_harvest(&state.pool, session.user_id, crop_id, &form).await {
        Ok(harvest_id) => {
            tracing::info!(
                "User {} registered harvest {} for crop {}",
                session.user_id,
                harvest_id,
                crop_id
            );
            Ok(views::found("/harvested"))
        }
        Err(e) => {
            let notice = failure_notice("register", "harvest", &e);
            let action = format!("/harvest_detail/{}", crop_id);
            Ok(production::harvest_form(&action, Some(&notice), Some(&crop), None).into_response())
        }
    }
}

pub async fn harvested(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let harvests = get_harvests(&state.pool, session.user_id).await?;
    Ok(production::harvested(&harvests))
}

pub async fn harvest_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(harvest_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(harvest) = find_harvest(&state.pool, session.user_id, harvest_id).await? else {
        return Ok(views::found("/harvested"));
    };
    let action = format!("/harvest_update/{}", harvest_id);
    Ok(production::harvest_form(&action, None, None, Some(&harvest)).into_response())
}

pub async fn submit_harvest_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(harvest_id): Path<i64>,
    Form(form): Form<HarvestForm>,
) -> AgriResult<Response> {
    let Some(harvest) = find_harvest(&state.pool, session.user_id, harvest_id).await? else {
        return Ok(views::found("/harvested"));
    };

    match update_harvest(&state.pool, session.user_id, harvest_id, &form).await {
        Ok(()) => Ok(views::found("/harvested")),
        Err(e) => {
            let notice = failure_notice("update", "harvest", &e);
            let action = format!("/harvest_update/{}", harvest_id);
            Ok(production::harvest_form(&action, Some(&notice), None, Some(&harvest)).into_response())
        }
    }
}

use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::commands::utils::failure_notice;
use crate::db::{Assignment, DbPool};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, distribution, Notice};

#[derive(Debug, Deserialize)]
pub struct AssignmentForm {
    #[serde(alias = "fecha")]
    pub assignment_date: NaiveDate,
    #[serde(alias = "cantidad_producto")]
    pub product_quantity: f64,
    #[serde(alias = "id_vehiculo")]
    pub vehicle_id: i64,
    #[serde(alias = "punto_venta_id")]
    pub pos_id: i64,
}

pub async fn get_assignments(pool: &DbPool, user_id: i64) -> AgriResult<Vec<Assignment>> {
    let assignments = sqlx::query_as::<_, Assignment>(
        "SELECT * FROM assignments WHERE user_id = ? ORDER BY assignment_date DESC, assignment_id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(assignments)
}

pub async fn find_assignment(
    pool: &DbPool,
    user_id: i64,
    assignment_id: i64,
) -> AgriResult<Option<Assignment>> {
    let assignment = sqlx::query_as::<_, Assignment>(
        "SELECT * FROM assignments WHERE assignment_id = ? AND user_id = ?",
    )
    .bind(assignment_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(assignment)
}

pub async fn save_assignment(pool: &DbPool, user_id: i64, form: &AssignmentForm) -> AgriResult<i64> {
    let mut tx = pool.begin().await?;
    let assignment_id = sqlx::query(
        "INSERT INTO assignments (assignment_date, product_quantity, vehicle_id, pos_id, user_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(form.assignment_date)
    .bind(form.product_quantity)
    .bind(form.vehicle_id)
    .bind(form.pos_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(assignment_id)
}

pub async fn update_assignment(
    pool: &DbPool,
    user_id: i64,
    assignment_id: i64,
    form: &AssignmentForm,
) -> AgriResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE assignments SET assignment_date = ?, product_quantity = ?, vehicle_id = ?, pos_id = ?
         WHERE assignment_id = ? AND user_id = ?",
    )
    .bind(form.assignment_date)
    .bind(form.product_quantity)
    .bind(form.vehicle_id)
    .bind(form.pos_id)
    .bind(assignment_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn assignments_page() -> Html<String> {
    distribution::assignment_form("/assignment_detail", None, None)
}

pub async fn register_assignment(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Form(form): Form<AssignmentForm>,
) -> Html<String> {
    match save_assignment(&state.pool, session.user_id, &form).await {
        Ok(assignment_id) => {
            tracing::info!(
                "User {} registered assignment {} (vehicle {} -> point of sale {})",
                session.user_id,
                assignment_id,
                form.vehicle_id,
                form.pos_id
            );
            distribution::assignment_detail(&Notice::message("Assignment registered successfully!"))
        }
        Err(e) => {
            let notice = failure_notice("register", "assignment", &e);
            distribution::assignment_form("/assignment_detail", Some(&notice), None)
        }
    }
}

pub async fn assignment_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let assignments = get_assignments(&state.pool, session.user_id).await?;
    Ok(distribution::assignment_list(&assignments))
}

pub async fn assignment_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(assignment_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(assignment) = find_assignment(&state.pool, session.user_id, assignment_id).await?
    else {
        return Ok(views::found("/assignment_creation"));
    };
    let action = format!("/assignment_update/{}", assignment_id);
    Ok(distribution::assignment_form(&action, None, Some(&assignment)).into_response())
}

pub async fn submit_assignment_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(assignment_id): Path<i64>,
    Form(form): Form<AssignmentForm>,
) -> AgriResult<Response> {
    let Some(assignment) = find_assignment(&state.pool, session.user_id, assignment_id).await?
    else {
        return Ok(views::found("/assignment_creation"));
    };

    match update_assignment(&state.pool, session.user_id, assignment_id, &form).await {
        Ok(()) => Ok(views::found("/assignment_creation")),
        Err(e) => {
            let notice = failure_notice("update", "assignment", &e);
            let action = format!("/assignment_update/{}", assignment_id);
            Ok(
                distribution::assignment_form(&action, Some(&notice), Some(&assignment))
                    .into_response(),
            )
        }
    }
}

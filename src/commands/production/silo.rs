use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use serde::Deserialize;

use crate::commands::utils::failure_notice;
use crate::db::{DbPool, Silo};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, production, Notice};

#[derive(Debug, Deserialize)]
pub struct SiloForm {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "capacidad")]
    pub capacity: f64,
    #[serde(alias = "contenido")]
    pub content: f64,
    #[serde(alias = "id_cosecha")]
    pub harvest_id: i64,
}

pub async fn get_silos(pool: &DbPool, user_id: i64) -> AgriResult<Vec<Silo>> {
    let silos =
        sqlx::query_as::<_, Silo>("SELECT * FROM silos WHERE user_id = ? ORDER BY silo_id ASC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(silos)
}

pub async fn find_silo(pool: &DbPool, user_id: i64, silo_id: i64) -> AgriResult<Option<Silo>> {
    let silo = sqlx::query_as::<_, Silo>("SELECT * FROM silos WHERE silo_id = ? AND user_id = ?")
        .bind(silo_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(silo)
}

pub async fn save_silo(pool: &DbPool, user_id: i64, form: &SiloForm) -> AgriResult<i64> {
    let mut tx = pool.begin().await?;
    let silo_id = sqlx::query(
        "INSERT INTO silos (name, capacity, content, harvest_id, user_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&form.name)
    .bind(form.capacity)
    .bind(form.content)
    .bind(form.harvest_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(silo_id)
}

pub async fn update_silo(
    pool: &DbPool,
    user_id: i64,
    silo_id: i64,
    form: &SiloForm,
) -> AgriResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE silos SET name = ?, capacity = ?, content = ?, harvest_id = ? WHERE silo_id = ? AND user_id = ?",
    )
    .bind(&form.name)
    .bind(form.capacity)
    .bind(form.content)
    .bind(form.harvest_id)
    .bind(silo_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn silo_page() -> Html<String> {
    production::silo_form("/silo_detail", None, None)
}

pub async fn register_silo(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Form(form): Form<SiloForm>,
) -> Html<String> {
    let notice = match save_silo(&state.pool, session.user_id, &form).await {
        Ok(silo_id) => {
            tracing::info!("User {} registered silo {}", session.user_id, silo_id);
            Notice::message("Silo registered successfully!")
        }
        Err(e) => failure_notice("register", "silo", &e),
    };
    production::silo_form("/silo_detail", Some(&notice), None)
}

pub async fn silo_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let silos = get_silos(&state.pool, session.user_id).await?;
    Ok(production::silo_list(&silos))
}

pub async fn products_in_silo(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let silos = get_silos(&state.pool, session.user_id).await?;
    Ok(production::products_in_silo(&silos))
}

pub async fn silo_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(silo_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(silo) = find_silo(&state.pool, session.user_id, silo_id).await? else {
        return Ok(views::found("/silocreation"));
    };
    let action = format!("/silo_update/{}", silo_id);
    Ok(production::silo_form(&action, None, Some(&silo)).into_response())
}

pub async fn submit_silo_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(silo_id): Path<i64>,
    Form(form): Form<SiloForm>,
) -> AgriResult<Response> {
    let Some(silo) = find_silo(&state.pool, session.user_id, silo_id).await? else {
        return Ok(views::found("/silocreation"));
    };

    match update_silo(&state.pool, session.user_id, silo_id, &form).await {
        Ok(()) => Ok(views::found("/silocreation")),
        Err(e) => {
            let notice = failure_notice("update", "silo", &e);
            let action = format!("/silo_update/{}", silo_id);
            Ok(production::silo_form(&action, Some(&notice), Some(&silo)).into_response())
        }
    }
}

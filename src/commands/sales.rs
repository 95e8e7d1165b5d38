use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::commands::utils::failure_notice;
use crate::db::{price_to_db, DbPool, Sale};
use crate::error::AgriResult;
use crate::state::{AppState, SessionState};
use crate::views::{self, sales, Notice};

#[derive(Debug, Deserialize)]
pub struct SaleForm {
    #[serde(alias = "fecha")]
    pub sale_date: NaiveDate,
    #[serde(alias = "cantidad_vendida")]
    pub quantity_sold: f64,
    #[serde(alias = "precio")]
    pub price: Decimal,
    #[serde(alias = "id_punto_venta")]
    pub pos_id: i64,
}

pub async fn get_sales(pool: &DbPool, user_id: i64) -> AgriResult<Vec<Sale>> {
    let sales = sqlx::query_as::<_, Sale>(
        "SELECT * FROM sales WHERE user_id = ? ORDER BY sale_date DESC, sale_id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(sales)
}

pub async fn find_sale(pool: &DbPool, user_id: i64, sale_id: i64) -> AgriResult<Option<Sale>> {
    let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE sale_id = ? AND user_id = ?")
        .bind(sale_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(sale)
}

pub async fn save_sale(pool: &DbPool, user_id: i64, form: &SaleForm) -> AgriResult<i64> {
    let price = price_to_db(form.price)?;
    let mut tx = pool.begin().await?;
    let sale_id = sqlx::query(
        "INSERT INTO sales (sale_date, quantity_sold, price, pos_id, user_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(form.sale_date)
    .bind(form.quantity_sold)
    .bind(&price)
    .bind(form.pos_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(sale_id)
}

pub async fn update_sale(
    pool: &DbPool,
    user_id: i64,
    sale_id: i64,
    form: &SaleForm,
) -> AgriResult<()> {
    let price = price_to_db(form.price)?;
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE sales SET sale_date = ?, quantity_sold = ?, price = ?, pos_id = ? WHERE sale_id = ? AND user_id = ?",
    )
    .bind(form.sale_date)
    .bind(form.quantity_sold)
    .bind(&price)
    .bind(form.pos_id)
    .bind(sale_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn sales_page() -> Html<String> {
    sales::sale_form("/sales_detail", None, None)
}

pub async fn register_sale(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Form(form): Form<SaleForm>,
) -> Html<String> {
    match save_sale(&state.pool, session.user_id, &form).await {
        Ok(sale_id) => {
            tracing::info!("User {} registered sale {}", session.user_id, sale_id);
            sales::sale_detail(&Notice::message("Sale registered successfully!"))
        }
        Err(e) => {
            let notice = failure_notice("register", "sale", &e);
            sales::sale_form("/sales_detail", Some(&notice), None)
        }
    }
}

pub async fn sale_list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Html<String>> {
    let records = get_sales(&state.pool, session.user_id).await?;
    Ok(sales::sale_list(&records))
}

pub async fn sale_update_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(sale_id): Path<i64>,
) -> AgriResult<Response> {
    let Some(sale) = find_sale(&state.pool, session.user_id, sale_id).await? else {
        return Ok(views::found("/sales_creation"));
    };
    let action = format!("/sales_update/{}", sale_id);
    Ok(sales::sale_form(&action, None, Some(&sale)).into_response())
}

pub async fn submit_sale_update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
    Path(sale_id): Path<i64>,
    Form(form): Form<SaleForm>,
) -> AgriResult<Response> {
    let Some(sale) = find_sale(&state.pool, session.user_id, sale_id).await? else {
        return Ok(views::found("/sales_creation"));
    };

    match update_sale(&state.pool, session.user_id, sale_id, &form).await {
        Ok(()) => Ok(views::found("/sales_creation")),
        Err(e) => {
            let notice = failure_notice("update", "sale", &e);
            let action = format!("/sales_update/{}", sale_id);
            Ok(sales::sale_form(&action, Some(&notice), Some(&sale)).into_response())
        }
    }
}

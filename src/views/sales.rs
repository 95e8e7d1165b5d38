use axum::response::Html;

use super::{confirmation, form, link, page, table, Field, Input, Notice};
use crate::db::Sale;

pub fn sale_form(action: &str, notice: Option<&Notice>, sale: Option<&Sale>) -> Html<String> {
    let (title, submit) = match sale {
        Some(_) => ("Update Sale", "Update"),
        None => ("Sales", "Register sale"),
    };
    let fields = [
        Field::new("Date", "sale_date", Input::Date)
            .value(sale.map(|s| s.sale_date.to_string()).unwrap_or_default()),
        Field::new("Quantity sold", "quantity_sold", Input::Number)
            .value(sale.map(|s| s.quantity_sold.to_string()).unwrap_or_default()),
        Field::new("Price", "price", Input::Number)
            .value(sale.map(|s| s.price.to_string()).unwrap_or_default()),
        Field::new("Point of sale id", "pos_id", Input::Number)
            .value(sale.map(|s| s.pos_id.to_string()).unwrap_or_default()),
    ];
    page(title, true, notice, &form(action, &fields, submit))
}

pub fn sale_detail(notice: &Notice) -> Html<String> {
    confirmation(
        "Sale Details",
        notice,
        &[
            ("/sales_creation", "See all sales"),
            ("/sales", "Register another sale"),
        ],
    )
}

pub fn sale_list(sales: &[Sale]) -> Html<String> {
    let rows: Vec<Vec<String>> = sales
        .iter()
        .map(|s| {
            vec![
                s.sale_id.to_string(),
                s.sale_date.to_string(),
                s.quantity_sold.to_string(),
                format!("{:.2}", s.price),
                s.pos_id.to_string(),
                link(&format!("/sales_update/{}", s.sale_id), "Update"),
            ]
        })
        .collect();
    let body = format!(
        "<p>{}</p>{}",
        link("/sales", "Register a sale"),
        table(
            &["Id", "Date", "Quantity", "Price", "Point of sale", "Actions"],
            &rows
        )
    );
    page("Sales Record", true, None, &body)
}

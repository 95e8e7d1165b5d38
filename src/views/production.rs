use axum::response::Html;

use super::{confirmation, date_or_blank, escape, form, link, page, table, Field, Input, Notice};
use crate::db::{Crop, Harvest, Silo};

pub fn crop_form(action: &str, notice: Option<&Notice>, crop: Option<&Crop>) -> Html<String> {
    let (title, submit) = match crop {
        Some(_) => ("Update Crop", "Update"),
        None => ("Crop", "Register crop"),
    };
    let fields = [
        Field::new("Crop type", "crop_type", Input::Text)
            .value(crop.map(|c| c.crop_type.as_str()).unwrap_or("")),
        Field::new("Cultivated area", "area", Input::Number)
            .value(crop.map(|c| c.cultivated_area.to_string()).unwrap_or_default()),
        Field::new("Planting date", "planting_date", Input::Date)
            .value(crop.map(|c| c.planting_date.to_string()).unwrap_or_default()),
        Field::new("Harvest date", "harvest_date", Input::Date)
            .value(date_or_blank(crop.and_then(|c| c.harvest_date)))
            .optional(),
        Field::new("Growth state", "growing_state", Input::Text)
            .value(crop.map(|c| c.growth_state.as_str()).unwrap_or("")),
        Field::new("Treatment needs", "needs", Input::TextArea)
            .value(crop.and_then(|c| c.treatment_needs.as_deref()).unwrap_or(""))
            .optional(),
    ];
    page(title, true, notice, &form(action, &fields, submit))
}

pub fn crop_detail(notice: &Notice) -> Html<String> {
    confirmation(
        "Crop Details",
        notice,
        &[
            ("/cultivation", "See all crops"),
            ("/crop", "Register another crop"),
        ],
    )
}

pub fn cultivation(crops: &[Crop], notice: Option<&Notice>) -> Html<String> {
    let rows: Vec<Vec<String>> = crops
        .iter()
        .map(|c| {
            vec![
                c.crop_id.to_string(),
                escape(&c.crop_type),
                c.cultivated_area.to_string(),
                c.planting_date.to_string(),
                date_or_blank(c.harvest_date),
                escape(&c.growth_state),
                escape(c.treatment_needs.as_deref().unwrap_or("")),
                format!(
                    "{} {} {}",
                    link(&format!("/harvest/{}", c.crop_id), "Harvest"),
                    link(&format!("/crop_update/{}", c.crop_id), "Update"),
                    link(&format!("/crop_delete/{}", c.crop_id), "Delete"),
                ),
            ]
        })
        .collect();
    let body = format!(
        "<p>{}</p>{}",
        link("/crop", "Register a crop"),
        table(
            &[
                "Id",
                "Type",
                "Area",
                "Planting date",
                "Harvest date",
                "Growth state",
                "Treatment needs",
                "Actions",
            ],
            &rows,
        )
    );
    page("Cultivation", true, notice, &body)
}

pub fn harvest_form(
    action: &str,
    notice: Option<&Notice>,
    crop: Option<&Crop>,
    harvest: Option<&Harvest>,
) -> Html<String> {
    let title = match harvest {
        Some(_) => "Update Harvest",
        None => "Harvest",
    };
    let intro = crop
        .map(|c| {
            format!(
                "<p>Crop #{}: {} ({} planted)</p>",
                c.crop_id,
                escape(&c.crop_type),
                c.cultivated_area
            )
        })
        .unwrap_or_default();
    let fields = [
        Field::new("Harvest date", "harvest_date", Input::Date)
            .value(harvest.map(|h| h.harvest_date.to_string()).unwrap_or_default()),
        Field::new("Quantity", "quantity", Input::Number)
            .value(harvest.map(|h| h.quantity.to_string()).unwrap_or_default()),
        Field::new("Area", "area", Input::Number)
            .value(harvest.map(|h| h.area.to_string()).unwrap_or_default()),
    ];
    let body = format!("{intro}{}", form(action, &fields, "Save harvest"));
    page(title, true, notice, &body)
}

pub fn harvested(harvests: &[Harvest]) -> Html<String> {
    let rows: Vec<Vec<String>> = harvests
        .iter()
        .map(|h| {
            vec![
                h.harvest_id.to_string(),
                h.harvest_date.to_string(),
                h.quantity.to_string(),
                h.area.to_string(),
                h.crop_id.to_string(),
                link(&format!("/harvest_update/{}", h.harvest_id), "Update"),
            ]
        })
        .collect();
    let body = table(
        &["Id", "Harvest date", "Quantity", "Area", "Crop", "Actions"],
        &rows,
    );
    page("Harvests", true, None, &body)
}

pub fn silo_form(action: &str, notice: Option<&Notice>, silo: Option<&Silo>) -> Html<String> {
    let (title, submit) = match silo {
        Some(_) => ("Update Silo", "Update"),
        None => ("Silo", "Register silo"),
    };
    let fields = [
        Field::new("Name", "name", Input::Text).value(silo.map(|s| s.name.as_str()).unwrap_or("")),
        Field::new("Capacity", "capacity", Input::Number)
            .value(silo.map(|s| s.capacity.to_string()).unwrap_or_default()),
        Field::new("Content", "content", Input::Number)
            .value(silo.map(|s| s.content.to_string()).unwrap_or_default()),
        Field::new("Harvest id", "harvest_id", Input::Number)
            .value(silo.map(|s| s.harvest_id.to_string()).unwrap_or_default()),
    ];
    let body = format!(
        "{}<p>{}</p>",
        form(action, &fields, submit),
        link("/silocreation", "See all silos")
    );
    page(title, true, notice, &body)
}

pub fn silo_list(silos: &[Silo]) -> Html<String> {
    let rows: Vec<Vec<String>> = silos
        .iter()
        .map(|s| {
            vec![
                s.silo_id.to_string(),
                escape(&s.name),
                s.capacity.to_string(),
                s.content.to_string(),
                s.harvest_id.to_string(),
                link(&format!("/silo_update/{}", s.silo_id), "Update"),
            ]
        })
        .collect();
    let body = format!(
        "<p>{}</p>{}",
        link("/silo", "Register a silo"),
        table(
            &["Id", "Name", "Capacity", "Content", "Harvest", "Actions"],
            &rows
        )
    );
    page("Silos", true, None, &body)
}

pub fn products_in_silo(silos: &[Silo]) -> Html<String> {
    let rows: Vec<Vec<String>> = silos
        .iter()
        .map(|s| {
            vec![
                escape(&s.name),
                s.content.to_string(),
                s.capacity.to_string(),
                format!("{:.1}%", s.fill_percent()),
            ]
        })
        .collect();
    let body = table(&["Silo", "Content", "Capacity", "Fill"], &rows);
    page("Products in Silo", true, None, &body)
}

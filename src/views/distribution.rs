use axum::response::Html;

use super::{confirmation, escape, form, link, page, table, Field, Input, Notice};
use crate::db::{Assignment, PointOfSale, Vehicle};

pub fn hub() -> Html<String> {
    let body = format!(
        "<ul><li>{}</li><li>{}</li><li>{}</li><li>{}</li></ul>",
        link("/vehicle_creation", "Vehicles"),
        link("/assignment_creation", "Delivery assignments"),
        link("/pos_creation", "Points of sale"),
        link("/products_in_silo", "Products in silo"),
    );
    page("Distribution", true, None, &body)
}

pub fn pos_form(action: &str, notice: Option<&Notice>, pos: Option<&PointOfSale>) -> Html<String> {
    let (title, submit) = match pos {
        Some(_) => ("Update Point of Sale", "Update"),
        None => ("Point of Sale", "Register point of sale"),
    };
    let fields = [
        Field::new("Name", "name", Input::Text).value(pos.map(|p| p.name.as_str()).unwrap_or("")),
        Field::new("Address", "address", Input::Text)
            .value(pos.map(|p| p.address.as_str()).unwrap_or("")),
    ];
    page(title, true, notice, &form(action, &fields, submit))
}

pub fn pos_detail(notice: &Notice) -> Html<String> {
    confirmation(
        "Point of Sale Details",
        notice,
        &[
            ("/pos_creation", "See all points of sale"),
            ("/pos", "Register another point of sale"),
        ],
    )
}

pub fn pos_list(points: &[PointOfSale]) -> Html<String> {
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.pos_id.to_string(),
                escape(&p.name),
                escape(&p.address),
                link(&format!("/pos_update/{}", p.pos_id), "Update"),
            ]
        })
        .collect();
    let body = format!(
        "<p>{}</p>{}",
        link("/pos", "Register a point of sale"),
        table(&["Id", "Name", "Address", "Actions"], &rows)
    );
    page("Points of Sale", true, None, &body)
}

pub fn vehicle_form(action: &str, notice: Option<&Notice>, vehicle: Option<&Vehicle>) -> Html<String> {
    let (title, submit) = match vehicle {
        Some(_) => ("Update Vehicle", "Update"),
        None => ("Vehicles", "Register vehicle"),
    };
    let fields = [
        Field::new("Plate", "plate", Input::Text)
            .value(vehicle.map(|v| v.plate.as_str()).unwrap_or("")),
        Field::new("Load capacity", "load_capacity", Input::Number)
            .value(vehicle.map(|v| v.load_capacity.to_string()).unwrap_or_default()),
        Field::new("Harvest id", "harvest_id", Input::Number)
            .value(vehicle.map(|v| v.harvest_id.to_string()).unwrap_or_default()),
    ];
    page(title, true, notice, &form(action, &fields, submit))
}

pub fn vehicle_detail(notice: &Notice) -> Html<String> {
    confirmation(
        "Vehicle Details",
        notice,
        &[
            ("/vehicle_creation", "See all vehicles"),
            ("/vehicles", "Register another vehicle"),
        ],
    )
}

pub fn vehicle_list(vehicles: &[Vehicle]) -> Html<String> {
    let rows: Vec<Vec<String>> = vehicles
        .iter()
        .map(|v| {
            vec![
                v.vehicle_id.to_string(),
                escape(&v.plate),
                v.load_capacity.to_string(),
                v.harvest_id.to_string(),
                link(&format!("/vehicle_update/{}", v.vehicle_id), "Update"),
            ]
        })
        .collect();
    let body = format!(
        "<p>{}</p>{}",
        link("/vehicles", "Register a vehicle"),
        table(&["Id", "Plate", "Load capacity", "Harvest", "Actions"], &rows)
    );
    page("Vehicle Fleet", true, None, &body)
}

pub fn assignment_form(
    action: &str,
    notice: Option<&Notice>,
    assignment: Option<&Assignment>,
) -> Html<String> {
    let (title, submit) = match assignment {
        Some(_) => ("Update Assignment", "Update"),
        None => ("Assignments", "Register assignment"),
    };
    let fields = [
        Field::new("Date", "assignment_date", Input::Date)
            .value(assignment.map(|a| a.assignment_date.to_string()).unwrap_or_default()),
        Field::new("Product quantity", "product_quantity", Input::Number)
            .value(assignment.map(|a| a.product_quantity.to_string()).unwrap_or_default()),
        Field::new("Vehicle id", "vehicle_id", Input::Number)
            .value(assignment.map(|a| a.vehicle_id.to_string()).unwrap_or_default()),
        Field::new("Point of sale id", "pos_id", Input::Number)
            .value(assignment.map(|a| a.pos_id.to_string()).unwrap_or_default()),
    ];
    page(title, true, notice, &form(action, &fields, submit))
}

pub fn assignment_detail(notice: &Notice) -> Html<String> {
    confirmation(
        "Assignment Details",
        notice,
        &[
            ("/assignment_creation", "See all assignments"),
            ("/assignments", "Register another assignment"),
        ],
    )
}

pub fn assignment_list(assignments: &[Assignment]) -> Html<String> {
    let rows: Vec<Vec<String>> = assignments
        .iter()
        .map(|a| {
            vec![
                a.assignment_id.to_string(),
                a.assignment_date.to_string(),
                a.product_quantity.to_string(),
                a.vehicle_id.to_string(),
                a.pos_id.to_string(),
                link(&format!("/assignment_update/{}", a.assignment_id), "Update"),
            ]
        })
        .collect();
    let body = format!(
        "<p>{}</p>{}",
        link("/assignments", "Register an assignment"),
        table(
            &["Id", "Date", "Quantity", "Vehicle", "Point of sale", "Actions"],
            &rows
        )
    );
    page("Delivery Assignments", true, None, &body)
}

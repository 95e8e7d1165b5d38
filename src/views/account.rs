use axum::response::Html;

use super::{escape, form, page, Field, Input, Notice};
use crate::db::User;

pub fn index(logged_in: bool) -> Html<String> {
    let body = if logged_in {
        "<p>Welcome back. Keep your crops, harvests, silos and deliveries up to date.</p>\
<ul><li><a href=\"/crop\">Register a crop</a></li>\
<li><a href=\"/silo\">Register a silo</a></li>\
<li><a href=\"/distribution\">Plan distribution</a></li>\
<li><a href=\"/sales\">Record a sale</a></li></ul>"
    } else {
        "<p>Welcome to AgriRecord, the record book for small farms.</p>\
<p><a href=\"/register\">Create an account</a> or <a href=\"/login\">log in</a> to start.</p>"
    };
    page("Welcome", logged_in, None, body)
}

pub fn login(notice: Option<&Notice>) -> Html<String> {
    let body = form(
        "/login",
        &[
            Field::new("Email", "email", Input::Email),
            Field::new("Password", "password", Input::Password),
        ],
        "Login",
    );
    page("Login", false, notice, &body)
}

pub struct RegisterValues<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

pub fn register(notice: Option<&Notice>, values: Option<RegisterValues<'_>>) -> Html<String> {
    let values = values.unwrap_or(RegisterValues {
        first_name: "",
        last_name: "",
        email: "",
        phone: "",
    });
    let body = form(
        "/register",
        &[
            Field::new("First Name", "first_name", Input::Text).value(values.first_name),
            Field::new("Last Name", "last_name", Input::Text).value(values.last_name),
            Field::new("Email", "email", Input::Email).value(values.email),
            Field::new("Phone", "phone", Input::Text)
                .value(values.phone)
                .optional(),
            Field::new("Password", "password", Input::Password),
            Field::new("Confirm Password", "confirm_password", Input::Password),
        ],
        "Register",
    );
    page("Register", false, notice, &body)
}

pub fn profile(user: &User) -> Html<String> {
    let body = format!(
        "<dl class=\"profile\">\
<dt>First Name</dt><dd>{}</dd>\
<dt>Last Name</dt><dd>{}</dd>\
<dt>Email</dt><dd>{}</dd>\
<dt>Phone</dt><dd>{}</dd></dl>",
        escape(&user.first_name),
        escape(&user.last_name),
        escape(&user.email),
        escape(user.phone.as_deref().unwrap_or("")),
    );
    page("Profile", true, None, &body)
}

pub fn about_us(logged_in: bool) -> Html<String> {
    page(
        "About Us",
        logged_in,
        None,
        "<p>AgriRecord helps small producers keep track of what they plant, harvest, store and sell.</p>",
    )
}

pub fn contact(logged_in: bool) -> Html<String> {
    page(
        "Contact",
        logged_in,
        None,
        "<p>Questions or suggestions? Write to <a href=\"mailto:contact@agrirecord.local\">contact@agrirecord.local</a>.</p>",
    )
}

pub fn submit_success(logged_in: bool) -> Html<String> {
    page(
        "Submitted",
        logged_in,
        Some(&Notice::message("Your submission was received.")),
        "<p><a href=\"/\">Back to the start page</a></p>",
    )
}

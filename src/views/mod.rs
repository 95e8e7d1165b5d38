//! HTML rendering. Pages are assembled with `format!` into a shared layout;
//! every value that came from a user goes through [`escape`].

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::NaiveDate;

pub mod account;
pub mod distribution;
pub mod production;
pub mod sales;

pub enum Notice {
    Message(String),
    Error(String),
}

impl Notice {
    pub fn message(text: impl Into<String>) -> Self {
        Notice::Message(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice::Error(text.into())
    }

    fn render(&self) -> String {
        match self {
            Notice::Message(text) => format!("<p class=\"message\">{}</p>", escape(text)),
            Notice::Error(text) => format!("<p class=\"error\">{}</p>", escape(text)),
        }
    }
}

/// `302 Found` with a `Location` header.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn date_or_blank(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

pub fn page(title: &str, logged_in: bool, notice: Option<&Notice>, body: &str) -> Html<String> {
    let nav = if logged_in {
        "<a href=\"/cultivation\">Cultivation</a>\
<a href=\"/harvested\">Harvests</a>\
<a href=\"/silocreation\">Silos</a>\
<a href=\"/distribution\">Distribution</a>\
<a href=\"/sales_creation\">Sales</a>\
<a href=\"/profile\">Profile</a>\
<a href=\"/logout\">Logout</a>"
    } else {
        "<a href=\"/login\">Login</a><a href=\"/register\">Register</a>"
    };
    let notice = notice.map(Notice::render).unwrap_or_default();

    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
<title>{title} | AgriRecord</title>\
<link rel=\"stylesheet\" href=\"/styles/main.css\"></head><body>\
<header><a class=\"brand\" href=\"/\">AgriRecord</a><nav>{nav}</nav></header>\
<main><h1>{title}</h1>{notice}{body}</main>\
<footer><a href=\"/about_us\">About Us</a> <a href=\"/contact\">Contact</a></footer>\
</body></html>",
        title = escape(title),
    ))
}

/// Confirmation page shown after a create, with follow-up links.
pub fn confirmation(title: &str, notice: &Notice, links: &[(&str, &str)]) -> Html<String> {
    let links: Vec<String> = links.iter().map(|(href, label)| link(href, label)).collect();
    let body = format!("<p>{}</p>", links.join(" | "));
    page(title, true, Some(notice), &body)
}

pub fn error_page(message: &str) -> Html<String> {
    page(
        "Something went wrong",
        false,
        Some(&Notice::error(message)),
        "<p><a href=\"/\">Back to the start page</a></p>",
    )
}

/// Cells are inserted verbatim; callers escape user data.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "<p class=\"empty\">No records yet.</p>".to_string();
    }
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

pub fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(label))
}

#[derive(Clone, Copy)]
pub enum Input {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
}

pub struct Field<'a> {
    label: &'a str,
    name: &'a str,
    input: Input,
    value: String,
    required: bool,
}

impl<'a> Field<'a> {
    pub fn new(label: &'a str, name: &'a str, input: Input) -> Self {
        Self {
            label,
            name,
            input,
            value: String::new(),
            required: true,
        }
    }

    pub fn value(mut self, value: impl ToString) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn render(&self) -> String {
        let required = if self.required { " required" } else { "" };
        let name = escape(self.name);
        let value = escape(&self.value);
        let control = match self.input {
            Input::TextArea => {
                format!("<textarea id=\"{name}\" name=\"{name}\"{required}>{value}</textarea>")
            }
            input => {
                let (kind, extra) = match input {
                    Input::Email => ("email", ""),
                    Input::Password => ("password", ""),
                    Input::Number => ("number", " step=\"any\""),
                    Input::Date => ("date", ""),
                    _ => ("text", ""),
                };
                format!(
                    "<input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{extra}{required}>"
                )
            }
        };
        format!(
            "<label for=\"{name}\">{}</label>{control}",
            escape(self.label)
        )
    }
}

pub fn form(action: &str, fields: &[Field<'_>], submit: &str) -> String {
    let controls: String = fields.iter().map(Field::render).collect();
    format!(
        "<form method=\"post\" action=\"{}\">{controls}<button type=\"submit\">{}</button></form>",
        escape(action),
        escape(submit)
    )
}

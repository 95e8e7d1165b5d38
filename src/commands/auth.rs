use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::db::{DbPool, User};
use crate::error::AgriResult;
use crate::middleware::auth::{session_cookie, session_cookie_removal};
use crate::state::{AppState, SessionState};
use crate::views::{self, account, Notice};

const DUPLICATE_EMAIL: &str = "The email is already registered. Please use another one.";
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(alias = "hashed_password")]
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn create_user(pool: &DbPool, form: &RegisterForm) -> AgriResult<i64> {
    let phone = Some(form.phone.trim()).filter(|p| !p.is_empty());

    let mut tx = pool.begin().await?;
    let user_id = sqlx::query(
        "INSERT INTO users (first_name, last_name, email, phone, password) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(form.first_name.trim())
    .bind(form.last_name.trim())
    .bind(form.email.trim())
    .bind(phone)
    .bind(&form.password)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;

    Ok(user_id)
}

pub async fn find_user_by_email(pool: &DbPool, email: &str) -> AgriResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_user(pool: &DbPool, user_id: i64) -> AgriResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn register_page() -> Html<String> {
    account::register(None, None)
}

pub async fn register_user(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Html<String> {
    let values = || account::RegisterValues {
        first_name: &form.first_name,
        last_name: &form.last_name,
        email: &form.email,
        phone: &form.phone,
    };

    if form.password != form.confirm_password {
        return account::register(Some(&Notice::error("Passwords do not match.")), Some(values()));
    }

    match create_user(&state.pool, &form).await {
        Ok(user_id) => {
            tracing::info!("Registered user {}", user_id);
            account::login(Some(&Notice::message(
                "User created successfully! Please log in.",
            )))
        }
        Err(e) if e.is_unique_violation() => {
            tracing::info!("Registration rejected, email already in use");
            account::register(Some(&Notice::error(DUPLICATE_EMAIL)), Some(values()))
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            let notice = Notice::error(format!("Failed to register user. Error: {}", e));
            account::register(Some(&notice), Some(values()))
        }
    }
}

pub async fn login_page() -> Html<String> {
    account::login(None)
}

pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AgriResult<Response> {
    let user = find_user_by_email(&state.pool, &form.email).await?;

    // Plaintext comparison; credentials are not hashed in this application.
    match user {
        Some(user) if user.password == form.password => {
            tracing::info!("User {} logged in", user.id);
            Ok((jar.add(session_cookie(user.id)), views::found("/")).into_response())
        }
        _ => Ok(account::login(Some(&Notice::error(INVALID_CREDENTIALS))).into_response()),
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    (jar.remove(session_cookie_removal()), views::found("/")).into_response()
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> AgriResult<Response> {
    match find_user(&state.pool, session.user_id).await? {
        Some(user) => Ok(account::profile(&user).into_response()),
        None => {
            tracing::debug!("Session points at missing user {}", session.user_id);
            Ok(views::found("/login"))
        }
    }
}

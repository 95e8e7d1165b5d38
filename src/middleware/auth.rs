use crate::state::SessionState;
use crate::views;
use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const SESSION_COOKIE: &str = "user_id";

/// Reads the session cookie. The value is trusted as-is; a non-numeric value counts as no session.
pub fn session_from_jar(jar: &CookieJar) -> Option<SessionState> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().trim().parse::<i64>().ok())
        .map(|user_id| SessionState { user_id })
}

pub fn session_cookie(user_id: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// Removal needs the same path the cookie was issued with.
pub fn session_cookie_removal() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Attaches the session, if any, to the request so handlers can take `Extension<SessionState>`.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    if let Some(session) = session_from_jar(&jar) {
        request.extensions_mut().insert(session);
    }
    next.run(request).await
}

/// Guards protected routes: without a session the browser is sent to the login page.
pub async fn require_session(request: Request, next: Next) -> Response {
    if request.extensions().get::<SessionState>().is_none() {
        tracing::debug!("No session for {}, redirecting to login", request.uri().path());
        return views::found("/login");
    }
    next.run(request).await
}

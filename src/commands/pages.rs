use axum::response::Html;
use axum::Extension;

use crate::state::SessionState;
use crate::views::{account, distribution};

type MaybeSession = Option<Extension<SessionState>>;

pub async fn index(session: MaybeSession) -> Html<String> {
    account::index(session.is_some())
}

pub async fn about_us(session: MaybeSession) -> Html<String> {
    account::about_us(session.is_some())
}

pub async fn contact(session: MaybeSession) -> Html<String> {
    account::contact(session.is_some())
}

pub async fn submit_success(session: MaybeSession) -> Html<String> {
    account::submit_success(session.is_some())
}

pub async fn distribution() -> Html<String> {
    distribution::hub()
}

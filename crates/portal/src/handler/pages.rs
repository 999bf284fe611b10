use crate::{
    domain::{requests::auth::RedirectQuery, response::page::PageResponse},
    middleware::GuardedPage,
    session::SessionCookies,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{errors::HttpError, policy::landing_path};
use std::sync::Arc;
use tracing::debug;

pub async fn landing_page() -> impl IntoResponse {
    Json(PageResponse::public("landing", "/"))
}

pub async fn login_page(Query(query): Query<RedirectQuery>) -> impl IntoResponse {
    let mut page = PageResponse::public("login", "/login");
    page.redirect = query.redirect;
    Json(page)
}

pub async fn unauthorized_page() -> impl IntoResponse {
    Json(PageResponse::public("unauthorized", "/unauthorized"))
}

pub async fn protected_unauthorized_page(GuardedPage(session): GuardedPage) -> impl IntoResponse {
    Json(PageResponse::protected(
        "unauthorized",
        "/home/unauthorized",
        &session,
    ))
}

/// `/home` forwards to the user's landing section.
pub async fn home_page(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
    GuardedPage(session): GuardedPage,
) -> impl IntoResponse {
    let last_visited = SessionCookies::last_visited(&cookie_jar);
    let target = landing_path(&state.policy, &session.roles, last_visited.as_deref());

    debug!(user_id = ?session.user_id, target = %target, "Resolved landing page");
    Redirect::temporary(&target)
}

pub async fn section_page(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
    GuardedPage(session): GuardedPage,
) -> Result<impl IntoResponse, HttpError> {
    let path = format!("{}/{}", state.policy.protected_base(), section);

    if state.policy.required_roles(&path).is_none() {
        return Err(HttpError::NotFound(format!("No page at {path}")));
    }

    Ok(Json(PageResponse::protected(&section, &path, &session)))
}

pub fn page_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/login", get(login_page))
        .route("/unauthorized", get(unauthorized_page))
        .route("/home", get(home_page))
        .route("/home/unauthorized", get(protected_unauthorized_page))
        .route("/home/{section}", get(section_page))
        .with_state(app_state)
}

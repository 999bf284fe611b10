use crate::{
    domain::{
        requests::auth::{LoginRequest, RedirectQuery},
        response::{
            api::ApiResponse,
            token::{LoginResponse, LogoutResponse},
        },
    },
    middleware::SimpleValidatedJson,
    session::SessionCookies,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde_json::json;
use shared::errors::HttpError;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa_axum::router::OpenApiRouter;

const PUBLIC_ROOT: &str = "/";

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    params(RedirectQuery),
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RedirectQuery>,
    cookie_jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let token = state.auth_api.login(&body).await?;

    let claims = state
        .codec
        .validate_at(&token.token, Utc::now())
        .map_err(|e| {
            error!("Authentication service issued an unusable credential: {}", e);
            HttpError::Internal("Authentication service issued an unusable credential".into())
        })?;

    let expires_at = claims
        .expires_at()
        .ok_or_else(|| HttpError::Internal("Credential expiry out of range".into()))?;

    let jar = state
        .sessions
        .store_credential(cookie_jar, &token.token, expires_at);
    let redirect = state.policy.post_login_target(query.redirect.as_deref());

    info!(user_id = ?claims.id, redirect = %redirect, "Login successful");

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(ApiResponse::success(
                "Login successful",
                LoginResponse { redirect },
            )),
        ),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/disconnect",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 400, description = "Logout failed")
    ),
    tag = "Auth"
)]
pub async fn disconnect_handler(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
) -> Response {
    let credential = SessionCookies::credential(&cookie_jar);
    let result = state.auth_api.disconnect(credential.as_deref()).await;
    let jar = state.sessions.clear(cookie_jar);

    match result {
        Ok(()) => (
            jar,
            (
                StatusCode::OK,
                Json(LogoutResponse {
                    success: true,
                    redirect: PUBLIC_ROOT.to_string(),
                }),
            ),
        )
            .into_response(),
        Err(e) => {
            warn!("Upstream logout failed: {:?}", e);
            (jar, HttpError::BadRequest("Logout failed".into())).into_response()
        }
    }
}

pub async fn logout_page_handler(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
) -> impl IntoResponse {
    let credential = SessionCookies::credential(&cookie_jar);
    if let Err(e) = state.auth_api.disconnect(credential.as_deref()).await {
        warn!("Upstream logout failed: {:?}", e);
    }

    (state.sessions.clear(cookie_jar), Redirect::to(PUBLIC_ROOT))
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Credential accepted by the API", body = serde_json::Value),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    cookie_jar: CookieJar,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| SessionCookies::credential(&cookie_jar).map(|token| format!("Bearer {token}")));

    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());

    let unauthorized = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response()
    };

    let Some(authorization) = authorization else {
        return unauthorized();
    };

    match state.auth_api.verify(&authorization, cookie).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(_) => unauthorized(),
    }
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/disconnect", post(disconnect_handler))
        .route("/api/auth/verify", get(verify_handler))
        .route("/logout", get(logout_page_handler))
        .with_state(app_state)
}

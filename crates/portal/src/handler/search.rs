use crate::{domain::requests::search::GraphQlRequest, session::SessionCookies, state::AppState};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/search",
    request_body = GraphQlRequest,
    responses(
        (status = 200, description = "GraphQL response from the registry API", body = serde_json::Value),
        (status = 500, description = "Backend request failed")
    ),
    tag = "Search"
)]
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
    Json(body): Json<GraphQlRequest>,
) -> Response {
    let credential = SessionCookies::credential(&cookie_jar);

    match state.search_api.execute(&body, credential.as_deref()).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            let message = e.message();
            error!("Search proxy failed: {}", message);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "errors": [{ "message": message }] })),
            )
                .into_response()
        }
    }
}

pub fn search_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/search", post(search_handler))
        .with_state(app_state)
}

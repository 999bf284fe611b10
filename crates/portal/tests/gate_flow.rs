use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use axum_extra::extract::cookie::Cookie;
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use portal::{
    abstract_trait::{AuthApiClientTrait, SearchApiClientTrait},
    domain::{
        requests::{auth::LoginRequest, search::GraphQlRequest},
        response::token::TokenResponse,
    },
    handler::AppRouter,
    session::SessionCookies,
    state::AppState,
};
use serde_json::{Value, json};
use shared::{config::JwtConfig, errors::HttpError, policy::RoutePolicy};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct StubAuthApi {
    disconnected_with: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl AuthApiClientTrait for StubAuthApi {
    async fn login(&self, input: &LoginRequest) -> Result<TokenResponse, HttpError> {
        if input.username == "amina" && input.password == "secret" {
            Ok(TokenResponse {
                token: token("Admin,Print", Utc::now().timestamp() + 3600),
            })
        } else {
            Err(HttpError::Unauthorized("Invalid credentials".into()))
        }
    }

    async fn disconnect(&self, token: Option<&str>) -> Result<(), HttpError> {
        self.disconnected_with
            .lock()
            .unwrap()
            .push(token.map(str::to_owned));
        Ok(())
    }

    async fn verify(&self, authorization: &str, _cookie: Option<&str>) -> Result<Value, HttpError> {
        if authorization.starts_with("Bearer ") {
            Ok(json!({ "valid": true }))
        } else {
            Err(HttpError::Unauthorized("Unauthorized".into()))
        }
    }
}

struct StubSearchApi;

#[async_trait]
impl SearchApiClientTrait for StubSearchApi {
    async fn execute(
        &self,
        request: &GraphQlRequest,
        token: Option<&str>,
    ) -> Result<Value, HttpError> {
        if request.query.contains("broken") {
            return Err(HttpError::Internal("Backend request failed: 502".into()));
        }
        Ok(json!({ "data": { "query": request.query, "authenticated": token.is_some() } }))
    }
}

fn token(role: &str, exp: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "amina", "id": 11, "role": role, "iat": exp - 7200, "exp": exp }),
        &EncodingKey::from_secret(b"issuer"),
    )
    .unwrap()
}

fn valid(role: &str) -> String {
    token(role, Utc::now().timestamp() + 3600)
}

fn app() -> (Router, Arc<StubAuthApi>) {
    let auth_api = Arc::new(StubAuthApi::default());
    let state = AppState::from_parts(
        Arc::new(JwtConfig::unverified()),
        Arc::new(RoutePolicy::default()),
        SessionCookies::new(false),
        auth_api.clone(),
        Arc::new(StubSearchApi),
    );
    (AppRouter::build(state), auth_api)
}

fn get(path: &str, credential: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(credential) = credential {
        builder = builder.header(header::COOKIE, format!("authToken={credential}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn set_cookies(response: &Response) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_owned()).ok())
        .collect()
}

fn set_cookie(response: &Response, name: &str) -> Option<Cookie<'static>> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.name() == name)
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn anonymous_admin_request_is_sent_to_login_with_return_path() {
    let (app, _) = app();

    let response = app.oneshot(get("/home/admin", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=%2Fhome%2Fadmin");
}

#[tokio::test]
async fn search_user_is_refused_admin_section() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/home/admin", Some(&valid("Search"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/home/unauthorized");
}

#[tokio::test]
async fn multi_role_user_reaches_print_and_it_is_remembered() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/home/print", Some(&valid("Admin,Print"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let remembered = set_cookie(&response, "lastVisited").expect("last visited cookie");
    assert_eq!(remembered.value(), "/home/print");
    assert_eq!(remembered.path(), Some("/"));

    let body = json_body(response).await;
    assert_eq!(body["page"], "print");
    assert_eq!(body["user"]["user_id"], 11);
    assert_eq!(body["user"]["roles"], json!(["Admin", "Print"]));
}

#[tokio::test]
async fn logged_in_user_is_sent_away_from_login_page() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/login", Some(&valid("Statistic"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/home");
}

#[tokio::test]
async fn expired_credential_goes_to_login() {
    let (app, _) = app();
    let expired = token("Statistic", Utc::now().timestamp() - 60);

    let response = app
        .oneshot(get("/home/statistic", Some(&expired)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=%2Fhome%2Fstatistic");
}

#[tokio::test]
async fn anonymous_public_pages_render() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/login?redirect=%2Fhome%2Fadd", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["page"], "login");
    assert_eq!(body["redirect"], "/home/add");
}

#[tokio::test]
async fn home_redirects_to_remembered_or_priority_section() {
    let (app, _) = app();
    let credential = valid("Statistic,Search");

    let response = app
        .clone()
        .oneshot(get("/home", Some(&credential)))
        .await
        .unwrap();
    assert_eq!(location(&response), "/home/search");

    let request = Request::builder()
        .uri("/home")
        .header(
            header::COOKIE,
            format!("authToken={credential}; lastVisited=/home/statistic"),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(location(&response), "/home/statistic");
}

#[tokio::test]
async fn home_ignores_remembered_page_with_control_characters() {
    let (app, _) = app();

    let request = Request::builder()
        .uri("/home")
        .header(
            header::COOKIE,
            format!(
                "authToken={}; lastVisited=/home/print%0ASet-Cookie:x=1",
                valid("Admin,Print")
            ),
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/home/admin");
}

#[tokio::test]
async fn unknown_section_is_not_found_for_authenticated_user() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/home/elsewhere", Some(&valid("Admin"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_sets_cookie_and_honors_redirect() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login?redirect=%2Fhome%2Fprint")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "amina", "password": "secret" }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let auth_cookie = set_cookie(&response, "authToken").expect("credential cookie");
    assert!(!auth_cookie.value().is_empty());
    assert_eq!(auth_cookie.path(), Some("/"));
    assert_eq!(auth_cookie.http_only(), Some(true));
    assert!(auth_cookie.expires_datetime().is_some());

    let body = json_body(response).await;
    assert_eq!(body["data"]["redirect"], "/home/print");
}

#[tokio::test]
async fn failed_login_is_generic() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "amina", "password": "wrong" }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn empty_login_fields_are_rejected() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "", "password": "" }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disconnect_clears_cookie_and_returns_to_root() {
    let (app, auth_api) = app();
    let credential = valid("Add");

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/disconnect")
        .header(header::COOKIE, format!("authToken={credential}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookie(&response, "authToken").expect("cleared credential cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(
        cleared.expires_datetime().map(|at| at.unix_timestamp()),
        Some(0)
    );
    assert_eq!(
        auth_api.disconnected_with.lock().unwrap().as_slice(),
        &[Some(credential)]
    );

    let body = json_body(response).await;
    assert_eq!(body["redirect"], "/");
}

#[tokio::test]
async fn api_routes_bypass_the_gate() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "query": "{ montakhibs { id } }" }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["authenticated"], false);
}

#[tokio::test]
async fn search_failures_use_graphql_error_shape() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": "broken" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["message"], "Backend request failed: 502");
}

#[tokio::test]
async fn verify_without_credential_is_unauthorized() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/api/auth/verify", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn metrics_report_gate_decisions() {
    let (app, _) = app();

    let _ = app
        .clone()
        .oneshot(get("/home/admin", None))
        .await
        .unwrap();
    let response = app.oneshot(get("/metrics", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("gate_decisions_total"));
    assert!(text.contains("redirect_to_login") || text.contains("RedirectToLogin"));
}

use crate::session::SessionCookies;
use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    gate::{GateDecision, RequestGate},
    utils::GateMetrics,
};
use tracing::{debug, info, warn};

/// Request-time gate: decides allow or redirect before any page renders.
pub async fn request_gate_middleware(
    Extension(gate): Extension<RequestGate>,
    Extension(metrics): Extension<GateMetrics>,
    Extension(sessions): Extension<SessionCookies>,
    cookie_jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if !gate.matches(&path) {
        return next.run(req).await;
    }

    let credential = SessionCookies::credential(&cookie_jar);
    let decision = gate.evaluate(&path, credential.as_deref());
    metrics.record_request(&decision);

    match decision {
        GateDecision::AllowPublic => next.run(req).await,
        GateDecision::AllowProtected(session) => {
            debug!(
                path = %path,
                user_id = ?session.user_id,
                roles = ?session.roles,
                "Protected navigation allowed"
            );

            let remember = gate.policy().required_roles(&path).is_some();
            req.extensions_mut().insert(session);

            let response = next.run(req).await;

            if remember && response.status().is_success() {
                (sessions.remember_page(cookie_jar, &path), response).into_response()
            } else {
                response
            }
        }
        GateDecision::RedirectAuthenticatedAway { location } => {
            debug!(path = %path, "Authenticated user sent away from public page");
            Redirect::temporary(&location).into_response()
        }
        GateDecision::RedirectToLogin {
            location, reason, ..
        } => {
            info!(path = %path, reason = reason.kind(), "Redirecting to login: {}", reason);
            Redirect::temporary(&location).into_response()
        }
        GateDecision::RedirectToUnauthorized { location, reason } => {
            warn!(path = %path, reason = reason.kind(), "Access denied: {}", reason);
            Redirect::temporary(&location).into_response()
        }
    }
}

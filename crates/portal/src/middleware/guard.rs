use crate::{session::SessionCookies, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{domain::Session, gate::GuardState};
use std::sync::Arc;
use tracing::{info, warn};

/// Render-time guard for page handlers.
///
/// Re-validates the cookie credential against the route policy before the
/// handler body runs, so no page data is produced ahead of a redirect.
#[derive(Debug, Clone)]
pub struct GuardedPage(pub Session);

impl FromRequestParts<Arc<AppState>> for GuardedPage {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let cookie_jar = CookieJar::from_headers(&parts.headers);
        let credential = SessionCookies::credential(&cookie_jar);

        let mut guard = state.render_guard(&path);
        let outcome = guard.check(credential.as_deref()).clone();
        state.gate_metrics.record_render(&outcome);

        match outcome {
            GuardState::Passed(session) => Ok(GuardedPage(session)),
            GuardState::Redirecting { location, reason } => {
                info!(path = %path, reason = reason.kind(), "Render guard redirect");
                Err(Redirect::temporary(&location).into_response())
            }
            GuardState::Pending => {
                warn!(path = %path, "Render guard did not settle");
                Err(Redirect::temporary(&state.policy.login_redirect(&path)).into_response())
            }
        }
    }
}

use crate::{
    abstract_trait::DynTokenCodec,
    domain::Session,
    errors::AccessError,
    gate::authenticate,
    policy::{RouteClass, RoutePolicy},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Terminal outcome of one request-time evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    AllowPublic,
    AllowProtected(Session),
    RedirectAuthenticatedAway {
        location: String,
    },
    RedirectToLogin {
        location: String,
        return_to: String,
        reason: AccessError,
    },
    RedirectToUnauthorized {
        location: String,
        reason: AccessError,
    },
}

impl GateDecision {
    pub fn location(&self) -> Option<&str> {
        match self {
            GateDecision::AllowPublic | GateDecision::AllowProtected(_) => None,
            GateDecision::RedirectAuthenticatedAway { location }
            | GateDecision::RedirectToLogin { location, .. }
            | GateDecision::RedirectToUnauthorized { location, .. } => Some(location),
        }
    }

    pub fn reason(&self) -> Option<&AccessError> {
        match self {
            GateDecision::RedirectToLogin { reason, .. }
            | GateDecision::RedirectToUnauthorized { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(
            self,
            GateDecision::AllowPublic | GateDecision::AllowProtected(_)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            GateDecision::AllowPublic => "allow_public",
            GateDecision::AllowProtected(_) => "allow_protected",
            GateDecision::RedirectAuthenticatedAway { .. } => "redirect_authenticated_away",
            GateDecision::RedirectToLogin { .. } => "redirect_to_login",
            GateDecision::RedirectToUnauthorized { .. } => "redirect_to_unauthorized",
        }
    }
}

/// Navigation gate evaluated before any page renders.
///
/// Pure over `(path, credential, now)`, so evaluating the same request twice
/// yields the same decision.
#[derive(Debug, Clone)]
pub struct RequestGate {
    codec: DynTokenCodec,
    policy: Arc<RoutePolicy>,
}

impl RequestGate {
    pub fn new(codec: DynTokenCodec, policy: Arc<RoutePolicy>) -> Self {
        Self { codec, policy }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// Whether the route matcher applies to `path` at all.
    pub fn matches(&self, path: &str) -> bool {
        !self.policy.is_bypassed(path)
    }

    pub fn evaluate(&self, path: &str, credential: Option<&str>) -> GateDecision {
        self.evaluate_at(path, credential, Utc::now())
    }

    pub fn evaluate_at(
        &self,
        path: &str,
        credential: Option<&str>,
        now: DateTime<Utc>,
    ) -> GateDecision {
        let session = authenticate(self.codec.as_ref(), credential, now);

        match self.policy.classify(path) {
            RouteClass::Public => match session {
                Ok(_) => GateDecision::RedirectAuthenticatedAway {
                    location: self.policy.home_path().to_string(),
                },
                Err(_) => GateDecision::AllowPublic,
            },
            RouteClass::Unguarded => GateDecision::AllowPublic,
            RouteClass::Protected { required } => {
                let session = match session {
                    Ok(session) => session,
                    Err(reason) => {
                        return GateDecision::RedirectToLogin {
                            location: self.policy.login_redirect(path),
                            return_to: path.to_string(),
                            reason,
                        };
                    }
                };

                match required {
                    Some(required)
                        if !required.is_empty() && required.is_disjoint(&session.roles) =>
                    {
                        GateDecision::RedirectToUnauthorized {
                            location: self.policy.unauthorized_path().to_string(),
                            reason: AccessError::RoleMismatch {
                                required: required.into_iter().collect(),
                            },
                        }
                    }
                    _ => GateDecision::AllowProtected(session),
                }
            }
        }
    }
}

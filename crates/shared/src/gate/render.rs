use crate::{
    abstract_trait::DynTokenCodec,
    domain::{Role, Session},
    errors::AccessError,
    gate::authenticate,
    policy::RoutePolicy,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    Passed(Session),
    Redirecting {
        location: String,
        reason: AccessError,
    },
}

/// What the guard itself puts on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardView {
    /// Blocking overlay, nothing underneath is shown.
    Loading,
    /// The guard renders nothing; the page supplies the content.
    Empty,
}

/// Mounted guard that re-validates the credential after a page starts
/// rendering.
///
/// The check runs once per `(path, required roles)` pair. Changing either
/// through [`RenderGuard::update`] puts the guard back into `Pending`.
#[derive(Debug, Clone)]
pub struct RenderGuard {
    codec: DynTokenCodec,
    policy: Arc<RoutePolicy>,
    path: String,
    required: Vec<Role>,
    state: GuardState,
}

impl RenderGuard {
    pub fn mount(
        codec: DynTokenCodec,
        policy: Arc<RoutePolicy>,
        path: impl Into<String>,
        required: Vec<Role>,
    ) -> Self {
        Self {
            codec,
            policy,
            path: path.into(),
            required,
            state: GuardState::Pending,
        }
    }

    /// Mounts a guard whose required roles come from the route policy.
    pub fn for_route(codec: DynTokenCodec, policy: Arc<RoutePolicy>, path: &str) -> Self {
        let required = policy
            .required_roles(path)
            .map(|roles| roles.into_iter().collect())
            .unwrap_or_default();
        Self::mount(codec, policy, path, required)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn required(&self) -> &[Role] {
        &self.required
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Returns `true` when a dependency changed and the check must run again.
    pub fn update(&mut self, path: &str, required: &[Role]) -> bool {
        if self.path == path && self.required == required {
            return false;
        }

        self.path = path.to_string();
        self.required = required.to_vec();
        self.state = GuardState::Pending;
        true
    }

    pub fn check(&mut self, credential: Option<&str>) -> &GuardState {
        self.check_at(credential, Utc::now())
    }

    pub fn check_at(&mut self, credential: Option<&str>, now: DateTime<Utc>) -> &GuardState {
        if self.state != GuardState::Pending {
            return &self.state;
        }

        self.state = match authenticate(self.codec.as_ref(), credential, now) {
            Err(reason) => GuardState::Redirecting {
                location: self.policy.login_redirect(&self.path),
                reason,
            },
            Ok(session)
                if !self.required.is_empty()
                    && !self.required.iter().any(|role| session.roles.contains(role)) =>
            {
                GuardState::Redirecting {
                    location: self.policy.unauthorized_path().to_string(),
                    reason: AccessError::RoleMismatch {
                        required: self.required.clone(),
                    },
                }
            }
            Ok(session) => GuardState::Passed(session),
        };

        &self.state
    }

    pub fn view(&self) -> GuardView {
        match self.state {
            GuardState::Passed(_) => GuardView::Empty,
            _ => GuardView::Loading,
        }
    }

    /// Page data may only be fetched once the guard has passed.
    pub fn may_fetch(&self) -> bool {
        matches!(self.state, GuardState::Passed(_))
    }

    pub fn redirect(&self) -> Option<&str> {
        match &self.state {
            GuardState::Redirecting { location, .. } => Some(location),
            _ => None,
        }
    }
}

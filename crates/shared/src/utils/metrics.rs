use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

use crate::errors::AccessError;
use crate::gate::{GateDecision, GuardState};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Gate {
    Request,
    Render,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Outcome {
    AllowPublic,
    AllowProtected,
    RedirectAuthenticatedAway,
    RedirectToLogin,
    RedirectToUnauthorized,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub gate: Gate,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DenialLabels {
    pub gate: Gate,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct GateMetrics {
    pub decisions: Family<Labels, Counter>,
    pub denials: Family<DenialLabels, Counter>,
}

impl GateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "gate_decisions",
            "Access gate decisions by gate and outcome",
            self.decisions.clone(),
        );

        registry.register(
            "gate_denials",
            "Access gate denials by gate and reason",
            self.denials.clone(),
        );
    }

    pub fn record_request(&self, decision: &GateDecision) {
        let outcome = match decision {
            GateDecision::AllowPublic => Outcome::AllowPublic,
            GateDecision::AllowProtected(_) => Outcome::AllowProtected,
            GateDecision::RedirectAuthenticatedAway { .. } => Outcome::RedirectAuthenticatedAway,
            GateDecision::RedirectToLogin { .. } => Outcome::RedirectToLogin,
            GateDecision::RedirectToUnauthorized { .. } => Outcome::RedirectToUnauthorized,
        };

        self.inc(Gate::Request, outcome);

        if let Some(reason) = decision.reason() {
            self.denials
                .get_or_create(&DenialLabels {
                    gate: Gate::Request,
                    reason: reason.kind().to_string(),
                })
                .inc();
        }
    }

    pub fn record_render(&self, state: &GuardState) {
        match state {
            GuardState::Pending => {}
            GuardState::Passed(_) => self.inc(Gate::Render, Outcome::AllowProtected),
            GuardState::Redirecting { reason, .. } => {
                let outcome = match reason {
                    AccessError::RoleMismatch { .. } => Outcome::RedirectToUnauthorized,
                    _ => Outcome::RedirectToLogin,
                };
                self.inc(Gate::Render, outcome);
                self.denials
                    .get_or_create(&DenialLabels {
                        gate: Gate::Render,
                        reason: reason.kind().to_string(),
                    })
                    .inc();
            }
        }
    }

    fn inc(&self, gate: Gate, outcome: Outcome) {
        self.decisions
            .get_or_create(&Labels { gate, outcome })
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn counts_decisions_and_denial_reasons() {
        let metrics = GateMetrics::new();

        metrics.record_request(&GateDecision::AllowPublic);
        metrics.record_request(&GateDecision::RedirectToLogin {
            location: "/login".into(),
            return_to: "/home".into(),
            reason: AccessError::ExpiredCredential,
        });
        metrics.record_render(&GuardState::Pending);

        let allowed = metrics
            .decisions
            .get_or_create(&Labels {
                gate: Gate::Request,
                outcome: Outcome::AllowPublic,
            })
            .get();
        let expired = metrics
            .denials
            .get_or_create(&DenialLabels {
                gate: Gate::Request,
                reason: "expired_credential".into(),
            })
            .get();

        assert_eq!(allowed, 1);
        assert_eq!(expired, 1);
    }

    #[test]
    fn render_role_mismatch_counts_as_unauthorized() {
        let metrics = GateMetrics::new();

        metrics.record_render(&GuardState::Redirecting {
            location: "/home/unauthorized".into(),
            reason: AccessError::RoleMismatch {
                required: vec![Role::Admin],
            },
        });

        let unauthorized = metrics
            .decisions
            .get_or_create(&Labels {
                gate: Gate::Render,
                outcome: Outcome::RedirectToUnauthorized,
            })
            .get();
        let to_login = metrics
            .decisions
            .get_or_create(&Labels {
                gate: Gate::Render,
                outcome: Outcome::RedirectToLogin,
            })
            .get();

        assert_eq!(unauthorized, 1);
        assert_eq!(to_login, 0);
    }
}

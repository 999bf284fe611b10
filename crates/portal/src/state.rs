use crate::{
    abstract_trait::{DynAuthApiClient, DynSearchApiClient},
    config::Config,
    service::{AuthApiClientService, SearchApiClientService},
    session::SessionCookies,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynTokenCodec,
    config::JwtConfig,
    gate::{RenderGuard, RequestGate},
    policy::RoutePolicy,
    utils::GateMetrics,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub codec: DynTokenCodec,
    pub policy: Arc<RoutePolicy>,
    pub gate: RequestGate,
    pub sessions: SessionCookies,
    pub auth_api: DynAuthApiClient,
    pub search_api: DynSearchApiClient,
    pub registry: Arc<Mutex<Registry>>,
    pub gate_metrics: GateMetrics,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("codec", &self.codec)
            .field("gate", &self.gate)
            .field("sessions", &self.sessions)
            .field("auth_api", &"DynAuthApiClient")
            .field("search_api", &"DynSearchApiClient")
            .finish()
    }
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let codec = Arc::new(JwtConfig::from_secret(config.jwt_secret.as_deref())) as DynTokenCodec;

        if config.jwt_secret.is_none() {
            warn!("JWT_SECRET not set, credentials are decoded without signature verification");
        }

        let auth_api = Arc::new(
            AuthApiClientService::new(&config.api_base_url)
                .context("Failed to initialize authentication API client")?,
        ) as DynAuthApiClient;

        let search_api = Arc::new(
            SearchApiClientService::new(&config.graphql_url)
                .context("Failed to initialize GraphQL API client")?,
        ) as DynSearchApiClient;

        info!("Initialized external API clients for {}", config.api_base_url);

        Ok(Self::from_parts(
            codec,
            Arc::new(RoutePolicy::default()),
            SessionCookies::new(config.cookie_secure),
            auth_api,
            search_api,
        ))
    }

    pub fn from_parts(
        codec: DynTokenCodec,
        policy: Arc<RoutePolicy>,
        sessions: SessionCookies,
        auth_api: DynAuthApiClient,
        search_api: DynSearchApiClient,
    ) -> Self {
        let mut registry = Registry::default();
        let gate_metrics = GateMetrics::new();
        gate_metrics.register(&mut registry);

        Self {
            gate: RequestGate::new(codec.clone(), policy.clone()),
            codec,
            policy,
            sessions,
            auth_api,
            search_api,
            registry: Arc::new(Mutex::new(registry)),
            gate_metrics,
        }
    }

    /// Mounts a render-time guard for `path` using the shared route policy.
    pub fn render_guard(&self, path: &str) -> RenderGuard {
        RenderGuard::for_route(self.codec.clone(), self.policy.clone(), path)
    }
}

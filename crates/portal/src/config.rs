use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub graphql_url: String,
    pub jwt_secret: Option<String>,
    pub cookie_secure: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;
        let api_base_url = std::env::var("API_BASE_URL")
            .context("Missing environment variable: API_BASE_URL")?;
        let graphql_url =
            std::env::var("GRAPHQL_URL").context("Missing environment variable: GRAPHQL_URL")?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty());

        let cookie_secure = match std::env::var("COOKIE_SECURE").ok().as_deref() {
            None | Some("") | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(anyhow!(
                    "COOKIE_SECURE must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        Ok(Self {
            port,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            graphql_url,
            jwt_secret,
            cookie_secure,
        })
    }
}

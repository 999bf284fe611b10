use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

pub const AUTH_COOKIE: &str = "authToken";
pub const LAST_VISITED_COOKIE: &str = "lastVisited";

/// Cookie-backed credential store.
///
/// Written by login/logout only, read by both gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookies {
    secure: bool,
}

impl SessionCookies {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn credential(jar: &CookieJar) -> Option<String> {
        jar.get(AUTH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn last_visited(jar: &CookieJar) -> Option<String> {
        jar.get(LAST_VISITED_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn store_credential(
        &self,
        jar: CookieJar,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> CookieJar {
        let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);

        let cookie = Cookie::build((AUTH_COOKIE, token.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .expires(expires);

        jar.add(cookie)
    }

    pub fn remember_page(&self, jar: CookieJar, path: &str) -> CookieJar {
        let cookie = Cookie::build((LAST_VISITED_COOKIE, path.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);

        jar.add(cookie)
    }

    /// Overwrites both cookies with empty values that expired at the epoch.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        [AUTH_COOKIE, LAST_VISITED_COOKIE]
            .into_iter()
            .fold(jar, |jar, name| {
                jar.add(
                    Cookie::build((name, ""))
                        .path("/")
                        .http_only(true)
                        .same_site(SameSite::Lax)
                        .secure(self.secure)
                        .expires(OffsetDateTime::UNIX_EPOCH),
                )
            })
    }
}

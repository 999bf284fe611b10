use serde::{Deserialize, Serialize};
use shared::domain::{Role, Session};
use utoipa::ToSchema;

/// Descriptor of a rendered page; layout and styling live in the browser.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PageResponse {
    pub page: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PageUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PageUser {
    pub subject: Option<String>,
    pub user_id: Option<i64>,
    pub roles: Vec<Role>,
}

impl PageResponse {
    pub fn public(page: &str, path: &str) -> Self {
        Self {
            page: page.to_string(),
            path: path.to_string(),
            user: None,
            redirect: None,
        }
    }

    pub fn protected(page: &str, path: &str, session: &Session) -> Self {
        Self {
            page: page.to_string(),
            path: path.to_string(),
            user: Some(PageUser::from(session)),
            redirect: None,
        }
    }
}

impl From<&Session> for PageUser {
    fn from(session: &Session) -> Self {
        Self {
            subject: session.subject.clone(),
            user_id: session.user_id,
            roles: session.roles.iter().copied().collect(),
        }
    }
}

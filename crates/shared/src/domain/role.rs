use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// One of the six access-control categories that gate the dashboard sections.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Role {
    Admin,
    Search,
    Add,
    Manage,
    Print,
    Statistic,
}

pub type RoleSet = BTreeSet<Role>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role label: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Canonical order, also used as the landing priority.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Search,
        Role::Add,
        Role::Manage,
        Role::Print,
        Role::Statistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Search => "Search",
            Role::Add => "Add",
            Role::Manage => "Manage",
            Role::Print => "Print",
            Role::Statistic => "Statistic",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

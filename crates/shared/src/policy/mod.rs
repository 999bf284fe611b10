mod landing;

pub use self::landing::landing_path;

use crate::domain::{Role, RoleSet};

/// One row of the role table: every path starting with `prefix` requires at
/// least one of `roles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    pub prefix: String,
    pub roles: RoleSet,
}

impl PolicyEntry {
    pub fn new(prefix: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            prefix: prefix.into(),
            roles: roles.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable without a credential.
    Public,
    /// Under the protected base. `None` means any authenticated user.
    Protected { required: Option<RoleSet> },
    /// Neither public nor protected; passed through untouched.
    Unguarded,
}

/// Static route table consulted by both gates.
///
/// Public routes match exactly. Protected routes match by prefix and the
/// role entries are scanned in order, the first match wins.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    public_routes: Vec<String>,
    protected_base: String,
    entries: Vec<PolicyEntry>,
    bypass_prefixes: Vec<String>,
    home_path: String,
    login_path: String,
    unauthorized_path: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(["/", "/login", "/unauthorized"], "/home")
            .with_entries([
                PolicyEntry::new("/home/admin", [Role::Admin]),
                PolicyEntry::new("/home/search", [Role::Search]),
                PolicyEntry::new("/home/add", [Role::Add]),
                PolicyEntry::new("/home/manage", [Role::Manage]),
                PolicyEntry::new("/home/print", [Role::Print]),
                PolicyEntry::new("/home/statistic", [Role::Statistic]),
            ])
            .with_bypass_prefixes(["/api", "/static", "/favicon.ico", "/metrics"])
            .with_unauthorized_path("/home/unauthorized")
    }
}

impl RoutePolicy {
    pub fn new<I, S>(public_routes: I, protected_base: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let protected_base = protected_base.into();
        Self {
            public_routes: public_routes.into_iter().map(Into::into).collect(),
            home_path: protected_base.clone(),
            protected_base,
            entries: Vec::new(),
            bypass_prefixes: Vec::new(),
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
        }
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = PolicyEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn with_bypass_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bypass_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }

    pub fn public_routes(&self) -> &[String] {
        &self.public_routes
    }

    pub fn protected_base(&self) -> &str {
        &self.protected_base
    }

    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn unauthorized_path(&self) -> &str {
        &self.unauthorized_path
    }

    /// Paths the request gate never looks at (API calls, static assets).
    pub fn is_bypassed(&self, path: &str) -> bool {
        self.bypass_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_protected(&self, path: &str) -> bool {
        path.starts_with(self.protected_base.as_str())
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public_routes.iter().any(|route| route == path) {
            return RouteClass::Public;
        }

        if self.is_protected(path) {
            return RouteClass::Protected {
                required: self.required_roles(path),
            };
        }

        RouteClass::Unguarded
    }

    /// Roles demanded by the first matching entry, if any.
    pub fn required_roles(&self, path: &str) -> Option<RoleSet> {
        self.entries
            .iter()
            .find(|entry| path.starts_with(entry.prefix.as_str()))
            .map(|entry| entry.roles.clone())
    }

    /// Whether `roles` satisfy the requirement of a protected `path`.
    pub fn permits(&self, path: &str, roles: &RoleSet) -> bool {
        match self.required_roles(path) {
            Some(required) if !required.is_empty() => !required.is_disjoint(roles),
            _ => true,
        }
    }

    /// First section page gated by `role`.
    pub fn section_for(&self, role: Role) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.roles.contains(&role))
            .map(|entry| entry.prefix.as_str())
    }

    /// Destination after a successful login.
    ///
    /// A requested path is honored only when it is a same-site path under
    /// the protected base; anything else falls back to the home page.
    pub fn post_login_target(&self, requested: Option<&str>) -> String {
        requested
            .filter(|path| {
                path.starts_with('/')
                    && !path.starts_with("//")
                    && !path.contains('\\')
                    && self.is_protected(path)
            })
            .unwrap_or(self.home_path.as_str())
            .to_string()
    }

    pub fn login_redirect(&self, return_to: &str) -> String {
        format!(
            "{}?redirect={}",
            self.login_path,
            urlencoding::encode(return_to)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_match_exactly() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.classify("/"), RouteClass::Public);
        assert_eq!(policy.classify("/login"), RouteClass::Public);
        assert_eq!(policy.classify("/unauthorized"), RouteClass::Public);
        assert_eq!(policy.classify("/login/extra"), RouteClass::Unguarded);
    }

    #[test]
    fn protected_base_without_entry_admits_any_user() {
        let policy = RoutePolicy::default();

        assert_eq!(
            policy.classify("/home"),
            RouteClass::Protected { required: None }
        );
        assert_eq!(
            policy.classify("/home/unauthorized"),
            RouteClass::Protected { required: None }
        );
        assert!(policy.permits("/home", &RoleSet::new()));
    }

    #[test]
    fn section_prefixes_carry_their_role() {
        let policy = RoutePolicy::default();

        assert_eq!(
            policy.classify("/home/admin/users/3"),
            RouteClass::Protected {
                required: Some(RoleSet::from([Role::Admin]))
            }
        );
        assert_eq!(
            policy.required_roles("/home/statistic"),
            Some(RoleSet::from([Role::Statistic]))
        );
    }

    #[test]
    fn first_matching_entry_wins() {
        let policy = RoutePolicy::new(["/"], "/app").with_entries([
            PolicyEntry::new("/app/reports/print", [Role::Print]),
            PolicyEntry::new("/app/reports", [Role::Statistic]),
        ]);

        assert_eq!(
            policy.required_roles("/app/reports/print/7"),
            Some(RoleSet::from([Role::Print]))
        );
        assert_eq!(
            policy.required_roles("/app/reports"),
            Some(RoleSet::from([Role::Statistic]))
        );
    }

    #[test]
    fn bypass_prefixes_cover_api_and_assets() {
        let policy = RoutePolicy::default();

        assert!(policy.is_bypassed("/api/search"));
        assert!(policy.is_bypassed("/favicon.ico"));
        assert!(!policy.is_bypassed("/home/admin"));
    }

    #[test]
    fn post_login_target_only_honors_protected_paths() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.post_login_target(Some("/home/print")), "/home/print");
        assert_eq!(policy.post_login_target(None), "/home");
        assert_eq!(policy.post_login_target(Some("//evil.example/home")), "/home");
        assert_eq!(policy.post_login_target(Some("https://evil.example")), "/home");
        assert_eq!(policy.post_login_target(Some("/login")), "/home");
    }

    #[test]
    fn login_redirect_encodes_return_path() {
        let policy = RoutePolicy::default();

        assert_eq!(
            policy.login_redirect("/home/admin"),
            "/login?redirect=%2Fhome%2Fadmin"
        );
    }
}

use crate::{
    domain::{Role, RoleSet},
    policy::RoutePolicy,
};

/// Where `/home` sends a user.
///
/// A remembered page is reused when it lies inside a section and the policy
/// still admits the user there. Otherwise the first held role in `Role::ALL`
/// order picks its section, and a user without any recognized role lands on
/// the unauthorized page.
pub fn landing_path(policy: &RoutePolicy, roles: &RoleSet, last_visited: Option<&str>) -> String {
    let remembered = last_visited.filter(|path| {
        policy.is_protected(path)
            && policy
                .entries()
                .iter()
                .any(|entry| within_section(path, &entry.prefix))
            && policy.permits(path, roles)
    });

    if let Some(path) = remembered {
        return path.to_string();
    }

    Role::ALL
        .into_iter()
        .filter(|role| roles.contains(role))
        .find_map(|role| policy.section_for(role))
        .unwrap_or(policy.unauthorized_path())
        .to_string()
}

/// The section page itself or a `/`-separated page below it. The remainder
/// must be visible ASCII so the path is usable as a `Location` header.
fn within_section(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/') && rest.bytes().all(|b| b.is_ascii_graphic()),
        None => false,
    }
}

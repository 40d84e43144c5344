//! Route catalog for the navigation shell.
//!
//! Paths, screen names and the metadata the shell checks before navigating
//! (whether a screen needs a signed-in staff member, and which roles may see
//! it).

use shared::Role;

pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const MEMBER_LOGIN: &str = "/member-login";
    pub const MEMBER_SIGNUP: &str = "/member-signup";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";

    pub const DASHBOARD: &str = "/dashboard";
    pub const PROFILE: &str = "/profile";
    pub const SETTINGS: &str = "/settings";
    pub const REPORTS: &str = "/reports";
    pub const MODAL: &str = "/modal";

    pub const MEMBERS: &str = "/members";
    pub const MEMBERS_ADD: &str = "/members/add";
    pub const COLLECTIONS: &str = "/collections";
    pub const EXPENSES: &str = "/expenses";

    pub const ROOT: &str = "/";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteConfig {
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub requires_auth: bool,
    /// Empty means every role
    pub roles: &'static [Role],
}

const fn route(path: &'static str, name: &'static str, title: &'static str, requires_auth: bool) -> RouteConfig {
    RouteConfig {
        path,
        name,
        title,
        requires_auth,
        roles: &[],
    }
}

pub const ROUTE_CONFIGS: &[RouteConfig] = &[
    route(routes::LOGIN, "login", "Login", false),
    route(routes::SIGNUP, "signup", "Sign Up", false),
    route(routes::MEMBER_LOGIN, "member-login", "Member Login", false),
    route(routes::MEMBER_SIGNUP, "member-signup", "Member Sign Up", false),
    route(routes::FORGOT_PASSWORD, "forgot-password", "Forgot Password", false),
    route(routes::DASHBOARD, "dashboard", "Dashboard", true),
    route(routes::PROFILE, "profile", "Profile", true),
    RouteConfig {
        roles: &[Role::Admin],
        ..route(routes::SETTINGS, "settings", "Settings", true)
    },
    route(routes::REPORTS, "reports", "Reports", true),
    route(routes::MEMBERS, "members/index", "Members", true),
    route(routes::MEMBERS_ADD, "members/add", "Add Member", true),
    route("/members/", "members/[id]", "Member Details", true),
    route(routes::COLLECTIONS, "collections/index", "Collections", true),
    route(routes::EXPENSES, "expenses/index", "Expenses", true),
    route(routes::MODAL, "modal", "Modal", false),
];

pub fn member_detail_route(id: &str) -> String {
    format!("{}/{}", routes::MEMBERS, id)
}

pub fn find_route(path: &str) -> Option<&'static RouteConfig> {
    ROUTE_CONFIGS.iter().find(|config| config.path == path)
}

/// Unknown paths are treated as public
pub fn requires_auth(path: &str) -> bool {
    find_route(path).is_some_and(|config| config.requires_auth)
}

/// Unknown paths are never accessible; restricted paths need a matching role
pub fn is_accessible_by_role(path: &str, role: Option<Role>) -> bool {
    match find_route(path) {
        None => false,
        Some(config) if config.roles.is_empty() => true,
        Some(config) => role.is_some_and(|role| config.roles.contains(&role)),
    }
}

pub fn route_title(path: &str) -> &'static str {
    find_route(path).map_or("Unknown", |config| config.title)
}

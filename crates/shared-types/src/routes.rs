//! Route table, per-route access requirements, and the dashboard selector.

use crate::access::Access;
use crate::role::{Role, RoleSet};

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const VERIFICATION_SENT: &str = "/verification-sent";
pub const VERIFY_EMAIL: &str = "/verify-email";
pub const UNAUTHORIZED: &str = "/unauthorized";
pub const COMPLAINT_NEW: &str = "/complaint/new";
pub const DASHBOARD_CITIZEN: &str = "/dashboard/citizen";
pub const DASHBOARD_SECRETARY: &str = "/dashboard/secretary";
pub const DASHBOARD_VILLAGE_HEAD: &str = "/dashboard/village-head";
pub const DASHBOARD_SUPER_ADMIN: &str = "/dashboard/super-admin";

const CITIZEN_AREA: RoleSet = RoleSet::of(&[Role::Citizen, Role::SuperAdmin]);
const SECRETARY_AREA: RoleSet = RoleSet::of(&[Role::Secretary, Role::SuperAdmin]);
const VILLAGE_HEAD_AREA: RoleSet = RoleSet::of(&[Role::VillageHead, Role::SuperAdmin]);
const SUPER_ADMIN_AREA: RoleSet = RoleSet::only(Role::SuperAdmin);

/// Every path the app serves, with what it requires. Paths not listed
/// render the not-found view without any auth check.
pub const ROUTE_TABLE: &[(&str, Access)] = &[
    (HOME, Access::Public),
    (LOGIN, Access::Public),
    (REGISTER, Access::Public),
    (VERIFICATION_SENT, Access::Public),
    (VERIFY_EMAIL, Access::Public),
    (UNAUTHORIZED, Access::Public),
    (COMPLAINT_NEW, Access::Roles(CITIZEN_AREA)),
    (DASHBOARD_CITIZEN, Access::Roles(CITIZEN_AREA)),
    (DASHBOARD_SECRETARY, Access::Roles(SECRETARY_AREA)),
    (DASHBOARD_VILLAGE_HEAD, Access::Roles(VILLAGE_HEAD_AREA)),
    (DASHBOARD_SUPER_ADMIN, Access::Roles(SUPER_ADMIN_AREA)),
];

/// Strip query string, fragment and trailing slash (except for the root).
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => HOME,
        trimmed => trimmed,
    }
}

/// Access requirement for a path, `None` for paths outside the table.
pub fn lookup(path: &str) -> Option<Access> {
    let path = normalize(path);
    ROUTE_TABLE
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, access)| *access)
}

/// Access requirement used by the guard. Unknown paths are treated as public;
/// the router shows them as not found.
pub fn access_for_path(path: &str) -> Access {
    lookup(path).unwrap_or(Access::Public)
}

/// Landing dashboard for a role. Absent role lands on the citizen dashboard.
pub fn dashboard_for(role: Option<Role>) -> &'static str {
    match role.unwrap_or_default() {
        Role::SuperAdmin => DASHBOARD_SUPER_ADMIN,
        Role::Secretary => DASHBOARD_SECRETARY,
        Role::VillageHead => DASHBOARD_VILLAGE_HEAD,
        Role::Citizen => DASHBOARD_CITIZEN,
    }
}

/// Landing dashboard for an unvalidated backend role string.
pub fn dashboard_for_raw(role: Option<&str>) -> &'static str {
    dashboard_for(role.and_then(Role::parse))
}

/// Sign-in location that returns to `from` afterwards.
pub fn login_with_return(from: &str) -> String {
    format!("{LOGIN}?redirect={}", urlencoding::encode(from))
}

/// Verification-pending location carrying the submitted email.
pub fn verification_sent_for(email: &str) -> String {
    format!("{VERIFICATION_SENT}?email={}", urlencoding::encode(email))
}

/// Where to go right after sign-in.
///
/// A guard-recorded `redirect` is honored only when it names a protected
/// route the resolved role may open; otherwise the role's dashboard.
pub fn post_login_destination(role: Option<Role>, redirect: Option<&str>) -> String {
    let requested = redirect
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| {
            urlencoding::decode(r)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| r.to_string())
        });

    if let (Some(path), Some(role)) = (requested, role) {
        if let Some(Access::Roles(set)) = lookup(&path) {
            if set.contains(role) {
                return path;
            }
        }
    }

    dashboard_for(role).to_string()
}

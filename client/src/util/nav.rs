//! Route table shared by the sidebar and the route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! A role sees a sidebar entry exactly when the guard for that route would
//! admit it, because both read the allow-lists below.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::net::types::Role;

const ADMINS: &[Role] = &[Role::Superadmin, Role::Admin];
const OFFICE: &[Role] = &[Role::Superadmin, Role::Admin, Role::Staff];
const EVERYONE: &[Role] = &Role::ALL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub roles: &'static [Role],
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { path: "/", label: "Dashboard", roles: ADMINS },
    NavItem { path: "/map", label: "Fleet map", roles: EVERYONE },
    NavItem { path: "/trips", label: "Trips", roles: OFFICE },
    NavItem { path: "/receipts", label: "Receipts", roles: OFFICE },
    NavItem { path: "/profile", label: "Profile", roles: EVERYONE },
];

/// Allow-list for `path`; empty for routes outside the table.
#[must_use]
pub fn allowed_roles(path: &str) -> &'static [Role] {
    NAV_ITEMS
        .iter()
        .find(|item| item.path == path)
        .map(|item| item.roles)
        .unwrap_or(&[])
}

/// Sidebar entries visible to `role`.
#[must_use]
pub fn visible_items(role: Option<Role>) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| item.roles.is_empty() || role.is_some_and(|r| item.roles.contains(&r)))
        .copied()
        .collect()
}

/// Landing route for `role`: its first visible sidebar entry.
#[must_use]
pub fn home_for(role: Option<Role>) -> &'static str {
    visible_items(role).first().map_or("/unauthorized", |item| item.path)
}

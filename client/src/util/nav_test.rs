use super::*;

#[test]
fn allowed_roles_reads_table() {
    assert_eq!(allowed_roles("/"), &[Role::Superadmin, Role::Admin]);
    assert_eq!(allowed_roles("/map").len(), 4);
    assert!(allowed_roles("/nowhere").is_empty());
}

#[test]
fn maintenance_sees_map_and_profile_only() {
    let paths: Vec<&str> = visible_items(Some(Role::Maintenance)).iter().map(|i| i.path).collect();
    assert_eq!(paths, vec!["/map", "/profile"]);
}

#[test]
fn staff_sees_operational_pages() {
    let paths: Vec<&str> = visible_items(Some(Role::Staff)).iter().map(|i| i.path).collect();
    assert_eq!(paths, vec!["/map", "/trips", "/receipts", "/profile"]);
}

#[test]
fn superadmin_sees_everything() {
    assert_eq!(visible_items(Some(Role::Superadmin)).len(), NAV_ITEMS.len());
}

#[test]
fn no_role_sees_nothing() {
    assert!(visible_items(None).is_empty());
}

#[test]
fn home_for_picks_first_visible_entry() {
    assert_eq!(home_for(Some(Role::Admin)), "/");
    assert_eq!(home_for(Some(Role::Staff)), "/map");
    assert_eq!(home_for(None), "/unauthorized");
}

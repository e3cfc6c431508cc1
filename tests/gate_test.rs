//! Session validity, landing routes and role menus.

mod common;

use chrono::{TimeDelta, TimeZone, Utc};

use roomdesk::auth::gate::{
    MenuEntry, PROFILE_ROUTE, SessionData, can_administer, is_session_valid, landing_route,
    menu_for, sidebar_for,
};
use roomdesk::models::nav_item::find_navigation;
use roomdesk::models::role::Role;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
}

fn routes(entries: &[MenuEntry]) -> Vec<&'static str> {
    entries.iter().map(|e| e.route).collect()
}

// --- is_session_valid -------------------------------------------------------

#[test]
fn test_session_with_future_expiry_is_valid() {
    let session = common::session("Employee", now() + TimeDelta::hours(1));
    assert!(is_session_valid(&session, now()));
}

#[test]
fn test_session_expired_an_hour_ago_is_invalid() {
    let session = common::session("Employee", now() - TimeDelta::hours(1));
    assert!(!is_session_valid(&session, now()));
}

#[test]
fn test_session_expiring_exactly_now_is_invalid() {
    let session = common::session("Admin", now());
    assert!(!is_session_valid(&session, now()));
}

#[test]
fn test_session_one_second_before_expiry_is_valid() {
    let session = common::session("Admin", now());
    assert!(is_session_valid(&session, now() - TimeDelta::seconds(1)));
}

#[test]
fn test_session_without_token_is_invalid() {
    let mut session = common::session("Employee", now() + TimeDelta::days(1));
    session.token = None;
    assert!(!is_session_valid(&session, now()));
}

#[test]
fn test_session_with_empty_token_is_invalid() {
    let mut session = common::session("Employee", now() + TimeDelta::days(1));
    session.token = Some(String::new());
    assert!(!is_session_valid(&session, now()));
}

#[test]
fn test_session_without_user_is_invalid() {
    let mut session = common::session("Employee", now() + TimeDelta::days(1));
    session.user = None;
    assert!(!is_session_valid(&session, now()));
}

#[test]
fn test_unreadable_user_record_fails_closed() {
    let session = SessionData {
        token: Some("token".to_string()),
        token_exp: Some(now() + TimeDelta::days(30)),
        user: None,
    };
    assert!(!is_session_valid(&session, now()));
    assert!(!is_session_valid(&session, now() - TimeDelta::days(1)));
}

#[test]
fn test_session_without_expiry_is_invalid() {
    let mut session = common::session("Employee", now() + TimeDelta::days(1));
    session.token_exp = None;
    assert!(!is_session_valid(&session, now()));
}

#[test]
fn test_empty_session_is_invalid() {
    assert!(!is_session_valid(&SessionData::default(), now()));
}

#[test]
fn test_validity_does_not_depend_on_role() {
    let exp = now() + TimeDelta::minutes(5);
    for role in ["Admin", "Employee", "Guest", "Janitor", ""] {
        assert!(is_session_valid(&common::session(role, exp), now()), "role {role:?}");
    }
}

// --- landing_route ----------------------------------------------------------

#[test]
fn test_admin_lands_on_admin_dashboard() {
    assert_eq!(landing_route(Some(Role::Admin)), "/admin/dashboard");
}

#[test]
fn test_employee_and_guest_land_on_dashboard() {
    assert_eq!(landing_route(Some(Role::Employee)), "/dashboard");
    assert_eq!(landing_route(Some(Role::Guest)), "/dashboard");
}

#[test]
fn test_unknown_role_lands_on_profile() {
    assert_eq!(landing_route(Role::parse("Janitor")), PROFILE_ROUTE);
    assert_eq!(landing_route(None), "/profile");
}

// --- menu_for ---------------------------------------------------------------

#[test]
fn test_admin_menu_entries_in_order() {
    let menu = menu_for(Some(Role::Admin));
    let labels: Vec<_> = menu.iter().map(|e| e.label).collect();
    assert_eq!(labels, ["Dashboard", "Features", "Rooms", "Users"]);
    assert_eq!(
        routes(menu),
        ["/admin/dashboard", "/admin/features", "/admin/rooms", "/admin/users"]
    );
}

#[test]
fn test_employee_menu_entries_in_order() {
    let menu = menu_for(Some(Role::Employee));
    let labels: Vec<_> = menu.iter().map(|e| e.label).collect();
    assert_eq!(
        labels,
        ["Dashboard", "Meetings", "Meetings Calendar", "Profile", "Action Items"]
    );
    assert_eq!(
        routes(menu),
        ["/dashboard", "/meetings", "/meetings/calendar", "/profile", "/action-items"]
    );
}

#[test]
fn test_guest_shares_employee_menu() {
    assert_eq!(menu_for(Some(Role::Guest)), menu_for(Some(Role::Employee)));
}

#[test]
fn test_unknown_role_has_empty_menu() {
    assert!(menu_for(None).is_empty());
    assert!(menu_for(Role::parse("")).is_empty());
}

#[test]
fn test_role_parse_is_exact() {
    assert_eq!(Role::parse("Admin"), Some(Role::Admin));
    assert_eq!(Role::parse("admin"), None);
    assert_eq!(Role::parse("Superuser"), None);
}

// --- sidebar ----------------------------------------------------------------

#[test]
fn test_admin_sidebar_appends_profile() {
    let sidebar = sidebar_for(Some(Role::Admin));
    assert_eq!(sidebar.len(), 5);
    assert_eq!(sidebar.last().map(|e| e.route), Some(PROFILE_ROUTE));
}

#[test]
fn test_employee_sidebar_does_not_duplicate_profile() {
    let sidebar = sidebar_for(Some(Role::Employee));
    assert_eq!(sidebar.len(), 5);
    assert_eq!(sidebar.iter().filter(|e| e.route == PROFILE_ROUTE).count(), 1);
}

#[test]
fn test_sidebar_for_unknown_role_only_has_profile() {
    assert_eq!(routes(&sidebar_for(None)), [PROFILE_ROUTE]);
}

#[test]
fn test_navigation_marks_longest_matching_entry() {
    let nav = find_navigation(Some(Role::Employee), "/meetings/calendar");
    let active: Vec<_> = nav.iter().filter(|n| n.is_active).map(|n| n.url.as_str()).collect();
    assert_eq!(active, ["/meetings/calendar"]);

    let nav = find_navigation(Some(Role::Employee), "/meetings/12");
    let active: Vec<_> = nav.iter().filter(|n| n.is_active).map(|n| n.url.as_str()).collect();
    assert_eq!(active, ["/meetings"]);
}

#[test]
fn test_navigation_prefix_respects_segments() {
    let nav = find_navigation(Some(Role::Admin), "/admin/usersettings");
    assert!(nav.iter().all(|n| !n.is_active));
}

// --- can_administer ---------------------------------------------------------

#[test]
fn test_only_admin_can_administer() {
    assert!(can_administer(Some(Role::Admin)));
    assert!(!can_administer(Some(Role::Employee)));
    assert!(!can_administer(Some(Role::Guest)));
    assert!(!can_administer(None));
}

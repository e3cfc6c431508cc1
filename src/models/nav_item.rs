use crate::auth::gate;
use crate::models::role::Role;

pub struct NavSidebarItem {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

/// Sidebar entries for `role`, with the entry matching `current_path` marked.
///
/// Longest-prefix match: on `/meetings/calendar` only "Meetings Calendar" is
/// active, while `/meetings/12` activates "Meetings".
pub fn find_navigation(role: Option<Role>, current_path: &str) -> Vec<NavSidebarItem> {
    let entries = gate::sidebar_for(role);

    let best_match_len = entries
        .iter()
        .filter(|e| path_has_prefix(current_path, e.route))
        .map(|e| e.route.len())
        .max()
        .unwrap_or(0);

    entries
        .into_iter()
        .map(|e| NavSidebarItem {
            label: e.label.to_string(),
            url: e.route.to_string(),
            is_active: best_match_len > 0
                && e.route.len() == best_match_len
                && path_has_prefix(current_path, e.route),
        })
        .collect()
}

/// Segment-aware prefix test: `/meetings` matches `/meetings/3` but not `/meetingsx`.
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

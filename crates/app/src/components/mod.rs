pub mod complaint_card;
pub mod footer;
pub mod header;
pub mod stat_card;
pub mod user_management;

use crate::routes::{route_for, Route};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBuilding, LdEllipsis, LdLightbulb, LdShield, LdTreePine};
use dioxus_free_icons::Icon;
use shared_types::access::{is_allowed, Access};
use shared_types::routes::access_for_path;
use shared_types::SessionSnapshot;

/// Whether the signed-in user may open `path`. Used to hide links the guard
/// would reject.
pub fn may_open(snapshot: &SessionSnapshot, path: &str) -> bool {
    match access_for_path(path) {
        Access::Public => true,
        Access::Roles(required) => is_allowed(snapshot.profile.as_ref(), required),
    }
}

/// Route for a dashboard path from the dashboard selector.
pub fn dashboard_route(path: &str) -> Route {
    route_for(path).unwrap_or(Route::CitizenDashboard {})
}

/// Glyph named by a complaint category's icon key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryGlyph {
    Building,
    Lightbulb,
    Shield,
    Tree,
    Other,
}

impl CategoryGlyph {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "building" => CategoryGlyph::Building,
            "lightbulb" => CategoryGlyph::Lightbulb,
            "shield" => CategoryGlyph::Shield,
            "tree" => CategoryGlyph::Tree,
            _ => CategoryGlyph::Other,
        }
    }
}

/// Icon for a complaint category's icon key.
#[component]
pub fn CategoryIcon(icon: String) -> Element {
    match CategoryGlyph::from_key(&icon) {
        CategoryGlyph::Building => rsx! { Icon::<LdBuilding> { icon: LdBuilding, width: 16, height: 16 } },
        CategoryGlyph::Lightbulb => rsx! { Icon::<LdLightbulb> { icon: LdLightbulb, width: 16, height: 16 } },
        CategoryGlyph::Shield => rsx! { Icon::<LdShield> { icon: LdShield, width: 16, height: 16 } },
        CategoryGlyph::Tree => rsx! { Icon::<LdTreePine> { icon: LdTreePine, width: 16, height: 16 } },
        CategoryGlyph::Other => rsx! { Icon::<LdEllipsis> { icon: LdEllipsis, width: 16, height: 16 } },
    }
}

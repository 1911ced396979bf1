//! App-level state: `app/route`, `search/keyword`.

use serde::{Deserialize, Serialize};

/// Screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// `/`: decides between login and dashboard.
    Root,
    Login,
    Categories,
    Resources,
}

impl Route {
    /// Landing page after login.
    pub const DASHBOARD: Route = Route::Categories;

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Categories => "/admin/master-categories",
            Route::Resources => "/admin/resource",
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/" | "" => Some(Route::Root),
            "/login" => Some(Route::Login),
            "/admin/master-categories" => Some(Route::Categories),
            "/admin/resource" => Some(Route::Resources),
            _ => None,
        }
    }

    /// Whether the route shows a list page.
    pub fn is_admin(self) -> bool {
        matches!(self, Route::Categories | Route::Resources)
    }
}

/// Current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppRoute(pub Route);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}

/// Keyword typed in the top-bar search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKeyword(pub String);

impl SearchKeyword {
    pub const PATH: &'static str = "search/keyword";
}

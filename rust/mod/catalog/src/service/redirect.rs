//! Route bookkeeping and the `/` redirector.

use catalog_flux::StateStore;
use catalog_session::SessionStore;
use tracing::{debug, warn};

use crate::service::login::SESSION_KEY;
use crate::state::{AppRoute, Route};

/// Where `/` leads: the dashboard when a session value exists, else login.
pub fn resolve(sessions: &dyn SessionStore) -> Route {
    match sessions.get(SESSION_KEY) {
        Ok(Some(_)) => Route::DASHBOARD,
        Ok(None) => Route::Login,
        Err(e) => {
            warn!(error = %e, "session read failed");
            Route::Login
        }
    }
}

pub fn current(store: &StateStore) -> Route {
    store
        .get_as::<AppRoute>(AppRoute::PATH)
        .map(|r| r.0)
        .unwrap_or(Route::Root)
}

pub fn navigate(store: &StateStore, route: Route) {
    debug!(path = route.path(), "navigate");
    store.set(AppRoute::PATH, AppRoute(route));
}

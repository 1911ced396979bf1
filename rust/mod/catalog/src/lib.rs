//! Catalog admin dashboard.
//!
//! Two list pages (categories, resources) share one controller shape: load
//! the table, edit rows in a modal, reload after every mutation. A login
//! gate with a typed-back challenge guards them, and a single keyword box
//! filters whichever page is shown.
//!
//! Everything runs headless on Flux: state is published at paths
//! (`categories/page`, `auth/login`, `app/route`, ...) and a renderer drives
//! the dashboard by emitting requests (see [`handlers::register_handlers`]).

pub mod captcha;
pub mod confirm;
pub mod handlers;
pub mod model;
pub mod request;
pub mod service;
pub mod state;

use std::sync::Arc;

use catalog_client::DataService;
use catalog_flux::StateStore;
use catalog_session::SessionStore;

use crate::captcha::Challenge;
use crate::confirm::Confirm;
use crate::model::{Category, Resource};
use crate::service::{redirect, ListController, LoginController, LoginOutcome, SearchContext};
use crate::state::Route;

/// The dashboard: every controller wired to one store, service and session.
pub struct Dashboard {
    store: Arc<StateStore>,
    sessions: Arc<dyn SessionStore>,
    search: SearchContext,
    pub categories: ListController<Category>,
    pub resources: ListController<Resource>,
    pub login: LoginController,
}

impl Dashboard {
    pub fn new(
        store: Arc<StateStore>,
        service: Arc<dyn DataService>,
        sessions: Arc<dyn SessionStore>,
        confirm: Arc<dyn Confirm>,
        challenge: Box<dyn Challenge>,
    ) -> Self {
        let search = SearchContext::new(Arc::clone(&store));
        Self {
            categories: ListController::new(
                Arc::clone(&service),
                Arc::clone(&store),
                search.clone(),
                Arc::clone(&confirm),
            ),
            resources: ListController::new(
                Arc::clone(&service),
                Arc::clone(&store),
                search.clone(),
                confirm,
            ),
            login: LoginController::new(
                service,
                Arc::clone(&sessions),
                challenge,
                Arc::clone(&store),
            ),
            store,
            sessions,
            search,
        }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn search(&self) -> &SearchContext {
        &self.search
    }

    pub fn route(&self) -> Route {
        redirect::current(&self.store)
    }

    /// Initial render of `/`.
    pub async fn open(&self) -> Route {
        let route = redirect::resolve(self.sessions.as_ref());
        self.navigate(route).await;
        route
    }

    /// Leave the current screen and show `route`.
    pub async fn navigate(&self, route: Route) {
        match self.route() {
            Route::Categories => self.categories.unmount(),
            Route::Resources => self.resources.unmount(),
            Route::Login => self.login.unmount(),
            Route::Root => {}
        }
        redirect::navigate(&self.store, route);
        match route {
            Route::Categories => self.categories.mount().await,
            Route::Resources => self.resources.mount().await,
            Route::Login => self.login.mount(),
            Route::Root => {}
        }
    }

    /// Submit the login form; on success go to the dashboard.
    pub async fn login(&self, email: &str, password: &str, captcha: &str) -> LoginOutcome {
        let outcome = self.login.submit(email, password, captcha).await;
        if let LoginOutcome::Success(_) = outcome {
            self.navigate(Route::DASHBOARD).await;
        }
        outcome
    }

    pub async fn logout(&self) {
        self.login.logout();
        self.navigate(Route::Login).await;
    }
}

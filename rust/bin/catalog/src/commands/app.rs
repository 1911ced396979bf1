//! Builds the dashboard engine from the client config.

use std::sync::Arc;

use anyhow::Result;
use catalog::captcha::TextChallenge;
use catalog::confirm::Confirm;
use catalog::handlers::register_handlers;
use catalog::model::Entity;
use catalog::request::{NavigateReq, OpenAppReq, SetKeywordReq};
use catalog::state::{AppRoute, ListState, Route};
use catalog::Dashboard;
use catalog_client::{DataService, RestService};
use catalog_flux::Flux;
use catalog_session::{RedbSessionStore, SessionStore};
use tracing::debug;

use crate::config::ClientConfig;

/// A running dashboard: the Flux engine with every handler registered.
///
/// Commands drive it through `flux.emit`; `dash` is kept for derived
/// read-side views (filtered rows, category names).
pub struct App {
    pub flux: Flux,
    pub dash: Arc<Dashboard>,
}

impl App {
    pub fn open(config: &ClientConfig, confirm: Arc<dyn Confirm>) -> Result<Self> {
        if config.service_url.is_empty() {
            anyhow::bail!("No service URL set. Run `catalog config set --service-url <url>`.");
        }
        let service: Arc<dyn DataService> =
            Arc::new(RestService::new(&config.service_url, &config.api_key));
        let session_path = config.session_path();
        debug!(path = %session_path.display(), "opening session store");
        let sessions: Arc<dyn SessionStore> = Arc::new(RedbSessionStore::open(&session_path)?);
        Ok(Self::with(service, sessions, confirm))
    }

    pub fn with(
        service: Arc<dyn DataService>,
        sessions: Arc<dyn SessionStore>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let flux = Flux::new();
        let dash = Dashboard::new(
            flux.store().clone(),
            service,
            sessions,
            confirm,
            Box::new(TextChallenge::new()),
        );
        let dash = Arc::new(dash);
        register_handlers(&flux, dash.clone());
        Self { flux, dash }
    }

    pub fn route(&self) -> Route {
        self.flux
            .get_as::<AppRoute>(AppRoute::PATH)
            .map(|r| r.0)
            .unwrap_or(Route::Root)
    }

    /// Resolve `/`; fails unless a session exists.
    pub async fn require_session(&self) -> Result<()> {
        self.flux.emit(OpenAppReq::PATH, OpenAppReq).await;
        if self.route() == Route::Login {
            anyhow::bail!("Not logged in. Run `catalog login`.");
        }
        Ok(())
    }

    /// Log in check, search keyword, then show the page.
    pub async fn show(&self, route: Route, keyword: Option<&str>) -> Result<()> {
        self.require_session().await?;
        if let Some(keyword) = keyword {
            self.flux
                .emit(SetKeywordReq::PATH, SetKeywordReq(keyword.to_string()))
                .await;
        }
        if self.route() != route {
            self.flux.emit(NavigateReq::PATH, NavigateReq(route)).await;
        }
        Ok(())
    }

    pub fn page<E: Entity>(&self) -> ListState<E> {
        self.flux.get_as(E::STATE_PATH).unwrap_or_default()
    }
}

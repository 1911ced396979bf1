//! Flux wiring: one `flux.on(path, ...)` per request, each downcasting its
//! payload and calling into the [`Dashboard`].

use std::any::Any;
use std::sync::Arc;

use catalog_flux::{Flux, StateStore};
use tracing::warn;

use crate::model::Entity;
use crate::request::*;
use crate::service::ListController;
use crate::Dashboard;

/// Register every dashboard request with a Flux instance.
pub fn register_handlers(flux: &Flux, dash: Arc<Dashboard>) {
    // app/open
    {
        let dash = dash.clone();
        flux.on(OpenAppReq::PATH, move |_, _, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                dash.open().await;
            }
        });
    }

    // app/navigate
    {
        let dash = dash.clone();
        flux.on(NavigateReq::PATH, move |path, payload, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                let Some(req) = payload_as::<NavigateReq>(&path, &payload) else {
                    return;
                };
                dash.navigate(req.0).await;
            }
        });
    }

    // search/set
    {
        let dash = dash.clone();
        flux.on(SetKeywordReq::PATH, move |path, payload, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                if let Some(req) = payload_as::<SetKeywordReq>(&path, &payload) {
                    dash.search().set(req.0.clone());
                }
            }
        });
    }

    // auth/mount
    {
        let dash = dash.clone();
        flux.on(LoginMountReq::PATH, move |_, _, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                dash.login.mount();
            }
        });
    }

    // auth/submit
    {
        let dash = dash.clone();
        flux.on(LoginReq::PATH, move |path, payload, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                let Some(req) = payload_as::<LoginReq>(&path, &payload) else {
                    return;
                };
                dash.login(&req.email, &req.password, &req.captcha).await;
            }
        });
    }

    // auth/logout
    {
        let dash = dash.clone();
        flux.on(LogoutReq::PATH, move |_, _, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                dash.logout().await;
            }
        });
    }

    register_page(flux, dash.clone(), |d| &d.categories);
    register_page(flux, dash.clone(), |d| &d.resources);

    // categories/import
    {
        let dash = dash.clone();
        flux.on(ImportDefaultsReq::PATH, move |_, _, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                dash.categories.import_defaults().await;
            }
        });
    }

    // resources/set-filter
    flux.on(SetCategoryFilterReq::PATH, move |path, payload, _: Arc<StateStore>| {
        let dash = dash.clone();
        async move {
            if let Some(req) = payload_as::<SetCategoryFilterReq>(&path, &payload) {
                dash.resources.set_category_filter(req.0);
            }
        }
    });
}

/// `{scope}/{action}` handlers for one list page.
fn register_page<E: Entity>(
    flux: &Flux,
    dash: Arc<Dashboard>,
    page: fn(&Dashboard) -> &ListController<E>,
) {
    for action in PageAction::ALL {
        let dash = dash.clone();
        flux.on(&action.path(E::SCOPE), move |path, payload, _: Arc<StateStore>| {
            let dash = dash.clone();
            async move {
                let page = page(&dash);
                match action {
                    PageAction::Mount => page.mount().await,
                    PageAction::Unmount => page.unmount(),
                    PageAction::Reload => page.reload().await,
                    PageAction::Create => page.begin_create(),
                    PageAction::Cancel => page.cancel(),
                    PageAction::Edit => {
                        let Some(req) = payload_as::<BeginEditReq>(&path, &payload) else {
                            return;
                        };
                        match page.state().find(req.id).cloned() {
                            Some(item) => page.begin_edit(&item),
                            None => warn!(%path, id = req.id, "edit target not loaded"),
                        }
                    }
                    PageAction::Draft => {
                        if let Some(req) = payload_as::<UpdateDraftReq<E::Draft>>(&path, &payload) {
                            page.update_draft(req.0.clone());
                        }
                    }
                    PageAction::Submit => {
                        if let Some(req) = payload_as::<SubmitReq<E::Draft>>(&path, &payload) {
                            page.submit(req.0.clone()).await;
                        }
                    }
                    PageAction::Delete => {
                        if let Some(req) = payload_as::<DeleteReq>(&path, &payload) {
                            page.remove(req.id).await;
                        }
                    }
                }
            }
        });
    }
}

fn payload_as<'a, T: Any>(path: &str, payload: &'a Arc<dyn Any + Send + Sync>) -> Option<&'a T> {
    let req = payload.downcast_ref::<T>();
    if req.is_none() {
        warn!(path, "unexpected payload type");
    }
    req
}

//! Requests emitted by a renderer, routed to handlers by path.

pub mod app;
pub mod auth;
pub mod page;

pub use app::{NavigateReq, OpenAppReq, SetKeywordReq};
pub use auth::{LoginMountReq, LoginReq, LogoutReq};
pub use page::{
    BeginEditReq, DeleteReq, ImportDefaultsReq, PageAction, SetCategoryFilterReq, SubmitReq,
    UpdateDraftReq,
};

use crate::state::Route;

/// Initial render: resolve `/` to the login screen or the dashboard.
pub struct OpenAppReq;

impl OpenAppReq {
    pub const PATH: &'static str = "app/open";
}

/// Switch screens. Entering a list page mounts it; leaving unmounts it.
pub struct NavigateReq(pub Route);

impl NavigateReq {
    pub const PATH: &'static str = "app/navigate";
}

/// Top-bar search input changed.
pub struct SetKeywordReq(pub String);

impl SetKeywordReq {
    pub const PATH: &'static str = "search/set";
}

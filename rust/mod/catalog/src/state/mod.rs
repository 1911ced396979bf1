//! State published into the Flux store, one struct per path.

pub mod app;
pub mod auth;
pub mod page;

pub use app::{AppRoute, Route, SearchKeyword};
pub use auth::{LoginPhase, LoginState};
pub use page::{CategoryFilter, ListState};

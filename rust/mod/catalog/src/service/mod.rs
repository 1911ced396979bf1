//! Controllers: the logic behind each screen.

pub mod category;
pub mod filter;
pub mod list;
pub mod login;
pub mod redirect;
pub mod resource;
pub mod search;

pub use category::DEFAULT_CATEGORIES;
pub use list::ListController;
pub use login::{LoginController, LoginFailure, LoginOutcome, CHALLENGE_LENGTH, SESSION_KEY};
pub use search::SearchContext;

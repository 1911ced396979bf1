//! Client-side session store.
//!
//! Holds the logged-in user's identity between runs, the way a browser's
//! origin-scoped local storage would. No expiry is managed here.

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::SessionError;
pub use memory::MemorySessionStore;
pub use redb::RedbSessionStore;
pub use traits::SessionStore;

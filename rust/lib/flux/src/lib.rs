//! Flux: headless state engine for the catalog dashboard.
//!
//! Rust owns all dashboard state and logic; a renderer (the `catalog` CLI,
//! or any other front-end) only reads state and forwards user intents.
//!
//! # Three Primitives
//!
//! - `get(path)`: read state at a path (Arc clone, no data copy)
//! - `emit(path, payload)`: send a request, routed to matching handler(s)
//! - `subscribe(pattern)`: observe state changes under a pattern
//!
//! # Path Addressing
//!
//! State and requests share one flat namespace with `/` as separator:
//! - Global: `app/route`, `search/keyword`, `auth/login`
//! - Page: `categories/page`, `resources/page`, `resources/filter`
//!
//! # Patterns
//!
//! Subscriptions and request handlers accept MQTT-style wildcards:
//! - Exact: `categories/page`
//! - Single-level: `+/page` matches `categories/page` and `resources/page`
//! - Multi-level: `resources/#` matches everything under `resources/`
//! - All: `#`
//!
//! # Example
//!
//! ```ignore
//! use catalog_flux::Flux;
//!
//! let flux = Flux::new();
//!
//! flux.on("search/set", |_, payload, store| async move {
//!     let keyword = payload.downcast_ref::<String>().cloned().unwrap_or_default();
//!     store.set("search/keyword", keyword);
//! });
//!
//! flux.subscribe("search/#", |path, _| println!("{path} changed"));
//! flux.emit("search/set", "icons".to_string()).await;
//! ```

pub mod app;
pub mod router;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};

//! Catalog data service client.
//!
//! The dashboard talks to a hosted, table-oriented database API. This crate
//! defines that contract ([`DataService`]) and ships two implementations:
//!
//! - [`RestService`]: PostgREST dialect over HTTP (`/rest/v1/{table}`).
//! - [`MemoryService`]: in-process tables with server-assigned ids, used by
//!   tests and local demos.
//!
//! # Usage
//!
//! ```ignore
//! use catalog_client::{Query, RestService, Table};
//!
//! let service = Arc::new(RestService::new("https://xyz.supabase.co", "anon-key"));
//! let categories = Table::<Category>::new(service, "categories");
//! let rows = categories.select(&Query::select("id, name").order_asc("id")).await?;
//! ```

pub mod error;
pub mod memory;
pub mod query;
pub mod rest;
pub mod table;
pub mod traits;

pub use error::ServiceError;
pub use memory::MemoryService;
pub use query::{Direction, Filter, Order, Query};
pub use rest::RestService;
pub use table::Table;
pub use traits::DataService;

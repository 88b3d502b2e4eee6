//! Product catalogue service library.
//!
//! CRUD over a single `products` table held by a hosted PostgREST store.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod products;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

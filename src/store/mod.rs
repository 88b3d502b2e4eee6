//! Remote store subsystem.
//!
//! # Data Flow
//! ```text
//! products::repository (typed rows)
//!     → client.rs (table query → HTTP request with project key)
//!     → hosted store (PostgREST)
//!     → client.rs (status check, JSON decode)
//!     → Vec<T> or StoreError (types.rs)
//! ```

pub mod client;
pub mod types;

pub use client::{StoreClient, TableQuery};
pub use types::{StoreError, StoreResult};

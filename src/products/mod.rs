//! Product resource.
//!
//! # Data Flow
//! ```text
//! HTTP path segments
//!     → params.rs (lenient number parsing, description marker)
//!     → handlers.rs (build Product / NewProduct)
//!     → repository.rs (product table on the store)
//!     → handlers.rs (JSON array or bare status)
//! ```

pub mod handlers;
pub mod model;
pub mod params;
pub mod repository;

pub use model::{NewProduct, Product};
pub use repository::ProductRepository;

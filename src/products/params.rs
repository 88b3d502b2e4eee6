//! Path segment parsing.
//!
//! Numbers are parsed leniently: anything that does not parse becomes zero.
//! The description segment carries a fixed `d=` marker that is removed here.

use serde::Deserialize;

/// Prefix carried by every description path segment.
pub const DESCRIPTION_MARKER: &str = "d=";

/// Segments of `POST /new/{name}/{description}/{price}`.
#[derive(Debug, Deserialize)]
pub struct NewProductPath {
    pub name: String,
    pub description: String,
    pub price: String,
}

/// Segments of `PUT /edit/{id}/{name}/{description}/{price}`.
#[derive(Debug, Deserialize)]
pub struct EditProductPath {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
}

/// Parse a price, falling back to `0.0`.
pub fn parse_price(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}

/// Parse a product id, falling back to `0`.
pub fn parse_id(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

/// Remove the description marker, `None` if it is missing.
pub fn strip_description_marker(raw: &str) -> Option<&str> {
    raw.strip_prefix(DESCRIPTION_MARKER)
}

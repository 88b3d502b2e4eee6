//! Product request handlers.
//!
//! Each handler maps path segments onto a store call and relays the result.
//! Failures are expressed as [`ApiError`] and turned into responses there.

use std::future::Future;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::{json_response, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::products::model::{NewProduct, Product};
use crate::products::params::{
    parse_id, parse_price, strip_description_marker, EditProductPath, NewProductPath,
};

/// `GET /products/` and anything below it
pub async fn list_products(State(state): State<AppState>) -> Response {
    observe("list", async move {
        let products = state.products.list().await.map_err(ApiError::Fetch)?;
        json_response(&products)
    })
    .await
}

/// `GET /products` redirects to the listing, as does any trailing-slash tree.
pub async fn redirect_to_products() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/products/")]).into_response()
}

/// `POST /new/{name}/{description}/{price}`
pub async fn create_product(
    State(state): State<AppState>,
    Path(path): Path<NewProductPath>,
) -> Response {
    observe("create", async move {
        let description = strip_description_marker(&path.description)
            .ok_or_else(|| ApiError::MissingMarker(path.description.clone()))?;

        let product = NewProduct {
            name: path.name,
            description: description.to_string(),
            price: parse_price(&path.price),
        };

        let created = state.products.create(&product).await?;
        tracing::info!(created = ?created, "Created");
        json_response(&created)
    })
    .await
}

/// `DELETE /delete/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    observe("delete", async move {
        let deleted = state.products.delete(parse_id(&id)).await?;
        tracing::info!(deleted = ?deleted, "Deleted");
        Ok::<_, ApiError>(StatusCode::OK.into_response())
    })
    .await
}

/// `PUT /edit/{id}/{name}/{description}/{price}`
pub async fn edit_product(
    State(state): State<AppState>,
    Path(path): Path<EditProductPath>,
) -> Response {
    observe("update", async move {
        let description = strip_description_marker(&path.description)
            .ok_or_else(|| ApiError::MissingMarker(path.description.clone()))?;

        let product = Product {
            id: parse_id(&path.id),
            name: path.name,
            description: description.to_string(),
            price: parse_price(&path.price),
        };

        let updated = state.products.update(&product).await?;
        tracing::info!(updated = ?updated, "Updated");
        Ok::<_, ApiError>(StatusCode::OK.into_response())
    })
    .await
}

/// Run a handler body and record its outcome.
async fn observe<F>(operation: &'static str, handler: F) -> Response
where
    F: Future<Output = Result<Response, ApiError>>,
{
    let start = Instant::now();
    let response = handler.await.unwrap_or_else(IntoResponse::into_response);
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}

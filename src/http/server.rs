//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the product handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{make_request_span, request_id_header, MakeRequestUuid};
use crate::products::handlers::{
    create_product, delete_product, edit_product, list_products, redirect_to_products,
};
use crate::products::ProductRepository;
use crate::store::{StoreClient, StoreResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductRepository,
}

/// HTTP server for the product service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> StoreResult<Self> {
        let store = StoreClient::new(&config.store)?;
        let state = AppState {
            products: ProductRepository::new(store, config.store.table.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(request_id_header()));

        Router::new()
            .route("/products", get(redirect_to_products))
            .route("/products/", get(list_products))
            .route("/products/{*rest}", get(list_products))
            .route("/new/{name}/{description}/{price}", post(create_product))
            .route("/delete/{id}", delete(delete_product))
            .route("/edit/{id}/{name}/{description}/{price}", put(edit_product))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            table = %self.config.store.table,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

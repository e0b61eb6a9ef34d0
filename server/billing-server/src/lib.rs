//! Hospital billing server
//!
//! HTTP API over the billing service: filtered lists with row badges,
//! per-entity statistics, the dashboard summary and create/update/delete for
//! procedures, surgeries, invoices and patients.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod report;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::*;
pub use server::{wait_for_shutdown, BillingServer};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: BillingServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(server)
}

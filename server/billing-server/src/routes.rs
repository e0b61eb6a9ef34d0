use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers::{dashboard, health, invoices, patients, procedures, surgeries},
    openapi,
    server::BillingServer,
};

/// Create health check routes
pub fn health_routes() -> Router<BillingServer> {
    Router::new().route("/health", get(health::health_check))
}

pub fn dashboard_routes() -> Router<BillingServer> {
    Router::new().route("/dashboard", get(dashboard::get_dashboard))
}

/// Create procedure catalogue routes
pub fn procedure_routes() -> Router<BillingServer> {
    Router::new()
        .route(
            "/procedures",
            get(procedures::list_procedures).post(procedures::create_procedure),
        )
        .route("/procedures/stats", get(procedures::procedure_stats))
        .route(
            "/procedures/:id",
            put(procedures::update_procedure).delete(procedures::delete_procedure),
        )
}

/// Create surgery routes
pub fn surgery_routes() -> Router<BillingServer> {
    Router::new()
        .route(
            "/surgeries",
            get(surgeries::list_surgeries).post(surgeries::create_surgery),
        )
        .route("/surgeries/stats", get(surgeries::surgery_stats))
        .route(
            "/surgeries/:id",
            put(surgeries::update_surgery).delete(surgeries::delete_surgery),
        )
}

/// Create invoice routes
pub fn invoice_routes() -> Router<BillingServer> {
    Router::new()
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route("/invoices/stats", get(invoices::invoice_stats))
        .route(
            "/invoices/:id",
            put(invoices::update_invoice).delete(invoices::delete_invoice),
        )
        .route("/invoices/:id/payment", post(invoices::record_payment))
}

/// Create patient routes
pub fn patient_routes() -> Router<BillingServer> {
    Router::new()
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/patients/stats", get(patients::patient_stats))
        .route(
            "/patients/:id",
            put(patients::update_patient).delete(patients::delete_patient),
        )
}

/// Create API v1 routes
pub fn api_v1_routes() -> Router<BillingServer> {
    Router::new()
        .merge(dashboard_routes())
        .merge(procedure_routes())
        .merge(surgery_routes())
        .merge(invoice_routes())
        .merge(patient_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<BillingServer> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::docs_routes())
}

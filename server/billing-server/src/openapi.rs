use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::server::BillingServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,

        // Dashboard
        crate::handlers::dashboard::get_dashboard,

        // Procedures
        crate::handlers::procedures::list_procedures,
        crate::handlers::procedures::procedure_stats,
        crate::handlers::procedures::create_procedure,
        crate::handlers::procedures::update_procedure,
        crate::handlers::procedures::delete_procedure,

        // Surgeries
        crate::handlers::surgeries::list_surgeries,
        crate::handlers::surgeries::surgery_stats,
        crate::handlers::surgeries::create_surgery,
        crate::handlers::surgeries::update_surgery,
        crate::handlers::surgeries::delete_surgery,

        // Invoices
        crate::handlers::invoices::list_invoices,
        crate::handlers::invoices::invoice_stats,
        crate::handlers::invoices::create_invoice,
        crate::handlers::invoices::update_invoice,
        crate::handlers::invoices::record_payment,
        crate::handlers::invoices::delete_invoice,

        // Patients
        crate::handlers::patients::list_patients,
        crate::handlers::patients::patient_stats,
        crate::handlers::patients::create_patient,
        crate::handlers::patients::update_patient,
        crate::handlers::patients::delete_patient,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::error::ApiErrorResponse,
            crate::error::ResponseMetadata,
            billing_service::RowBadges,
            billing_service::Badge,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoint"),
        (name = "dashboard", description = "Revenue, activity and recent surgeries"),
        (name = "procedures", description = "Procedure catalogue"),
        (name = "surgeries", description = "Surgery scheduling and pricing"),
        (name = "invoices", description = "Invoicing and payments"),
        (name = "patients", description = "Patient register"),
    ),
    info(
        title = "Hospital Billing API",
        version = "0.1.0",
        description = "Procedures, surgeries, invoices and patients for the hospital billing dashboard.",
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document
pub fn docs_routes() -> Router<BillingServer> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

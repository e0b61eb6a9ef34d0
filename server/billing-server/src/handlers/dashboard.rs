use axum::{extract::State, Json};
use billing_service::DashboardSummary;

use crate::error::{api_success, ApiResponse};
use crate::server::BillingServer;

/// Stat cards and most recent surgeries for the landing page
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(State(server): State<BillingServer>) -> Json<ApiResponse<DashboardSummary>> {
    let summary = server.service.read().await.dashboard();
    Json(api_success(summary))
}
